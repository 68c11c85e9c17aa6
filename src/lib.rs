pub mod config;
pub mod editor;
pub mod ingest;
pub mod logging;
pub mod query;
pub mod schemas;
pub mod sink;
pub mod stream;
pub mod summary;

pub use config::{AppConfig, ConfigError, DatabaseConfig, TokenPair};
pub use editor::CaptureOutcome;
pub use ingest::{CapPolicy, IngestError, IngestionLoop, Lane, LaneReport, RunReport, STREAM_CAP};
pub use query::{MARKER, Query};
pub use schemas::{DecodeError, Record, StreamItem};
pub use sink::{RecordSink, SinkError, SurrealSink};
pub use stream::{FilterStream, ItemStream, StreamChannel, StreamError};
pub use summary::format_record;
