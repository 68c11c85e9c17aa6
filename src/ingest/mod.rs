pub mod engine;


pub use engine::{CapPolicy, IngestError, IngestionLoop, Lane, LaneReport, RunReport, STREAM_CAP};
