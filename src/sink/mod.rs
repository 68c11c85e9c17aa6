//! Persistence of accepted records.
//!
//! The ingestion loop only sees the [`RecordSink`] trait; the concrete
//! store behind it is a SurrealDB connection.

use async_trait::async_trait;
use thiserror::Error;

use crate::schemas::Record;

pub mod surreal;

pub use surreal::SurrealSink;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("could not connect to the record store at {address}")]
    Connect {
        address: String,
        #[source]
        source: surrealdb::Error,
    },
    #[error("could not authenticate against the record store")]
    Auth(#[source] surrealdb::Error),
    #[error("could not select namespace {namespace:?} database {name:?}")]
    Select {
        namespace: String,
        name: String,
        #[source]
        source: surrealdb::Error,
    },
    #[error("could not insert record into {collection}")]
    Insert {
        collection: String,
        #[source]
        source: surrealdb::Error,
    },
    #[error("record store rejected the write: {reason}")]
    Rejected { reason: String },
}

/// Destination for every record a stream produces. One record becomes
/// one new document in the named collection.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn insert(&self, collection: &str, record: &Record) -> Result<(), SinkError>;
}
