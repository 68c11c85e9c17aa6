use async_trait::async_trait;
use surrealdb::{Connection, Surreal};
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::debug;

use super::{RecordSink, SinkError};
use crate::config::DatabaseConfig;
use crate::schemas::Record;

/// A record store backed by any SurrealDB engine.
pub struct SurrealSink<C: Connection> {
    db: Surreal<C>,
}

impl SurrealSink<Client> {
    /// Connect over websocket and select the configured namespace and
    /// database. Sign-in only happens when credentials are configured.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, SinkError> {
        let db = Surreal::new::<Ws>(config.address.as_str())
            .await
            .map_err(|source| SinkError::Connect {
                address: config.address.clone(),
                source,
            })?;
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            db.signin(Root {
                username: username.as_str(),
                password: password.as_str(),
            })
            .await
            .map_err(SinkError::Auth)?;
        }
        db.use_ns(&config.namespace)
            .use_db(&config.name)
            .await
            .map_err(|source| SinkError::Select {
                namespace: config.namespace.clone(),
                name: config.name.clone(),
                source,
            })?;
        debug!(
            address = %config.address,
            namespace = %config.namespace,
            database = %config.name,
            "record store connected"
        );
        Ok(Self { db })
    }
}

#[async_trait]
impl<C: Connection> RecordSink for SurrealSink<C> {
    async fn insert(&self, collection: &str, record: &Record) -> Result<(), SinkError> {
        let _created: Option<Record> = self
            .db
            .create(collection)
            .content(record.clone())
            .await
            .map_err(|source| SinkError::Insert {
                collection: collection.to_string(),
                source,
            })?;
        Ok(())
    }
}
