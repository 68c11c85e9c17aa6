//! Live filtered streams over websocket transport.
//!
//! A [`StreamChannel`] knows the endpoint and credentials; each call to
//! [`StreamChannel::open`] yields an independent [`FilterStream`] handle
//! carrying only the items that match one tracked term.

use async_trait::async_trait;
use thiserror::Error;
use tokio_tungstenite::tungstenite;
use tracing::debug;
use url::Url;

use crate::config::AppConfig;
use crate::schemas::StreamItem;

pub mod filter_stream;

pub use filter_stream::FilterStream;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("invalid stream endpoint {endpoint:?}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    #[error("credentials cannot be carried in a request header")]
    Credentials(#[source] tungstenite::http::header::InvalidHeaderValue),
    #[error("could not open filtered stream at {endpoint}")]
    Connect {
        endpoint: String,
        #[source]
        source: tungstenite::Error,
    },
    #[error("stream transport failed")]
    Transport(#[from] tungstenite::Error),
    #[error("stream delivered an item that is not valid JSON")]
    Parse(#[from] serde_json::Error),
    #[error("stream closed by the server")]
    Closed(Option<String>),
}

/// A source of decoded stream items. One implementation speaks
/// websocket; tests script their own.
#[async_trait]
pub trait ItemStream: Send {
    /// Wait for the next matching item. Once this returns an error the
    /// handle is spent and every later call fails too.
    async fn next_item(&mut self) -> Result<StreamItem, StreamError>;

    /// Tear the connection down. Safe to call more than once.
    async fn close(&mut self) -> Result<(), StreamError>;
}

/// Connection details for the filtered stream API.
pub struct StreamChannel {
    endpoint: String,
    bearer_token: String,
}

impl StreamChannel {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            endpoint: config.stream_endpoint.clone(),
            bearer_token: config.access.token.clone(),
        }
    }

    /// Open one live stream filtered down to `term`.
    pub async fn open(&self, term: &str) -> Result<FilterStream, StreamError> {
        let url = filter_url(&self.endpoint, term)?;
        debug!(%url, term, "opening filtered stream");
        FilterStream::connect(url, &self.bearer_token).await
    }
}

fn filter_url(endpoint: &str, term: &str) -> Result<Url, StreamError> {
    let mut url = Url::parse(endpoint).map_err(|source| StreamError::Endpoint {
        endpoint: endpoint.to_string(),
        source,
    })?;
    url.query_pairs_mut().append_pair("track", term);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_url_appends_the_track_parameter() {
        let url = filter_url("wss://feed.example.org/filter", "#climate").unwrap();
        assert_eq!(url.as_str(), "wss://feed.example.org/filter?track=%23climate");
    }

    #[test]
    fn test_filter_url_encodes_spaces() {
        let url = filter_url("wss://feed.example.org/filter", "#rust lang").unwrap();
        assert_eq!(
            url.as_str(),
            "wss://feed.example.org/filter?track=%23rust+lang"
        );
    }

    #[test]
    fn test_filter_url_rejects_a_garbage_endpoint() {
        let err = filter_url("not a url", "#x").unwrap_err();
        assert!(matches!(err, StreamError::Endpoint { .. }));
    }
}
