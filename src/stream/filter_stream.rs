use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{client::IntoClientRequest, http, protocol::Message},
};
use tracing::{debug, trace};
use url::Url;

use super::{ItemStream, StreamError};
use crate::schemas::StreamItem;

/// One live websocket connection delivering matching items.
pub struct FilterStream {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    closed: bool,
}

impl FilterStream {
    pub(super) async fn connect(url: Url, bearer_token: &str) -> Result<Self, StreamError> {
        let mut request = url
            .as_str()
            .into_client_request()
            .map_err(|source| StreamError::Connect {
                endpoint: url.to_string(),
                source,
            })?;
        let auth = http::HeaderValue::from_str(&format!("Bearer {bearer_token}"))
            .map_err(StreamError::Credentials)?;
        request.headers_mut().insert(http::header::AUTHORIZATION, auth);

        let (ws, response) = connect_async(request)
            .await
            .map_err(|source| StreamError::Connect {
                endpoint: url.to_string(),
                source,
            })?;
        debug!(status = %response.status(), "filtered stream connected");
        Ok(Self { ws, closed: false })
    }

    fn decode(&mut self, raw: &[u8]) -> Result<StreamItem, StreamError> {
        match serde_json::from_slice(raw) {
            Ok(item) => Ok(item),
            Err(source) => {
                self.closed = true;
                Err(StreamError::Parse(source))
            }
        }
    }
}

#[async_trait]
impl ItemStream for FilterStream {
    async fn next_item(&mut self) -> Result<StreamItem, StreamError> {
        loop {
            if self.closed {
                return Err(StreamError::Closed(None));
            }
            match self.ws.next().await {
                Some(Ok(Message::Text(text))) => {
                    // The feed sends blank lines as keep-alives.
                    if text.trim().is_empty() {
                        trace!("keep-alive");
                        continue;
                    }
                    return self.decode(text.as_bytes());
                }
                Some(Ok(Message::Binary(bytes))) => {
                    return self.decode(&bytes);
                }
                Some(Ok(Message::Ping(payload))) => {
                    if let Err(source) = self.ws.send(Message::Pong(payload)).await {
                        self.closed = true;
                        return Err(StreamError::Transport(source));
                    }
                }
                Some(Ok(Message::Pong(_))) | Some(Ok(Message::Frame(_))) => {}
                Some(Ok(Message::Close(frame))) => {
                    self.closed = true;
                    let reason = frame.map(|f| f.reason.into_owned());
                    return Err(StreamError::Closed(reason));
                }
                Some(Err(source)) => {
                    self.closed = true;
                    return Err(StreamError::Transport(source));
                }
                None => {
                    self.closed = true;
                    return Err(StreamError::Closed(None));
                }
            }
        }
    }

    async fn close(&mut self) -> Result<(), StreamError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        match self.ws.close(None).await {
            Ok(())
            | Err(tokio_tungstenite::tungstenite::Error::ConnectionClosed)
            | Err(tokio_tungstenite::tungstenite::Error::AlreadyClosed) => Ok(()),
            Err(source) => Err(StreamError::Transport(source)),
        }
    }
}
