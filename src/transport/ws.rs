use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::transport::Transport;

/// WebSocket client transport. The game protocol is text-framed; anything
/// else on the socket is skipped.
pub struct WebSocketTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketTransport {
    /// Open a session against `url`. Failure here is terminal for the
    /// session: there is no retry and no fallback transport.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let (stream, _response) = connect_async(url)
            .await
            .map_err(|e| anyhow::anyhow!("WebSocket transport unavailable: {}", e))?;
        Ok(Self { stream })
    }
}

#[async_trait::async_trait]
impl Transport for WebSocketTransport {
    async fn send(&mut self, text: String) -> anyhow::Result<()> {
        self.stream
            .send(Message::Text(text))
            .await
            .map_err(|e| anyhow::anyhow!("WebSocket send failed: {}", e))
    }

    async fn recv(&mut self) -> anyhow::Result<Option<String>> {
        while let Some(frame) = self.stream.next().await {
            match frame {
                Ok(Message::Text(text)) => return Ok(Some(text)),
                Ok(Message::Close(_)) => return Ok(None),
                // tungstenite answers pings on its own.
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) | Ok(Message::Frame(_)) => continue,
                Ok(Message::Binary(_)) => {
                    log::warn!("skipping binary frame on a text protocol");
                    continue;
                }
                Err(e) => return Err(anyhow::anyhow!("WebSocket receive failed: {}", e)),
            }
        }
        Ok(None)
    }
}
