// WebSocket client utilities for testing

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// WebSocket test client
pub struct WebSocketClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketClient {
    /// Connect to a WebSocket endpoint, retrying until success or timeout.
    pub async fn connect_retry(
        url: &str,
        timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let start = tokio::time::Instant::now();
        loop {
            match connect_async(url).await {
                Ok((stream, _)) => return Ok(Self { stream }),
                Err(err) => {
                    if start.elapsed() >= timeout {
                        return Err(Box::new(err));
                    }
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            }
        }
    }

    /// Receive the next non-control message with a timeout. Server pings are
    /// skipped.
    pub async fn recv_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Message>, Box<dyn std::error::Error>> {
        loop {
            let next = tokio::time::timeout(timeout, self.stream.next())
                .await
                .map_err(|_| "Timeout waiting for message")?
                .transpose()?;
            match next {
                Some(Message::Ping(_)) | Some(Message::Pong(_)) => continue,
                other => return Ok(other),
            }
        }
    }

    /// Send a text message
    pub async fn send(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::Text(text.into())).await?;
        Ok(())
    }

    /// Close the connection
    pub async fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.close(None).await?;
        Ok(())
    }

    /// Next text frame as a raw string.
    pub async fn recv_text(&mut self) -> Result<String, Box<dyn std::error::Error>> {
        match self.recv_timeout(RECV_TIMEOUT).await? {
            Some(Message::Text(text)) => Ok(text.to_string()),
            other => Err(format!("expected text frame, got {other:?}").into()),
        }
    }

    /// Next text frame parsed as JSON.
    pub async fn recv_json(&mut self) -> Result<Value, Box<dyn std::error::Error>> {
        let text = self.recv_text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// True once the server has closed the socket (close frame or EOF).
    pub async fn expect_closed(&mut self) -> Result<bool, Box<dyn std::error::Error>> {
        match self.recv_timeout(RECV_TIMEOUT).await {
            Ok(Some(Message::Close(_))) | Ok(None) => Ok(true),
            Ok(Some(_)) => Ok(false),
            // Reset without a close frame still counts as closed
            Err(err) if err.to_string().contains("Timeout") => Ok(false),
            Err(_) => Ok(true),
        }
    }
}
