//! Text-frame transports. The connection layer owns exactly one of these.

/// A bidirectional text-frame channel.
#[async_trait::async_trait]
pub trait Transport: Send {
    /// Deliver one outbound frame.
    async fn send(&mut self, text: String) -> anyhow::Result<()>;
    /// Next inbound frame, or `Ok(None)` once the peer has closed.
    async fn recv(&mut self) -> anyhow::Result<Option<String>>;
}

pub mod in_memory;
pub mod ws;
