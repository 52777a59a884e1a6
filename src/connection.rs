//! Connection manager: owns exactly one transport and turns it into an
//! ordered event stream plus a fire-and-forget outbound queue.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::protocol::{self, MoveIntent};
use crate::transport::ws::WebSocketTransport;
use crate::transport::Transport;

/// Lifecycle and traffic events of the server connection, delivered in
/// arrival order. `Opened` comes first, `Closed` exactly once and last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    Opened,
    Message(String),
    Closed,
}

/// Outbound half of the connection as seen by the sync controller.
pub trait MoveOutbox: Send {
    /// Queue one move for delivery. Fire-and-forget: no acknowledgement is
    /// awaited, and delivery failure surfaces only as a later `Closed`.
    fn send_move(&self, intent: &MoveIntent);
}

/// Handle that encodes moves and queues them on the connection task.
#[derive(Clone)]
pub struct MoveSender {
    tx: mpsc::UnboundedSender<String>,
}

impl MoveOutbox for MoveSender {
    fn send_move(&self, intent: &MoveIntent) {
        match protocol::encode_move(intent) {
            Ok(text) => {
                if self.tx.send(text).is_err() {
                    log::warn!(
                        "dropping move ({}, {}): connection task is gone",
                        intent.row,
                        intent.column
                    );
                }
            }
            Err(err) => log::warn!("failed to encode move: {}", err),
        }
    }
}

pub struct ConnectionManager {
    events: mpsc::Receiver<ConnectionEvent>,
    outbound: mpsc::UnboundedSender<String>,
    pump: JoinHandle<()>,
}

impl ConnectionManager {
    /// Connect to the configured endpoint. Failure is terminal for the
    /// session; no retry is attempted by this layer.
    pub async fn connect(config: &ClientConfig) -> anyhow::Result<Self> {
        let transport = WebSocketTransport::connect(&config.url()).await?;
        Ok(Self::spawn(Box::new(transport)))
    }

    /// Drive an already-established transport.
    pub fn spawn(transport: Box<dyn Transport>) -> Self {
        let (event_tx, events) = mpsc::channel(32);
        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        let pump = tokio::spawn(pump(transport, event_tx, outbound_rx));
        Self {
            events,
            outbound,
            pump,
        }
    }

    pub fn sender(&self) -> MoveSender {
        MoveSender {
            tx: self.outbound.clone(),
        }
    }

    /// Next connection event. `None` once the stream has ended.
    pub async fn next_event(&mut self) -> Option<ConnectionEvent> {
        self.events.recv().await
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

/// Single task owning the transport: inbound frames become events, queued
/// moves go out, and any transport failure ends the session with `Closed`.
async fn pump(
    mut transport: Box<dyn Transport>,
    events: mpsc::Sender<ConnectionEvent>,
    mut outbound: mpsc::UnboundedReceiver<String>,
) {
    if events.send(ConnectionEvent::Opened).await.is_err() {
        return;
    }
    loop {
        enum Step {
            Outbound(Option<String>),
            Inbound(anyhow::Result<Option<String>>),
        }
        let step = tokio::select! {
            text = outbound.recv() => Step::Outbound(text),
            frame = transport.recv() => Step::Inbound(frame),
        };
        match step {
            Step::Outbound(Some(text)) => {
                if let Err(err) = transport.send(text).await {
                    log::warn!("send failed, closing connection: {}", err);
                    break;
                }
            }
            // All senders are gone, so the manager itself was dropped.
            Step::Outbound(None) => return,
            Step::Inbound(Ok(Some(text))) => {
                if events.send(ConnectionEvent::Message(text)).await.is_err() {
                    return;
                }
            }
            Step::Inbound(Ok(None)) => break,
            Step::Inbound(Err(err)) => {
                log::warn!("receive failed, closing connection: {}", err);
                break;
            }
        }
    }
    let _ = events.send(ConnectionEvent::Closed).await;
}
