//! Single-threaded event loop tying the connection to the controller. All
//! reactions run one at a time; suspension happens only at the event
//! boundary.

use tokio::sync::mpsc;

use crate::config::ClientConfig;
use crate::connection::{ConnectionEvent, ConnectionManager};
use crate::controller::SyncController;
use crate::sink::StatusSink;

pub struct GameClient<S: StatusSink> {
    connection: ConnectionManager,
    controller: SyncController<S>,
}

impl<S: StatusSink> GameClient<S> {
    /// Connect and assemble the client. A connect failure is terminal: the
    /// caller reports it and gives up on the session.
    pub async fn connect(config: &ClientConfig, sink: S) -> anyhow::Result<Self> {
        let connection = ConnectionManager::connect(config).await?;
        let mut controller =
            SyncController::new(config.field_size, Box::new(connection.sender()), sink);
        controller.connecting();
        Ok(Self {
            connection,
            controller,
        })
    }

    /// Assemble from an existing connection, for tests and custom transports.
    pub fn from_parts(connection: ConnectionManager, controller: SyncController<S>) -> Self {
        Self {
            connection,
            controller,
        }
    }

    pub fn controller(&self) -> &SyncController<S> {
        &self.controller
    }

    /// React to connection events and clicks until the connection closes.
    /// `clicks` delivers `(row, column)` pairs from the input surface; the
    /// loop keeps syncing state even after the input side hangs up.
    pub async fn run(&mut self, mut clicks: mpsc::Receiver<(usize, usize)>) {
        let mut input_open = true;
        loop {
            enum Step {
                Event(Option<ConnectionEvent>),
                Click(Option<(usize, usize)>),
            }
            let step = tokio::select! {
                event = self.connection.next_event() => Step::Event(event),
                click = clicks.recv(), if input_open => Step::Click(click),
            };
            match step {
                Step::Event(Some(event)) => {
                    let closed = matches!(event, ConnectionEvent::Closed);
                    self.controller.handle_event(event);
                    if closed {
                        break;
                    }
                }
                Step::Event(None) => {
                    // Pump ended without a close frame; treat it as one.
                    self.controller.handle_event(ConnectionEvent::Closed);
                    break;
                }
                Step::Click(Some((row, column))) => self.controller.click(row, column),
                Step::Click(None) => input_open = false,
            }
        }
    }
}
