mod board;
mod client;
mod config;
mod connection;
mod console;
mod controller;
mod logging;
pub mod protocol;
mod sink;
pub mod transport;

pub use board::{Board, BoardError, Symbol, WinSet};
pub use client::GameClient;
pub use config::{ClientConfig, FIELD_SIZE, WEBSOCKET_PATH};
pub use connection::{ConnectionEvent, ConnectionManager, MoveOutbox, MoveSender};
pub use console::ConsoleSink;
pub use controller::{
    Phase, SyncController, STATUS_CELL_BUSY, STATUS_CONNECTED, STATUS_DISCONNECTED,
    STATUS_WAIT_TURN, STATUS_YOUR_MOVE,
};
pub use logging::init_logging;
pub use protocol::{CodecError, GameStateSnapshot, MoveIntent};
pub use sink::StatusSink;
pub use transport::ws::WebSocketTransport;
