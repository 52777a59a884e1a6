/// Default field side length, matching the server's 10×10 board.
pub const FIELD_SIZE: usize = 10;

/// Well-known WebSocket path on the game server.
pub const WEBSOCKET_PATH: &str = "/websocket";

/// Session configuration: which server to join and how big its field is.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub field_size: usize,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            field_size: FIELD_SIZE,
        }
    }

    pub fn with_field_size(mut self, field_size: usize) -> Self {
        self.field_size = field_size;
        self
    }

    /// Endpoint URL over the insecure upgrade scheme the server speaks.
    pub fn url(&self) -> String {
        format!("ws://{}{}", self.host, WEBSOCKET_PATH)
    }
}
