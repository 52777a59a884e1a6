use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::task::yield_now;

use crate::transport::Transport;

/// Paired in-process transport for tests: frames sent on one half arrive on
/// the other. `close` ends the channel once the peer has drained it.
pub struct InMemoryTransport {
    recv_queue: Arc<Mutex<VecDeque<String>>>,
    send_queue: Arc<Mutex<VecDeque<String>>>,
    recv_closed: Arc<AtomicBool>,
    send_closed: Arc<AtomicBool>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let q1 = Arc::new(Mutex::new(VecDeque::new()));
        let q2 = Arc::new(Mutex::new(VecDeque::new()));
        let f1 = Arc::new(AtomicBool::new(false));
        let f2 = Arc::new(AtomicBool::new(false));
        (
            Self {
                recv_queue: q1.clone(),
                send_queue: q2.clone(),
                recv_closed: f1.clone(),
                send_closed: f2.clone(),
            },
            Self {
                recv_queue: q2,
                send_queue: q1,
                recv_closed: f2,
                send_closed: f1,
            },
        )
    }

    /// Close the channel from this side. The peer keeps receiving queued
    /// frames, then sees end-of-stream.
    pub fn close(&self) {
        self.send_closed.store(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, text: String) -> anyhow::Result<()> {
        if self.send_closed.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("channel closed"));
        }
        let mut queue = self.send_queue.lock().unwrap();
        queue.push_back(text);
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Option<String>> {
        loop {
            if let Some(text) = {
                let mut queue = self.recv_queue.lock().unwrap();
                queue.pop_front()
            } {
                return Ok(Some(text));
            }
            if self.recv_closed.load(Ordering::SeqCst) {
                return Ok(None);
            }
            if Arc::strong_count(&self.recv_queue) == 1 {
                return Ok(None);
            }
            yield_now().await;
        }
    }
}
