use crate::board::{Board, WinSet};

/// Presentation boundary. The core calls these and never reads back.
pub trait StatusSink {
    /// Replace the human-visible status line.
    fn set_status(&mut self, text: &str);
    /// Redraw the whole board from the latest snapshot.
    fn render_board(&mut self, board: &Board);
    /// Mark the winning cells.
    fn highlight(&mut self, win: &WinSet);
    /// Update the active-player counter.
    fn set_active_players(&mut self, count: u32);
}
