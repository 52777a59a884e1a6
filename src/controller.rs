//! Sync controller: the protocol state machine gating local input and
//! reconciling server snapshots into the board model.

use crate::board::Board;
use crate::connection::{ConnectionEvent, MoveOutbox};
use crate::protocol::{self, GameStateSnapshot, MoveIntent};
use crate::sink::StatusSink;

pub const STATUS_CONNECTED: &str = "You are connected to the server.";
pub const STATUS_DISCONNECTED: &str = "You have been disconnected.";
pub const STATUS_YOUR_MOVE: &str = "Your move!";
pub const STATUS_WAIT_TURN: &str = "Please, wait your move...";
pub const STATUS_CELL_BUSY: &str = "Cell you clicked is busy!";

/// Protocol phase. Snapshots loop between `Blocked` and `MyTurn` until one
/// carries a winner; `Closed` forces `Disconnected` from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    Connecting,
    AwaitingState,
    Blocked,
    MyTurn,
    GameOver,
}

pub struct SyncController<S: StatusSink> {
    phase: Phase,
    board: Board,
    /// One move per entry into `MyTurn`; re-armed by the next snapshot.
    move_sent: bool,
    outbox: Box<dyn MoveOutbox>,
    sink: S,
}

impl<S: StatusSink> SyncController<S> {
    pub fn new(field_size: usize, outbox: Box<dyn MoveOutbox>, sink: S) -> Self {
        Self {
            phase: Phase::Disconnected,
            board: Board::empty(field_size),
            move_sent: false,
            outbox,
            sink,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Board as of the last applied snapshot.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Note that a connection attempt is in flight.
    pub fn connecting(&mut self) {
        self.phase = Phase::Connecting;
    }

    pub fn handle_event(&mut self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Opened => {
                // Channel is live; game state stays unknown until the first
                // snapshot arrives.
                self.phase = Phase::AwaitingState;
                self.sink.set_status(STATUS_CONNECTED);
            }
            ConnectionEvent::Message(raw) => self.handle_message(&raw),
            ConnectionEvent::Closed => {
                self.phase = Phase::Disconnected;
                self.move_sent = false;
                self.sink.set_status(STATUS_DISCONNECTED);
            }
        }
    }

    fn handle_message(&mut self, raw: &str) {
        match protocol::decode_server(raw, self.board.size()) {
            Ok(Some(snapshot)) => self.apply_snapshot(snapshot),
            Ok(None) => log::debug!("ignoring message without board state"),
            Err(err) => log::warn!("dropping inbound message: {}", err),
        }
    }

    /// Reconcile: replace the board in full, then derive phase and status.
    /// The winner announcement outranks the turn message.
    fn apply_snapshot(&mut self, snapshot: GameStateSnapshot) {
        if self.phase == Phase::GameOver {
            log::debug!("game is over; ignoring further snapshots");
            return;
        }
        let GameStateSnapshot {
            board,
            win_set,
            active_players,
            can_move,
        } = snapshot;

        self.board = board;
        self.sink.render_board(&self.board);
        self.sink.set_active_players(active_players);

        if let Some(winner) = self.board.winner() {
            self.phase = Phase::GameOver;
            self.sink.highlight(&win_set);
            self.sink.set_status(&format!("Player {} won the game!", winner));
            log::info!("player {} won the game", winner);
            return;
        }

        if can_move {
            self.phase = Phase::MyTurn;
            self.move_sent = false;
            self.sink.set_status(STATUS_YOUR_MOVE);
        } else {
            self.phase = Phase::Blocked;
            self.sink.set_status(STATUS_WAIT_TURN);
        }
    }

    /// Gate a cell click. At most one move goes out per turn, and only for a
    /// free cell. The cell is not marked locally: the next snapshot is
    /// ground truth.
    pub fn click(&mut self, row: usize, column: usize) {
        match self.phase {
            Phase::MyTurn if !self.move_sent => {}
            // Terminal phases keep their announcement up.
            Phase::GameOver | Phase::Disconnected => return,
            _ => {
                self.sink.set_status(STATUS_WAIT_TURN);
                return;
            }
        }
        match self.board.occupant(row, column) {
            Err(err) => log::warn!("ignoring click outside the field: {}", err),
            Ok(Some(_)) => self.sink.set_status(STATUS_CELL_BUSY),
            Ok(None) => {
                let intent = MoveIntent { row, column };
                self.outbox.send_move(&intent);
                self.move_sent = true;
                self.sink
                    .set_status(&format!("You clicked: ({}, {})", row, column));
                log::info!("sent move ({}, {})", row, column);
            }
        }
    }
}
