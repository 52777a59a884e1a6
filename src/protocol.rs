//! Wire protocol: one JSON record per text frame, PascalCase keys.
//!
//! The codec recognizes exactly one inbound shape, the state snapshot
//! carrying a `Board` key. Records without that key decode to `None` and are
//! ignored upstream; unknown extra fields never fail a message.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Symbol, WinSet};

/// The only message the client originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MoveIntent {
    pub row: usize,
    pub column: usize,
}

/// Authoritative game state pushed by the server. The client never
/// constructs one; it only replaces its board with the one received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStateSnapshot {
    pub board: Board,
    pub win_set: WinSet,
    pub active_players: u32,
    pub can_move: bool,
}

/// Decode failures. The offending message is dropped and logged; it never
/// ends the session.
#[derive(Debug)]
pub enum CodecError {
    Malformed(serde_json::Error),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Malformed(err) => write!(f, "malformed message: {}", err),
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Malformed(err)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireState {
    board: Option<WireBoard>,
    #[serde(default)]
    active_players: u32,
    #[serde(default)]
    can_move: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireBoard {
    #[serde(default)]
    cells: Vec<WireCell>,
    #[serde(default)]
    win_lines: Option<WireWinLines>,
    #[serde(default)]
    winner: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireCell {
    row: i64,
    column: i64,
    symbol: u32,
}

// Direction arrays are optional on the wire; coordinates inside them are
// display-only, so absent fields degrade to skipping the entry.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireWinLines {
    #[serde(default)]
    horizontal: Vec<WireCoord>,
    #[serde(default)]
    vertical: Vec<WireCoord>,
    #[serde(default)]
    main_diagonal: Vec<WireCoord>,
    #[serde(default)]
    side_diagonal: Vec<WireCoord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireCoord {
    #[serde(default)]
    row: Option<i64>,
    #[serde(default)]
    column: Option<i64>,
}

/// Serialize a move intent as `{"Row":r,"Column":c}`.
pub fn encode_move(intent: &MoveIntent) -> Result<String, CodecError> {
    Ok(serde_json::to_string(intent)?)
}

/// Parse an inbound frame into a snapshot.
///
/// Returns `Ok(None)` for well-formed records without a `Board` key (not a
/// state update) and `Err` for records that do not parse; callers drop the
/// latter. Cells outside `board_size` are skipped and logged: the board size
/// is fixed at session start, so such a cell is a protocol mismatch.
pub fn decode_server(
    text: &str,
    board_size: usize,
) -> Result<Option<GameStateSnapshot>, CodecError> {
    let wire: WireState = serde_json::from_str(text)?;
    let Some(wire_board) = wire.board else {
        return Ok(None);
    };

    let mut board = Board::empty(board_size);
    for cell in &wire_board.cells {
        let (Ok(row), Ok(column)) = (usize::try_from(cell.row), usize::try_from(cell.column))
        else {
            log::warn!(
                "skipping cell with negative coordinates ({}, {})",
                cell.row,
                cell.column
            );
            continue;
        };
        match Symbol::from_code(cell.symbol) {
            Some(symbol) => {
                if let Err(err) = board.set(row, column, symbol) {
                    log::warn!("skipping cell from snapshot: {}", err);
                }
            }
            None => log::warn!("skipping cell ({}, {}) without a symbol", row, column),
        }
    }
    board.set_winner(Symbol::from_code(wire_board.winner));

    let mut win_set = WinSet::default();
    if let Some(lines) = &wire_board.win_lines {
        for line in [
            &lines.horizontal,
            &lines.vertical,
            &lines.main_diagonal,
            &lines.side_diagonal,
        ] {
            for coord in line {
                let (Some(row), Some(column)) = (coord.row, coord.column) else {
                    continue;
                };
                let (Ok(row), Ok(column)) = (usize::try_from(row), usize::try_from(column))
                else {
                    continue;
                };
                win_set.push(row, column);
            }
        }
    }

    Ok(Some(GameStateSnapshot {
        board,
        win_set,
        active_players: wire.active_players,
        can_move: wire.can_move,
    }))
}
