//! Board model: a fixed-size grid of cells replaced wholesale on every
//! server snapshot. No partial update operation exists.

use core::fmt;

/// Opaque player marker carrying the integer character code the wire uses.
///
/// Code 0 stands for "no symbol" on the wire and never constructs a `Symbol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol(u32);

impl Symbol {
    /// Build a symbol from a wire character code. Returns `None` for code 0.
    pub fn from_code(code: u32) -> Option<Self> {
        if code == 0 {
            None
        } else {
            Some(Symbol(code))
        }
    }

    pub fn code(&self) -> u32 {
        self.0
    }

    /// Displayable form of the symbol.
    pub fn as_char(&self) -> char {
        char::from_u32(self.0).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Errors returned by board queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// The addressed cell lies outside the field. Indicates a protocol or
    /// implementation mismatch, never shown to the user.
    OutOfRange { row: usize, column: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfRange { row, column } => {
                write!(f, "cell ({}, {}) is outside the field", row, column)
            }
        }
    }
}

/// Ordered cell coordinates of completed winning line(s), used only for
/// highlighting. The server provides them; the client never derives them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinSet {
    cells: Vec<(usize, usize)>,
}

impl WinSet {
    pub(crate) fn push(&mut self, row: usize, column: usize) {
        self.cells.push((row, column));
    }

    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The `size × size` playing field plus the winner flag, as last reported
/// by the server. Size is fixed at session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Symbol>>,
    winner: Option<Symbol>,
}

impl Board {
    /// A field of the given side length with every cell free.
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
            winner: None,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Winning symbol, once the server has declared one.
    pub fn winner(&self) -> Option<Symbol> {
        self.winner
    }

    /// Occupant of the addressed cell, or `OutOfRange` for coordinates
    /// beyond the field.
    pub fn occupant(&self, row: usize, column: usize) -> Result<Option<Symbol>, BoardError> {
        if row >= self.size || column >= self.size {
            return Err(BoardError::OutOfRange { row, column });
        }
        Ok(self.cells[row * self.size + column])
    }

    pub(crate) fn set(
        &mut self,
        row: usize,
        column: usize,
        symbol: Symbol,
    ) -> Result<(), BoardError> {
        if row >= self.size || column >= self.size {
            return Err(BoardError::OutOfRange { row, column });
        }
        self.cells[row * self.size + column] = Some(symbol);
        Ok(())
    }

    pub(crate) fn set_winner(&mut self, winner: Option<Symbol>) {
        self.winner = winner;
    }
}
