use crate::board::{Board, WinSet};
use crate::sink::StatusSink;

/// Terminal presentation: the board as a character grid, status lines as
/// plain text.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn set_status(&mut self, text: &str) {
        println!("{}", text);
    }

    fn render_board(&mut self, board: &Board) {
        for row in 0..board.size() {
            let mut line = String::with_capacity(board.size() * 2);
            for column in 0..board.size() {
                let glyph = match board.occupant(row, column) {
                    Ok(Some(symbol)) => symbol.as_char(),
                    _ => '.',
                };
                line.push(glyph);
                line.push(' ');
            }
            println!("{}", line.trim_end());
        }
    }

    fn highlight(&mut self, win: &WinSet) {
        if win.is_empty() {
            return;
        }
        let cells: Vec<String> = win
            .cells()
            .iter()
            .map(|(row, column)| format!("({}, {})", row, column))
            .collect();
        println!("Winning cells: {}", cells.join(" "));
    }

    fn set_active_players(&mut self, count: u32) {
        println!("Active players: {}", count);
    }
}
