use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use tictac::protocol::decode_server;
use tictac::{Board, ConnectionEvent, MoveIntent, MoveOutbox, StatusSink, SyncController, WinSet};

const SIZE: usize = 5;

#[derive(Clone, Default)]
struct CountingOutbox {
    moves: Arc<Mutex<Vec<MoveIntent>>>,
}

impl CountingOutbox {
    fn count(&self) -> usize {
        self.moves.lock().unwrap().len()
    }
}

impl MoveOutbox for CountingOutbox {
    fn send_move(&self, intent: &MoveIntent) {
        self.moves.lock().unwrap().push(*intent);
    }
}

struct NullSink;

impl StatusSink for NullSink {
    fn set_status(&mut self, _text: &str) {}
    fn render_board(&mut self, _board: &Board) {}
    fn highlight(&mut self, _win: &WinSet) {}
    fn set_active_players(&mut self, _count: u32) {}
}

fn snapshot_json(cells: &[(usize, usize)], can_move: bool) -> String {
    let cells_json: Vec<String> = cells
        .iter()
        .map(|(row, column)| {
            format!(r#"{{"Row":{},"Column":{},"Symbol":88}}"#, row, column)
        })
        .collect();
    format!(
        r#"{{"Board":{{"Cells":[{}],"Winner":0}},"ActivePlayers":2,"CanMove":{}}}"#,
        cells_json.join(","),
        can_move
    )
}

fn cells_strategy() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..SIZE, 0..SIZE), 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // The codec must drop garbage, never take the session down.
    #[test]
    fn decode_never_panics(text in ".{0,256}") {
        let _ = decode_server(&text, SIZE);
    }

    // Board reconciliation is last-write-wins over any snapshot sequence.
    #[test]
    fn last_snapshot_wins(
        snapshots in prop::collection::vec((cells_strategy(), any::<bool>()), 1..12),
    ) {
        let mut ctrl = SyncController::new(SIZE, Box::new(CountingOutbox::default()), NullSink);
        ctrl.handle_event(ConnectionEvent::Opened);
        for (cells, can_move) in &snapshots {
            ctrl.handle_event(ConnectionEvent::Message(snapshot_json(cells, *can_move)));
        }

        let (last_cells, last_can_move) = snapshots.last().unwrap();
        let expected = decode_server(&snapshot_json(last_cells, *last_can_move), SIZE)
            .unwrap()
            .unwrap();
        prop_assert_eq!(ctrl.board(), &expected.board);
    }

    // Replaying the identical snapshot changes nothing.
    #[test]
    fn repeated_snapshot_is_idempotent(
        cells in cells_strategy(),
        repeats in 1..5usize,
    ) {
        let mut ctrl = SyncController::new(SIZE, Box::new(CountingOutbox::default()), NullSink);
        ctrl.handle_event(ConnectionEvent::Opened);

        let text = snapshot_json(&cells, false);
        for _ in 0..repeats {
            ctrl.handle_event(ConnectionEvent::Message(text.clone()));
        }

        let expected = decode_server(&text, SIZE).unwrap().unwrap();
        prop_assert_eq!(ctrl.board(), &expected.board);
    }

    // However wild the clicking, at most one move goes out per turn grant.
    #[test]
    fn at_most_one_move_per_grant(
        turns in prop::collection::vec(any::<bool>(), 1..10),
        clicks in prop::collection::vec((0..SIZE, 0..SIZE), 0..20),
    ) {
        let outbox = CountingOutbox::default();
        let mut ctrl = SyncController::new(SIZE, Box::new(outbox.clone()), NullSink);
        ctrl.handle_event(ConnectionEvent::Opened);

        for can_move in &turns {
            ctrl.handle_event(ConnectionEvent::Message(snapshot_json(&[], *can_move)));
            for (row, column) in &clicks {
                ctrl.click(*row, *column);
            }
        }

        let grants = turns.iter().filter(|granted| **granted).count();
        prop_assert!(outbox.count() <= grants);
    }
}
