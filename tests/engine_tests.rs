use std::sync::atomic::AtomicBool;
use std::time::Duration;

use bitbit_core::board::{find_best_move, search, Board, SearchConfig, SearchState};

#[test]
fn depth_limited_search_returns_move() {
    let mut board = Board::new();
    let mut state = SearchState::new(1);
    let stop = AtomicBool::new(false);

    let mv = find_best_move(&mut board, &mut state, 1, &stop);
    assert!(mv.is_some());
}

#[test]
fn time_limited_search_returns_move_within_time() {
    let mut board = Board::new();
    let mut state = SearchState::new(1);
    let stop = AtomicBool::new(false);

    let config = SearchConfig::time(Duration::from_millis(50).as_millis() as u64);
    let started = std::time::Instant::now();
    let result = search(&mut board, &mut state, config, &stop);
    assert!(result.best_move.is_some());
    assert!(started.elapsed() < Duration::from_secs(5));
}
