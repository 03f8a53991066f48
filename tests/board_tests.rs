use bitbit_core::board::Board;

struct TestPosition {
    name: &'static str,
    fen: &'static str,
    depths: &'static [(usize, u64)],
}

const TEST_POSITIONS: &[TestPosition] = &[
    TestPosition {
        name: "Initial Position",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        depths: &[(1, 20), (2, 400), (3, 8902), (4, 197281)],
    },
    TestPosition {
        name: "Kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depths: &[(1, 48), (2, 2039), (3, 97862)],
    },
    TestPosition {
        name: "Position 3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        depths: &[(1, 14), (2, 191), (3, 2812), (4, 43238)],
    },
];

#[test]
fn perft_positions() {
    for position in TEST_POSITIONS {
        let mut board = Board::from_fen(position.fen);
        for &(depth, expected) in position.depths {
            let nodes = board.perft(depth);
            assert_eq!(
                nodes, expected,
                "perft failed for {} at depth {}",
                position.name, depth
            );
        }
    }
}

#[test]
fn fifty_move_rule_triggers_draw() {
    let board = Board::from_fen("8/8/8/8/8/8/8/K6k w - - 100 1");
    assert!(board.is_draw());
}

#[test]
fn fresh_position_is_not_a_draw() {
    let board = Board::new();
    assert!(!board.is_draw());
}
