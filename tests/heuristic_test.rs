//! Scenario tests for the computer's move choice.

use tictactoe_engine::{Board, HeuristicOpponent, Mark, Position, Reason};

fn board(rows: [&str; 3]) -> Board {
    let mut board = Board::new();
    let marks = rows.iter().flat_map(|row| row.chars());
    for (pos, c) in Position::ALL.into_iter().zip(marks) {
        match c {
            'X' => board.set(pos, Mark::Player),
            'O' => board.set(pos, Mark::Computer),
            _ => {}
        }
    }
    board
}

#[test]
fn test_two_in_a_row_wins_outright() {
    let board = board(["OO.", "XX.", "..."]);
    let choice = HeuristicOpponent::with_seed(0).choose(&board).unwrap();
    assert_eq!(choice.position.cell_id(), 3);
    assert_eq!(choice.reason, Reason::Win);
}

#[test]
fn test_player_two_in_a_row_is_blocked() {
    let board = board(["XX.", "O..", "..."]);
    let choice = HeuristicOpponent::with_seed(0).choose(&board).unwrap();
    assert_eq!(choice.position.cell_id(), 3);
    assert_eq!(choice.reason, Reason::Block);
}

#[test]
fn test_diagonal_threat_is_blocked() {
    let board = board(["X..", ".X.", "O.."]);
    let choice = HeuristicOpponent::with_seed(0).choose(&board).unwrap();
    assert_eq!(choice.position, Position::BottomRight);
    assert_eq!(choice.reason, Reason::Block);
}

#[test]
fn test_first_blocking_cell_in_order_wins_tie_break() {
    // Player threatens both 3 (row) and 7 (column); 3 comes first.
    let board = board(["XX.", "XO.", "..O"]);
    let choice = HeuristicOpponent::with_seed(0).choose(&board).unwrap();
    assert_eq!(choice.position, Position::TopRight);
}

#[test]
fn test_center_after_edge_opening() {
    let board = board([".X.", "...", "..."]);
    let choice = HeuristicOpponent::with_seed(0).choose(&board).unwrap();
    assert_eq!(choice.position, Position::Center);
    assert_eq!(choice.reason, Reason::Center);
}

#[test]
fn test_random_tier_only_picks_open_cells() {
    let board = board(["O..", ".X.", "..."]);
    for seed in 0..50 {
        let choice = HeuristicOpponent::with_seed(seed).choose(&board).unwrap();
        assert_eq!(choice.reason, Reason::Random);
        assert!(board.is_empty(choice.position));
    }
}
