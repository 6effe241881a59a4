// SPDX-License-Identifier: MIT OR Apache-2.0

use goban_core::{board::Board, rules, BoardSize, Color, Coord, GameError};

fn nine() -> Board {
    Board::new(BoardSize::square(9).unwrap())
}

#[test]
fn capture_removes_surrounded_group() {
    let mut board = nine();

    // Two white stones with black on every side but one
    board.place(Coord::new(3, 3), Color::White);
    board.place(Coord::new(4, 3), Color::White);
    board.place(Coord::new(2, 3), Color::Black);
    board.place(Coord::new(3, 2), Color::Black);
    board.place(Coord::new(4, 2), Color::Black);
    board.place(Coord::new(5, 3), Color::Black);
    board.place(Coord::new(4, 4), Color::Black);

    let captured = rules::apply_move(&mut board, Coord::new(3, 4), Color::Black).unwrap();

    assert_eq!(captured.len(), 2);
    assert_eq!(board.get(Coord::new(3, 3)), None);
    assert_eq!(board.get(Coord::new(4, 3)), None);
    assert_eq!(board.count_stones_for(Color::White), 0);
}

#[test]
fn self_capture() {
    let mut board = nine();
    board.place(Coord::new(1, 0), Color::White);
    board.place(Coord::new(0, 1), Color::White);

    let before = board.clone();
    assert_eq!(
        rules::apply_move(&mut board, Coord::new(0, 0), Color::Black),
        Err(GameError::SelfCapture)
    );
    assert_eq!(board, before, "board must be untouched on error");

    // The owner of the surrounding wall can fill its own eye
    assert!(rules::apply_move(&mut board, Coord::new(0, 0), Color::White).is_ok());
}

#[test]
fn capturing_move_into_no_liberties_is_legal() {
    let mut board = nine();
    // White stone in the corner, black already on one side
    board.place(Coord::new(0, 0), Color::White);
    board.place(Coord::new(1, 0), Color::Black);
    board.place(Coord::new(1, 1), Color::White);
    board.place(Coord::new(0, 2), Color::White);

    let captured = rules::apply_move(&mut board, Coord::new(0, 1), Color::Black).unwrap();
    assert_eq!(captured, vec![Coord::new(0, 0)]);
}

#[test]
fn occupied_and_out_of_bounds() {
    let mut board = Board::new(BoardSize::new(5, 3).unwrap());
    board.place(Coord::new(2, 2), Color::Black);

    assert_eq!(
        rules::apply_move(&mut board, Coord::new(2, 2), Color::White),
        Err(GameError::OccupiedPosition)
    );
    assert_eq!(
        rules::apply_move(&mut board, Coord::new(2, 3), Color::White),
        Err(GameError::InvalidCoordinate)
    );
    assert_eq!(board.adjacent_coords(Coord::new(4, 2)).len(), 2);
}

#[test]
fn group_touching_on_two_sides_is_captured_once() {
    let mut board = Board::new(BoardSize::square(3).unwrap());
    // White bends around the corner and touches (1, 1) from the left and above
    board.place(Coord::new(0, 1), Color::White);
    board.place(Coord::new(0, 2), Color::White);
    board.place(Coord::new(1, 2), Color::White);
    board.place(Coord::new(0, 0), Color::Black);
    board.place(Coord::new(2, 2), Color::Black);

    let mut captured = rules::apply_move(&mut board, Coord::new(1, 1), Color::Black).unwrap();
    captured.sort();
    assert_eq!(
        captured,
        vec![Coord::new(0, 1), Coord::new(0, 2), Coord::new(1, 2)]
    );
    assert_eq!(board.count_stones_for(Color::White), 0);
}
