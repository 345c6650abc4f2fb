//! Board tests - grid access, legality, shadows, T-spins and row clears

use bagtris::core::{Block, Board, RotationResult, Shape, TSpin};
use bagtris::types::{Color, RotateDirection, Rotation, ShapeKind, Vec2, BOARD_COLUMNS, BOARD_ROWS};

fn bottom_board(rows: &[&str]) -> Board {
    let mut all = vec![""; BOARD_ROWS - rows.len()];
    all.extend_from_slice(rows);
    Board::from_ascii(&all)
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.columns(), BOARD_COLUMNS);
    assert_eq!(board.rows(), BOARD_ROWS);

    for y in 0..BOARD_ROWS as i32 {
        for x in 0..BOARD_COLUMNS as i32 {
            let p = Vec2::new(x, y);
            assert!(board.is_valid_spot(p), "Cell ({}, {}) should be valid", x, y);
            assert_eq!(board.get(p), Some(Block::EMPTY));
        }
    }
}

#[test]
fn test_board_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(Vec2::new(-1, 0)), None);
    assert_eq!(board.get(Vec2::new(0, -1)), None);
    assert_eq!(board.get(Vec2::new(BOARD_COLUMNS as i32, 0)), None);
    assert_eq!(board.get(Vec2::new(0, BOARD_ROWS as i32)), None);

    assert!(!board.is_valid_spot(Vec2::new(-1, 5)));
    assert!(!board.is_valid_spot(Vec2::new(10, 5)));
    assert!(!board.is_valid_spot(Vec2::new(5, -1)));
    assert!(!board.is_valid_spot(Vec2::new(5, 22)));
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();
    let red = Block::filled(Color::new(255, 0, 0));

    assert!(board.set(Vec2::new(5, 10), red));
    assert_eq!(board.get(Vec2::new(5, 10)), Some(red));
    assert!(!board.is_valid_spot(Vec2::new(5, 10)));

    assert!(board.set(Vec2::new(5, 10), Block::EMPTY));
    assert!(board.is_valid_spot(Vec2::new(5, 10)));

    assert!(!board.set(Vec2::new(10, 0), red));
}

#[test]
fn test_is_valid_move_does_not_mutate() {
    let board = Board::new();
    let shape = Shape::new(ShapeKind::L);
    assert!(board.is_valid_move(&shape, Vec2::DOWN));
    assert!(!board.is_valid_move(&shape, Vec2::new(0, -1)));
    assert_eq!(shape.pos(), Vec2::new(3, 0));
}

#[test]
fn test_try_move_commits_only_when_valid() {
    let board = bottom_board(&["##########"]);
    let mut o = Shape::new(ShapeKind::O).at(Vec2::new(0, 19));
    assert!(!board.try_move(&mut o, Vec2::DOWN));
    assert_eq!(o.pos(), Vec2::new(0, 19));
    assert!(board.try_move(&mut o, Vec2::RIGHT));
    assert_eq!(o.pos(), Vec2::new(1, 19));
}

#[test]
fn test_shadow_lands_on_stack() {
    let board = bottom_board(&["....#.....", "##########"]);
    let t = Shape::new(ShapeKind::T);
    let shadow = board.get_shadow(&t);

    assert_eq!(shadow.pos().x, t.pos().x);
    assert_eq!(shadow.rotation(), t.rotation());
    // T's bottom row is box row 1; the column 4 block at y=20 stops it at y=18.
    assert_eq!(shadow.pos().y, 18);
    assert!(board.is_valid_shape(&shadow));
    assert!(!board.is_valid_move(&shadow, Vec2::DOWN));
}

#[test]
fn test_rotation_in_open_space_is_regular() {
    let board = Board::new();
    let mut t = Shape::new(ShapeKind::T).at(Vec2::new(3, 8));
    assert_eq!(board.rotate_shape(&mut t, RotateDirection::Right), RotationResult::Regular);
    assert_eq!(t.rotation(), Rotation::East);
    assert_eq!(t.pos(), Vec2::new(3, 8));
}

#[test]
fn test_i_kicks_off_right_wall() {
    // Vertical I hugging the right wall cannot turn flat in place.
    let board = Board::new();
    let mut i = Shape::new(ShapeKind::I)
        .with_rotation(Rotation::East)
        .at(Vec2::new(7, 8));
    assert!(board.is_valid_shape(&i));

    let result = board.rotate_shape(&mut i, RotateDirection::Right);
    assert_eq!(result, RotationResult::Wallkick);
    assert_eq!(i.rotation(), Rotation::South);
    assert!(board.is_valid_shape(&i));
}

#[test]
fn test_tspin_regular_after_plain_rotation() {
    let board = bottom_board(&["...#......", "###...####", "####.#####"]);
    let mut t = Shape::new(ShapeKind::T)
        .with_rotation(Rotation::East)
        .at(Vec2::new(3, 19));

    let result = board.rotate_shape(&mut t, RotateDirection::Right);
    assert_eq!(result, RotationResult::Regular);
    assert_eq!(board.check_for_tspin(&t, result), TSpin::Regular);
}

#[test]
fn test_tspin_mini_when_kicked() {
    let board = bottom_board(&["...#......", "###...####", "####.#####"]);
    let t = Shape::new(ShapeKind::T)
        .with_rotation(Rotation::South)
        .at(Vec2::new(3, 19));
    assert_eq!(board.check_for_tspin(&t, RotationResult::Wallkick), TSpin::Mini);
}

#[test]
fn test_same_slot_by_translation_is_not_tspin() {
    let board = bottom_board(&["...#......", "###...####", "####.#####"]);
    let t = Shape::new(ShapeKind::T)
        .with_rotation(Rotation::South)
        .at(Vec2::new(3, 19));
    assert_eq!(board.check_for_tspin(&t, RotationResult::None), TSpin::None);
}

#[test]
fn test_tspin_needs_three_corners() {
    // Only the two floor corners are blocked.
    let board = bottom_board(&["###...####", "####.#####"]);
    let t = Shape::new(ShapeKind::T)
        .with_rotation(Rotation::South)
        .at(Vec2::new(3, 19));
    assert_eq!(board.check_for_tspin(&t, RotationResult::Regular), TSpin::None);
}

#[test]
fn test_non_t_never_tspins() {
    let board = bottom_board(&["##########", "##########", "##########"]);
    let s = Shape::new(ShapeKind::S).at(Vec2::new(3, 17));
    assert_eq!(board.check_for_tspin(&s, RotationResult::Regular), TSpin::None);
}

#[test]
fn test_place_shape_skips_out_of_bounds_cells() {
    let mut board = Board::new();
    let i = Shape::new(ShapeKind::I).at(Vec2::new(8, 0));
    board.place_shape(&i);
    let filled = board.cells().iter().filter(|b| b.active).count();
    assert_eq!(filled, 2);
}

#[test]
fn test_remove_full_rows_compacts_split_clear() {
    let mut rows = vec![".........."; 14];
    rows.extend([
        "#.........",
        ".#........",
        "..#.......",
        "...#......",
        "##########",
        "....#.....",
        ".....#....",
        "##########",
    ]);
    let mut board = Board::from_ascii(&rows);

    assert_eq!(board.remove_full_rows(), 2);

    let mut expected = vec![".........."; 16];
    expected.extend([
        "#.........",
        ".#........",
        "..#.......",
        "...#......",
        "....#.....",
        ".....#....",
    ]);
    assert_eq!(board.to_ascii(), expected);
}

#[test]
fn test_remove_full_rows_compacts_three_separated_clears() {
    let mut rows = vec![".........."; 16];
    rows.extend([
        "#.........",
        "##########",
        ".#........",
        "##########",
        "..#.......",
        "##########",
    ]);
    let mut board = Board::from_ascii(&rows);

    assert_eq!(board.remove_full_rows(), 3);

    let text = board.to_ascii();
    assert_eq!(&text[19..], ["#.........", ".#........", "..#......."]);
    assert!(text[..19].iter().all(|row| row == ".........."));
    assert_eq!(board.cells().iter().filter(|b| b.active).count(), 3);
}

#[test]
fn test_remove_full_rows_tetris() {
    let mut board = bottom_board(&[
        "#.........",
        "##########",
        "##########",
        "##########",
        "##########",
    ]);
    assert_eq!(board.remove_full_rows(), 4);
    let text = board.to_ascii();
    assert_eq!(text[21], "#.........");
    assert_eq!(board.cells().iter().filter(|b| b.active).count(), 1);
}

#[test]
fn test_remove_full_rows_without_full_rows_is_noop() {
    let board = bottom_board(&["#########.", ".########.", "#.#.#.#.#."]);
    let mut after = board.clone();
    assert_eq!(after.remove_full_rows(), 0);
    assert_eq!(after, board);
}

#[test]
#[should_panic]
fn test_five_full_rows_is_an_invariant_violation() {
    let mut board = bottom_board(&["##########"; 5]);
    board.remove_full_rows();
}
