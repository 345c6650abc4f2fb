//! Game session tests through the public API

use std::time::Duration;

use bagtris::core::{GameConfig, GameState};
use bagtris::types::{Command, Vec2};

const FRAME: Duration = Duration::from_millis(16);
const PAST_LOCK: Duration = Duration::from_millis(501);

fn filled_cells(game: &GameState) -> usize {
    game.board().cells().iter().filter(|b| b.active).count()
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        vec![Command::MoveLeft, Command::RotateRight],
        vec![Command::HardDrop],
        vec![],
        vec![Command::Hold, Command::MoveRight, Command::MoveRight],
        vec![Command::HardDrop],
        vec![],
    ];

    let play = || {
        let mut game = GameState::with_seed(2, 99);
        for frame in &script {
            game.update(FRAME, frame);
            game.update(PAST_LOCK, &[]);
        }
        game.snapshot()
    };

    assert_eq!(play(), play());
}

#[test]
fn test_hard_drop_then_lock_delay() {
    let mut game = GameState::with_seed(1, 3);
    game.update(FRAME, &[Command::HardDrop]);
    assert!(game.is_grounded());
    assert_eq!(game.current(), game.shadow());
    assert_eq!(filled_cells(&game), 0);

    game.update(PAST_LOCK, &[]);
    assert_eq!(filled_cells(&game), 4);
    let event = game.take_last_event().expect("lock event");
    assert_eq!(event.rows, 0);
    assert_eq!(event.points, 0);
    assert!(game.take_last_event().is_none());
}

#[test]
fn test_spawned_piece_follows_preview() {
    let mut game = GameState::with_seed(1, 3);
    let upcoming = game.preview();
    game.update(FRAME, &[Command::HardDrop]);
    game.update(PAST_LOCK, &[]);
    assert_eq!(game.current().kind(), upcoming[0]);
    assert_eq!(game.current().pos(), Vec2::new(3, 0));
    assert!(!game.has_held());
}

#[test]
fn test_hold_once_per_piece() {
    let mut game = GameState::with_seed(1, 8);
    let first = game.current().kind();

    game.update(FRAME, &[Command::Hold, Command::Hold]);
    assert_eq!(game.hold_piece(), Some(first));
    assert!(game.has_held());
    assert!(!game.snapshot().can_hold);
}

#[test]
fn test_pause_stops_time_and_input() {
    let mut game = GameState::with_seed(1, 8);
    game.update(FRAME, &[Command::Pause]);
    let before = game.current();

    game.update(Duration::from_secs(30), &[Command::MoveLeft, Command::HardDrop]);
    assert!(game.paused());
    assert_eq!(game.current(), before);
    assert_eq!(game.elapsed(), Duration::ZERO);

    game.update(FRAME, &[Command::Pause]);
    assert!(!game.paused());
}

#[test]
fn test_program_commands_are_ignored_by_session() {
    let mut game = GameState::with_seed(1, 8);
    assert!(!game.apply_command(Command::Quit));
    assert!(!game.apply_command(Command::IncreaseWindowSize));
    assert!(!game.apply_command(Command::MouseClick(Vec2::new(1, 1))));
}

#[test]
fn test_stacking_in_one_column_ends_the_game() {
    let mut game = GameState::with_seed(1, 5);
    let mut locks = 0;
    while !game.game_over() {
        game.update(FRAME, &[Command::HardDrop]);
        game.update(PAST_LOCK, &[]);
        locks += 1;
        assert!(locks < 100, "game never ended");
    }
    assert_eq!(game.lines(), 0);
    assert!(game.snapshot().game_over);
    assert!(game.snapshot().current.is_none());
}

#[test]
fn test_reset_after_game_over() {
    let mut game = GameState::new(GameConfig::default().with_seed(5).with_starting_level(4));
    while !game.game_over() {
        game.update(FRAME, &[Command::HardDrop]);
        game.update(PAST_LOCK, &[]);
    }

    game.update(FRAME, &[Command::Reset]);
    assert!(!game.game_over());
    assert_eq!(game.level(), 4);
    assert_eq!(game.score(), 0);
    assert_eq!(filled_cells(&game), 0);
}

#[test]
fn test_higher_level_falls_faster() {
    let mut slow = GameState::with_seed(1, 1);
    let mut fast = GameState::with_seed(9, 1);
    for _ in 0..30 {
        slow.update(FRAME, &[]);
        fast.update(FRAME, &[]);
    }
    // 480ms: level 9 (100ms) has fallen, level 1 (900ms) has not.
    assert_eq!(slow.current().pos().y, 0);
    assert!(fast.current().pos().y >= 4);
}
