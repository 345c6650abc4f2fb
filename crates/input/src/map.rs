//! Key and mouse mapping from terminal events to commands.

use crate::types::{Command, Vec2};
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode, MouseButton, MouseEvent, MouseEventKind,
};

/// Map keyboard input to a command.
///
/// `Down` maps to [`Command::SoftDropOn`]; the matching release is produced by
/// [`InputHandler`](crate::InputHandler), which also owns auto-repeat.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Command::SoftDropOn)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('x')
        | KeyCode::Char('X')
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Command::RotateRight),
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => Some(Command::RotateLeft),

        // Actions
        KeyCode::Char(' ') => Some(Command::HardDrop),
        KeyCode::Char('c')
        | KeyCode::Char('C')
        | KeyCode::Modifier(ModifierKeyCode::LeftShift)
        | KeyCode::Modifier(ModifierKeyCode::RightShift) => Some(Command::Hold),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(Command::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(Command::Reset),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),

        // Window
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::IncreaseWindowSize),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Command::DecreaseWindowSize),

        _ => None,
    }
}

/// Map a mouse event to a command. Only left-button presses count.
pub fn map_mouse(event: MouseEvent) -> Option<Command> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Command::MouseClick(Vec2::new(
            event.column as i32,
            event.row as i32,
        ))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), Some(Command::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Right)), Some(Command::MoveRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Down)), Some(Command::SoftDropOn));

        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('H'))), Some(Command::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('d'))), Some(Command::MoveRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('J'))), Some(Command::SoftDropOn));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), Some(Command::RotateRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('x'))), Some(Command::RotateRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('z'))), Some(Command::RotateLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('Y'))), Some(Command::RotateLeft));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), Some(Command::HardDrop));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('c'))), Some(Command::Hold));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Esc)), Some(Command::Pause));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), Some(Command::Reset));
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('+'))),
            Some(Command::IncreaseWindowSize)
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::F(5))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn test_left_click_maps_to_cell() {
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(map_mouse(click), Some(Command::MouseClick(Vec2::new(12, 7))));

        let right = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            ..click
        };
        assert_eq!(map_mouse(right), None);
    }
}
