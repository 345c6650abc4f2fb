//! Program module - screens around the game session
//!
//! [`Program`] owns the optional [`GameState`], the in-memory high score and
//! the [`UiContext`]. Each frame it splits the incoming commands into the ones
//! it handles itself (window size, clicks) and the ones meant for the current
//! screen, then declares that screen's widgets.

use std::time::Duration;

use tracing::info;

use crate::config::GameConfig;
use crate::game_state::GameState;
use crate::snapshot::GameSnapshot;
use crate::types::{Command, Rect, Vec2, MAX_START_LEVEL};
use crate::ui::{Align, FontSize, UiContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Menu,
    Game,
}

/// What the frame loop has to act on after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    pub quit: bool,
    /// Net window size steps requested this frame
    pub window_scale: i32,
}

#[derive(Debug, Clone)]
pub struct Program {
    config: GameConfig,
    screen: Screen,
    session: Option<GameState>,
    starting_level: u32,
    high_score: u32,
    last_score: Option<u32>,
    ui: UiContext,
    /// Per-frame scratch buffers, kept to avoid allocating every frame
    forwarded: Vec<Command>,
    clicks: Vec<Vec2>,
}

impl Program {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            screen: Screen::Menu,
            session: None,
            starting_level: config.starting_level.clamp(1, MAX_START_LEVEL),
            high_score: 0,
            last_score: None,
            ui: UiContext::new(),
            forwarded: Vec::with_capacity(32),
            clicks: Vec::with_capacity(4),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&GameState> {
        self.session.as_ref()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }

    pub fn starting_level(&self) -> u32 {
        self.starting_level
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    /// Render state of the running session, if the game screen is up
    pub fn snapshot(&self) -> Option<GameSnapshot> {
        if self.screen != Screen::Game {
            return None;
        }
        let session = self.session.as_ref()?;
        let mut snap = session.snapshot();
        snap.high_score = self.high_score.max(session.score());
        Some(snap)
    }

    /// A session exists that was left through the menu and can continue
    pub fn can_resume(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.game_over())
    }

    /// Run one frame.
    pub fn update(&mut self, elapsed: Duration, commands: &[Command], viewport: Rect) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        let mut forwarded = std::mem::take(&mut self.forwarded);
        forwarded.clear();
        self.clicks.clear();

        for &command in commands {
            match command {
                Command::IncreaseWindowSize => outcome.window_scale += 1,
                Command::DecreaseWindowSize => outcome.window_scale -= 1,
                Command::MouseClick(pos) => self.clicks.push(pos),
                other => forwarded.push(other),
            }
        }

        self.ui.begin_frame(viewport, &self.clicks);
        match self.screen {
            Screen::Menu => self.update_menu(&forwarded, &mut outcome),
            Screen::Game => self.update_game(elapsed, &forwarded),
        }
        self.forwarded = forwarded;
        outcome
    }

    fn start_game(&mut self) {
        let config = self.config.with_starting_level(self.starting_level);
        self.session = Some(GameState::new(config));
        self.screen = Screen::Game;
        info!(level = self.starting_level, "entering game");
    }

    fn resume_game(&mut self) {
        if self.can_resume() {
            self.screen = Screen::Game;
            info!("resuming game");
        }
    }

    fn to_menu(&mut self) {
        if let Some(session) = &self.session {
            self.high_score = self.high_score.max(session.score());
        }
        self.screen = Screen::Menu;
        info!(high_score = self.high_score, "back to menu");
    }

    fn update_menu(&mut self, commands: &[Command], outcome: &mut FrameOutcome) {
        for &command in commands {
            match command {
                Command::Reset | Command::HardDrop => {
                    self.start_game();
                    return;
                }
                Command::Pause => {
                    if self.can_resume() {
                        self.resume_game();
                        return;
                    }
                }
                Command::MoveLeft => {
                    self.starting_level = self.starting_level.saturating_sub(1).max(1);
                }
                Command::MoveRight => {
                    self.starting_level = (self.starting_level + 1).min(MAX_START_LEVEL);
                }
                Command::Quit => {
                    outcome.quit = true;
                    return;
                }
                _ => {}
            }
        }

        let vp = self.ui.viewport();
        let cx = vp.x + vp.w / 2;
        let mut y = vp.y + vp.h / 4;

        self.ui.label("BAGTRIS", Vec2::new(cx, y), Align::Center, FontSize::Heading);
        y += 2;
        let high = format!("High score: {}", self.high_score);
        self.ui.label(&high, Vec2::new(cx, y), Align::Center, FontSize::Body);
        if let Some(last) = self.last_score {
            y += 1;
            let text = format!("Last score: {last}");
            self.ui.label(&text, Vec2::new(cx, y), Align::Center, FontSize::Body);
        }
        y += 2;
        self.starting_level = self.ui.spinbox(
            "Level",
            self.starting_level,
            1,
            MAX_START_LEVEL,
            Vec2::new(cx, y),
            Align::Center,
            FontSize::Body,
        );
        y += 2;
        let start = self.ui.button("Start", Vec2::new(cx, y), Align::Center, FontSize::Body);
        let mut resume = false;
        if self.can_resume() {
            y += 2;
            resume = self.ui.button("Resume", Vec2::new(cx, y), Align::Center, FontSize::Body);
        }
        y += 2;
        let quit = self.ui.button("Quit", Vec2::new(cx, y), Align::Center, FontSize::Body);

        if start {
            self.start_game();
        } else if resume {
            self.resume_game();
        } else if quit {
            outcome.quit = true;
        }
    }

    fn update_game(&mut self, elapsed: Duration, commands: &[Command]) {
        let Some(session) = self.session.as_mut() else {
            self.screen = Screen::Menu;
            return;
        };

        if let Some(at) = commands.iter().position(|&c| c == Command::Quit) {
            session.update(Duration::ZERO, &commands[..at]);
            self.to_menu();
            return;
        }
        session.update(elapsed, commands);

        if session.game_over() {
            let score = session.score();
            self.high_score = self.high_score.max(score);
            self.last_score = Some(score);
            self.session = None;
            self.screen = Screen::Menu;
            info!(score, high_score = self.high_score, "game finished");
            return;
        }

        if session.paused() {
            self.pause_menu();
        }
    }

    fn pause_menu(&mut self) {
        let vp = self.ui.viewport();
        let cx = vp.x + vp.w / 2;
        let y = vp.y + vp.h / 3;

        self.ui.label("PAUSED", Vec2::new(cx, y), Align::Center, FontSize::Heading);
        let resume = self.ui.button("Resume", Vec2::new(cx, y + 2), Align::Center, FontSize::Body);
        let restart = self.ui.button("Restart", Vec2::new(cx, y + 4), Align::Center, FontSize::Body);
        let menu = self.ui.button("Menu", Vec2::new(cx, y + 6), Align::Center, FontSize::Body);

        let Some(session) = self.session.as_mut() else {
            return;
        };
        if resume {
            session.apply_command(Command::Pause);
        } else if restart {
            session.apply_command(Command::Reset);
        } else if menu {
            self.to_menu();
        }
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::WidgetKind;

    const FRAME: Duration = Duration::from_millis(16);

    fn viewport() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    fn program() -> Program {
        Program::new(GameConfig::default().with_seed(42))
    }

    fn button_center(p: &Program, text: &str) -> Vec2 {
        let label = format!("[ {text} ]");
        let w = p
            .ui()
            .widgets()
            .iter()
            .find(|w| w.kind == WidgetKind::Button && w.text == label)
            .unwrap_or_else(|| panic!("no {text} button"));
        Vec2::new(w.rect.x + w.rect.w / 2, w.rect.y)
    }

    #[test]
    fn starts_in_menu() {
        let mut p = program();
        assert_eq!(p.screen(), Screen::Menu);
        p.update(FRAME, &[], viewport());
        assert!(p.ui().widgets().iter().any(|w| w.text == "B A G T R I S"));
        assert!(p.snapshot().is_none());
    }

    #[test]
    fn keyboard_adjusts_level_within_bounds() {
        let mut p = program();
        p.update(FRAME, &[Command::MoveLeft], viewport());
        assert_eq!(p.starting_level(), 1);
        for _ in 0..30 {
            p.update(FRAME, &[Command::MoveRight], viewport());
        }
        assert_eq!(p.starting_level(), MAX_START_LEVEL);
    }

    #[test]
    fn start_button_enters_game_at_chosen_level() {
        let mut p = program();
        p.update(FRAME, &[Command::MoveRight, Command::MoveRight], viewport());
        let start = button_center(&p, "Start");
        p.update(FRAME, &[Command::MouseClick(start)], viewport());
        assert_eq!(p.screen(), Screen::Game);
        assert_eq!(p.session().map(|s| s.level()), Some(3));
    }

    #[test]
    fn quit_in_game_returns_to_menu_and_allows_resume() {
        let mut p = program();
        p.update(FRAME, &[Command::Reset], viewport());
        assert_eq!(p.screen(), Screen::Game);

        p.update(FRAME, &[Command::Quit], viewport());
        assert_eq!(p.screen(), Screen::Menu);
        assert!(p.can_resume());
        p.update(FRAME, &[], viewport());
        assert!(p.ui().widgets().iter().any(|w| w.text == "[ Resume ]"));

        p.update(FRAME, &[Command::Pause], viewport());
        assert_eq!(p.screen(), Screen::Game);
    }

    #[test]
    fn quit_in_menu_exits() {
        let mut p = program();
        let out = p.update(FRAME, &[Command::Quit], viewport());
        assert!(out.quit);
    }

    #[test]
    fn window_commands_become_scale_delta() {
        let mut p = program();
        let out = p.update(
            FRAME,
            &[
                Command::IncreaseWindowSize,
                Command::IncreaseWindowSize,
                Command::DecreaseWindowSize,
            ],
            viewport(),
        );
        assert_eq!(out.window_scale, 1);
        assert!(!out.quit);
    }

    #[test]
    fn pause_menu_is_declared_while_paused() {
        let mut p = program();
        p.update(FRAME, &[Command::Reset], viewport());
        p.update(FRAME, &[Command::Pause], viewport());
        assert!(p.session().is_some_and(|s| s.paused()));
        let resume = button_center(&p, "Resume");

        p.update(FRAME, &[Command::MouseClick(resume)], viewport());
        assert!(p.session().is_some_and(|s| !s.paused()));
        p.update(FRAME, &[], viewport());
        assert!(p.ui().widgets().is_empty());
    }

    #[test]
    fn game_over_returns_to_menu_with_high_score() {
        let mut p = program();
        p.update(FRAME, &[Command::Reset], viewport());
        // Stack pieces at the spawn column until the game ends.
        for _ in 0..200 {
            if p.screen() == Screen::Menu {
                break;
            }
            p.update(FRAME, &[Command::HardDrop], viewport());
            p.update(Duration::from_millis(501), &[], viewport());
        }
        assert_eq!(p.screen(), Screen::Menu);
        assert!(p.session().is_none());
        assert!(p.last_score().is_some());
        assert!(!p.can_resume());
    }
}
