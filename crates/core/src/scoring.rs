//! Scoring module - clear categories, points, combos and back-to-back
//!
//! Rules in short:
//! - A lock is classified into a [`ClearKind`] from its row count and T-spin.
//! - Base points come from a fixed table and are multiplied by the level.
//! - Consecutive Tetrises, or consecutive T-spins, apply a 3/2 multiplier to the
//!   base points (before the combo bonus).
//! - Combo bonus is `50 * combo * level` once the combo counter is positive.
//! - Drop bonus is `2 * hard_rows + soft_rows`, paid only with a scoring clear.

use std::time::Duration;

use crate::board::TSpin;
use crate::types::{
    B2B_DENOMINATOR, B2B_NUMERATOR, COMBO_BASE, GRAVITY_BASE_MS, GRAVITY_STEP_MS, LINES_PER_LEVEL,
};

/// Category of a lock, combining cleared rows with T-spin presence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClearKind {
    #[default]
    None,
    Single,
    Double,
    Triple,
    Tetris,
    Tspin,
    TspinSingle,
    TspinDouble,
    TspinTriple,
    TspinMini,
    TspinMiniSingle,
    TspinMiniDouble,
}

impl ClearKind {
    /// Classify a lock.
    ///
    /// A mini T-spin that clears three rows counts as a full T-spin triple.
    ///
    /// # Panics
    ///
    /// Panics if `rows > 4`, or if a T-spin reports four rows.
    pub fn from_lines(rows: u32, tspin: TSpin) -> Self {
        assert!(rows <= 4, "{rows} rows cleared by one piece");
        match (tspin, rows) {
            (TSpin::None, 0) => ClearKind::None,
            (TSpin::None, 1) => ClearKind::Single,
            (TSpin::None, 2) => ClearKind::Double,
            (TSpin::None, 3) => ClearKind::Triple,
            (TSpin::None, _) => ClearKind::Tetris,
            (TSpin::Regular, 0) => ClearKind::Tspin,
            (TSpin::Regular, 1) => ClearKind::TspinSingle,
            (TSpin::Regular, 2) => ClearKind::TspinDouble,
            (TSpin::Mini, 0) => ClearKind::TspinMini,
            (TSpin::Mini, 1) => ClearKind::TspinMiniSingle,
            (TSpin::Mini, 2) => ClearKind::TspinMiniDouble,
            (TSpin::Regular | TSpin::Mini, 3) => ClearKind::TspinTriple,
            (_, _) => panic!("T-spin cannot clear {rows} rows"),
        }
    }

    pub fn is_tspin(&self) -> bool {
        matches!(
            self,
            ClearKind::Tspin
                | ClearKind::TspinSingle
                | ClearKind::TspinDouble
                | ClearKind::TspinTriple
                | ClearKind::TspinMini
                | ClearKind::TspinMiniSingle
                | ClearKind::TspinMiniDouble
        )
    }

    /// Points before level, back-to-back and combo are applied
    pub fn base_points(&self) -> u32 {
        match self {
            ClearKind::None => 0,
            ClearKind::Single => 100,
            ClearKind::Double => 300,
            ClearKind::Triple => 500,
            ClearKind::Tetris => 800,
            ClearKind::Tspin => 400,
            ClearKind::TspinSingle => 800,
            ClearKind::TspinDouble => 1200,
            ClearKind::TspinTriple => 1600,
            ClearKind::TspinMini => 100,
            ClearKind::TspinMiniSingle => 200,
            ClearKind::TspinMiniDouble => 1200,
        }
    }

    /// Streak this clear belongs to for back-to-back purposes
    pub fn streak(&self) -> BackToBack {
        if *self == ClearKind::Tetris {
            BackToBack::Tetris
        } else if self.is_tspin() {
            BackToBack::Tspin
        } else {
            BackToBack::None
        }
    }
}

/// Running back-to-back streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackToBack {
    #[default]
    None,
    Tetris,
    Tspin,
}

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Base points times level (includes the B2B multiplier, excludes combo bonus)
    pub line_clear_score: u32,
    /// Combo bonus added on top of `line_clear_score`
    pub combo_bonus: u32,
    pub total: u32,
    /// Whether a B2B multiplier was applied to this clear
    pub b2b_applied: bool,
    /// Streak after this clear
    pub streak: BackToBack,
}

/// Apply the B2B multiplier (3/2) to a point value.
pub fn apply_b2b_multiplier(points: u32) -> u32 {
    points
        .saturating_mul(B2B_NUMERATOR)
        .saturating_div(B2B_DENOMINATOR)
}

/// Combo bonus for the combo counter after it was updated.
///
/// `combo` semantics:
/// - `-1`: no combo chain
/// - `0`: first clear in chain (no bonus)
/// - `1+`: `50 * combo * level`
pub fn combo_bonus(combo: i32, level: u32) -> u32 {
    if combo <= 0 {
        return 0;
    }
    COMBO_BASE.saturating_mul(combo as u32).saturating_mul(level)
}

/// Drop bonus: 2 points per hard-dropped row, 1 per soft-dropped row
pub fn drop_bonus(hard_rows: u32, soft_rows: u32) -> u32 {
    hard_rows.saturating_mul(2).saturating_add(soft_rows)
}

/// Score a lock.
///
/// `streak` is the running back-to-back streak before this lock; `combo` is the
/// combo counter after this lock updated it.
pub fn calculate_score(clear: ClearKind, level: u32, combo: i32, streak: BackToBack) -> ScoreResult {
    let new_streak = clear.streak();
    let b2b_applied = new_streak != BackToBack::None && new_streak == streak;

    // Locks that are not a clear category leave the streak alone.
    let streak = if clear == ClearKind::None {
        streak
    } else {
        new_streak
    };

    let base = clear.base_points().saturating_mul(level);
    let line_clear_score = if b2b_applied {
        apply_b2b_multiplier(base)
    } else {
        base
    };
    let combo_bonus = combo_bonus(combo, level);

    ScoreResult {
        line_clear_score,
        combo_bonus,
        total: line_clear_score.saturating_add(combo_bonus),
        b2b_applied,
        streak,
    }
}

/// Level management: one level every 10 lines on top of the starting level
pub fn level_for(total_lines: u32, starting_level: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + starting_level
}

/// Gravity delay for a level: `max(0, 1.0 - 0.1 * level)` seconds
pub fn gravity_delay(level: u32) -> Duration {
    let ms = GRAVITY_BASE_MS.saturating_sub(level.saturating_mul(GRAVITY_STEP_MS));
    Duration::from_millis(ms as u64)
}
