//! Pool module - 7-bag piece sequence with lookahead
//!
//! Two bags are kept at all times: the `active` bag the cursor walks through and
//! an already shuffled `preview` bag. When the cursor runs off the end of the
//! active bag, the preview bag takes its place and a fresh preview is shuffled.
//! Every 7 pieces drawn from a bag boundary are therefore a permutation of all
//! seven kinds, and at least 7 upcoming pieces are always known.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::ShapeKind;

const BAG_SIZE: usize = 7;

/// Longest possible lookahead: 6 left in the active bag plus a full preview bag
pub const MAX_PREVIEW: usize = 2 * BAG_SIZE - 1;

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct ShapePool {
    active: [ShapeKind; BAG_SIZE],
    preview: [ShapeKind; BAG_SIZE],
    /// Index of the current piece inside `active`
    cursor: usize,
    rng: StdRng,
}

impl ShapePool {
    /// Create a pool with both bags shuffled from `seed`
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create a pool seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut pool = Self {
            active: ShapeKind::ALL,
            preview: ShapeKind::ALL,
            cursor: 0,
            rng,
        };
        pool.reshuffle();
        pool
    }

    fn shuffled_bag(&mut self) -> [ShapeKind; BAG_SIZE] {
        let mut bag = ShapeKind::ALL;
        bag.shuffle(&mut self.rng);
        bag
    }

    /// Randomize both bags independently and rewind the cursor
    pub fn reshuffle(&mut self) {
        self.active = self.shuffled_bag();
        self.preview = self.shuffled_bag();
        self.cursor = 0;
    }

    /// The piece under the cursor, without advancing
    pub fn current_shape(&self) -> ShapeKind {
        self.active[self.cursor]
    }

    /// Advance to the next piece and return it
    pub fn next_shape(&mut self) -> ShapeKind {
        self.cursor += 1;
        if self.cursor >= BAG_SIZE {
            self.active = self.preview;
            self.preview = self.shuffled_bag();
            self.cursor = 0;
        }
        self.current_shape()
    }

    /// Upcoming pieces in draw order: the rest of the active bag, then the
    /// whole preview bag. Always 7 to 13 entries.
    ///
    /// This is stack-only and does not allocate.
    pub fn get_preview_shapes_array(&self) -> ArrayVec<ShapeKind, MAX_PREVIEW> {
        let mut out = ArrayVec::new();
        out.extend(self.active[self.cursor + 1..].iter().copied());
        out.extend(self.preview.iter().copied());
        out
    }
}

impl Default for ShapePool {
    fn default() -> Self {
        Self::from_entropy()
    }
}
