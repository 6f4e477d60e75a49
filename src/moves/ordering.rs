use std::cmp::{Ordering, Reverse};

use super::Move;

impl Move {
    /// Comparator putting higher scores first.
    ///
    /// Only the score takes part, so moves with equal scores compare equal
    /// even when they differ. `Move` deliberately has no `Ord`.
    #[inline]
    pub fn best_first(a: &Move, b: &Move) -> Ordering {
        b.score.cmp(&a.score)
    }

    /// Sort key for best-first ordering with `sort_by_key` and friends.
    #[inline]
    pub fn search_key(&self) -> Reverse<i32> {
        Reverse(self.score)
    }
}

/// Sort candidate moves best-first, keeping generation order among ties.
pub fn sort_best_first(moves: &mut [Move]) {
    moves.sort_by(Move::best_first);
}
