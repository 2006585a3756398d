//! Per-pass transposition table.

use rustc_hash::FxHashSet;

use crate::engine::RobotSet;

/// Bit offset of the remaining-depth field; robot keys use the low 36 bits.
const DEPTH_SHIFT: u32 = 40;

/// Positions already expanded in the current pass, keyed by remaining
/// depth and packed robot positions.
///
/// A position reached again with the same budget left is not expanded a
/// second time. Cleared between passes, since the remaining depth of a
/// position changes with the bound.
#[derive(Debug, Default)]
pub(super) struct TranspositionTable {
    seen: FxHashSet<u64>,
}

impl TranspositionTable {
    /// Forget every entry.
    pub(super) fn clear(&mut self) {
        self.seen.clear();
    }

    /// Record a visit. Returns false if the position was already recorded
    /// with the same remaining depth.
    #[inline]
    pub(super) fn insert(&mut self, remaining: u8, robots: &RobotSet) -> bool {
        self.seen.insert((u64::from(remaining) << DEPTH_SHIFT) | robots.key())
    }

    /// Entries recorded this pass.
    pub(super) fn len(&self) -> usize {
        self.seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keyed_by_depth() {
        let mut table = TranspositionTable::default();
        let robots = RobotSet::new([Some(3), Some(9), None, None]);
        assert!(table.insert(2, &robots));
        assert!(!table.insert(2, &robots));
        assert!(table.insert(3, &robots));
        assert_eq!(table.len(), 2);
        table.clear();
        assert!(table.insert(2, &robots));
    }
}
