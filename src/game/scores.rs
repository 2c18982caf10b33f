// Score ledger keyed by player id

use std::collections::BTreeMap;

use super::world::PlayerId;

/// Per-player pickup counts. Entries exist exactly while the player is in the world.
#[derive(Debug, Clone, Default)]
pub struct ScoreLedger {
    scores: BTreeMap<PlayerId, u32>,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an entry at zero (re-inserting an existing id zeroes it)
    pub fn insert(&mut self, id: PlayerId) {
        self.scores.insert(id, 0);
    }

    pub fn remove(&mut self, id: PlayerId) -> Option<u32> {
        self.scores.remove(&id)
    }

    /// Credit `points` to `id`; ignored for unknown ids
    pub fn award(&mut self, id: PlayerId, points: u32) {
        if let Some(score) = self.scores.get_mut(&id) {
            *score = score.saturating_add(points);
        }
    }

    pub fn get(&self, id: PlayerId) -> Option<u32> {
        self.scores.get(&id).copied()
    }

    pub fn reset_all(&mut self) {
        for score in self.scores.values_mut() {
            *score = 0;
        }
    }

    /// Drop every entry whose id fails `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(PlayerId) -> bool) {
        self.scores.retain(|id, _| keep(*id));
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_and_remove() {
        let mut ledger = ScoreLedger::new();
        let a = PlayerId(1);
        let b = PlayerId(2);
        ledger.insert(a);
        ledger.insert(b);

        ledger.award(a, 1);
        ledger.award(a, 1);

        assert_eq!(ledger.get(a), Some(2));
        assert_eq!(ledger.get(b), Some(0));

        assert_eq!(ledger.remove(a), Some(2));
        assert_eq!(ledger.get(a), None);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_award_unknown_player_is_ignored() {
        let mut ledger = ScoreLedger::new();
        ledger.award(PlayerId(9), 3);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_reset_all_keeps_entries() {
        let mut ledger = ScoreLedger::new();
        ledger.insert(PlayerId(1));
        ledger.award(PlayerId(1), 4);
        ledger.reset_all();
        assert_eq!(ledger.get(PlayerId(1)), Some(0));
    }
}
