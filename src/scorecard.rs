//! Scorecard for the current run
//!
//! One entry per hole, kept in hole order. In memory only.

use serde::{Deserialize, Serialize};

use crate::sim::ScoreSink;

/// A single hole result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleScore {
    pub hole_index: u32,
    pub strokes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Scorecard {
    pub entries: Vec<HoleScore>,
}

impl Scorecard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a hole result, replacing any earlier result for that hole
    pub fn record(&mut self, hole_index: u32, strokes: u32) {
        let entry = HoleScore {
            hole_index,
            strokes,
        };
        match self
            .entries
            .binary_search_by_key(&hole_index, |e| e.hole_index)
        {
            Ok(i) => self.entries[i] = entry,
            Err(i) => self.entries.insert(i, entry),
        }
    }

    pub fn strokes_for(&self, hole_index: u32) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.hole_index == hole_index)
            .map(|e| e.strokes)
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.strokes).sum()
    }

    pub fn holes_played(&self) -> usize {
        self.entries.len()
    }

    /// Hole with the fewest strokes (earliest on ties)
    pub fn best_hole(&self) -> Option<HoleScore> {
        self.entries.iter().copied().min_by_key(|e| e.strokes)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl ScoreSink for Scorecard {
    fn record_score(&mut self, hole_index: u32, strokes: u32) {
        self.record(hole_index, strokes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_stay_in_hole_order() {
        let mut card = Scorecard::new();
        card.record(2, 4);
        card.record(0, 3);
        card.record(1, 8);

        let holes: Vec<u32> = card.entries.iter().map(|e| e.hole_index).collect();
        assert_eq!(holes, vec![0, 1, 2]);
        assert_eq!(card.total(), 15);
        assert_eq!(card.best_hole().map(|e| e.hole_index), Some(0));
    }

    #[test]
    fn test_rerecord_replaces() {
        let mut card = Scorecard::new();
        card.record_score(0, 5);
        card.record_score(0, 2);
        assert_eq!(card.holes_played(), 1);
        assert_eq!(card.strokes_for(0), Some(2));
        assert_eq!(card.strokes_for(1), None);
    }

    #[test]
    fn test_json_summary() {
        let mut card = Scorecard::new();
        card.record(0, 3);
        let json = card.to_json().unwrap();
        let back: Scorecard = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries, card.entries);
    }
}
