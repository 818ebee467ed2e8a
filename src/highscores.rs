//! High score leaderboard system
//!
//! Persisted as plain text, one `name,points` record per line, top 10 only.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub points: i64,
}

impl ScoreRecord {
    pub fn new(name: impl Into<String>, points: i64) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

/// Merge a finished run into the leaderboard
///
/// Qualifies when the board has room, or when `points` beats at least one
/// entry. A qualifying run is appended and the board re-sorted descending;
/// the sort is stable, so equal scores keep their earlier order and the
/// newcomer ranks below them. Non-qualifying runs return the board unchanged.
pub fn prepare_ratings(
    records: Vec<ScoreRecord>,
    name: &str,
    points: i64,
) -> (Vec<ScoreRecord>, bool) {
    let qualifies =
        records.len() < MAX_HIGH_SCORES || records.iter().any(|r| points > r.points);
    if !qualifies {
        return (records, false);
    }

    let mut records = records;
    records.push(ScoreRecord::new(name, points));
    records.sort_by(|a, b| b.points.cmp(&a.points));
    records.truncate(MAX_HIGH_SCORES);
    (records, true)
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScoreTable {
    pub entries: Vec<ScoreRecord>,
}

impl ScoreTable {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, points: i64) -> bool {
        self.entries.len() < MAX_HIGH_SCORES || self.entries.iter().any(|e| points > e.points)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, points: i64) -> Option<usize> {
        if !self.qualifies(points) {
            return None;
        }
        let rank = self.entries.iter().position(|e| points > e.points);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &str, points: i64) -> Option<usize> {
        let rank = self.potential_rank(points)?;
        let (entries, _) = prepare_ratings(std::mem::take(&mut self.entries), name, points);
        self.entries = entries;
        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.points)
    }

    /// Parse the `name,points` line format
    ///
    /// Any malformed line fails the whole file.
    pub fn parse(text: &str) -> Result<Self, ScoreError> {
        let mut entries = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;
            let fields: Vec<&str> = line.split(',').collect();
            let [name, points] = fields.as_slice() else {
                return Err(ScoreError::FieldCount {
                    line: line_no,
                    content: line.to_string(),
                });
            };
            let points = points
                .parse::<i64>()
                .map_err(|source| ScoreError::InvalidPoints {
                    line: line_no,
                    value: points.to_string(),
                    source,
                })?;
            entries.push(ScoreRecord::new(*name, points));
        }
        Ok(Self { entries })
    }

    /// Render the `name,points` line format
    pub fn to_text(&self) -> Result<String, ScoreError> {
        let mut text = String::new();
        for entry in &self.entries {
            if entry.name.contains([',', '\n', '\r']) {
                return Err(ScoreError::InvalidName(entry.name.clone()));
            }
            text.push_str(&format!("{},{}\n", entry.name, entry.points));
        }
        Ok(text)
    }

    /// Load high scores; a missing file is an empty board
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScoreError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => {
                let scores = Self::parse(&text)?;
                log::info!("Loaded {} high scores", scores.entries.len());
                Ok(scores)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No high scores at {}, starting fresh", path.display());
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Save high scores
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ScoreError> {
        fs::write(path, self.to_text()?)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(pairs: &[(&str, i64)]) -> Vec<ScoreRecord> {
        pairs.iter().map(|&(n, p)| ScoreRecord::new(n, p)).collect()
    }

    #[test]
    fn test_prepare_ratings_inserts_in_order() {
        let existing = records(&[("A", 50), ("B", 80), ("C", 30)]);
        let (merged, qualifies) = prepare_ratings(existing, "D", 60);
        assert!(qualifies);
        assert_eq!(merged, records(&[("B", 80), ("D", 60), ("A", 50), ("C", 30)]));
    }

    #[test]
    fn test_prepare_ratings_empty_board() {
        let (merged, qualifies) = prepare_ratings(Vec::new(), "solo", 0);
        assert!(qualifies);
        assert_eq!(merged, records(&[("solo", 0)]));
    }

    #[test]
    fn test_prepare_ratings_full_board_rejects_low_score() {
        let existing: Vec<_> = (0..10)
            .map(|i| ScoreRecord::new(format!("p{i}"), 100 + i))
            .collect();
        let (merged, qualifies) = prepare_ratings(existing.clone(), "low", 5);
        assert!(!qualifies);
        assert_eq!(merged, existing);
    }

    #[test]
    fn test_prepare_ratings_full_board_truncates() {
        let existing: Vec<_> = (0..10)
            .rev()
            .map(|i| ScoreRecord::new(format!("p{i}"), 100 + i * 10))
            .collect();
        let (merged, qualifies) = prepare_ratings(existing, "top", 1000);
        assert!(qualifies);
        assert_eq!(merged.len(), MAX_HIGH_SCORES);
        assert_eq!(merged[0], ScoreRecord::new("top", 1000));
        // Lowest entry (p0, 100) fell off
        assert!(merged.iter().all(|r| r.name != "p0"));
    }

    #[test]
    fn test_prepare_ratings_ties_keep_insertion_order() {
        let existing = records(&[("first", 40), ("second", 40)]);
        let (merged, _) = prepare_ratings(existing, "third", 40);
        let names: Vec<_> = merged.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_full_board_equal_score_does_not_qualify() {
        let table = ScoreTable {
            entries: (0..10).map(|i| ScoreRecord::new(format!("p{i}"), 50)).collect(),
        };
        assert!(!table.qualifies(50));
        assert!(table.qualifies(51));
        assert_eq!(table.potential_rank(50), None);
        assert_eq!(table.potential_rank(51), Some(1));
    }

    #[test]
    fn test_add_score_returns_rank() {
        let mut table = ScoreTable::new();
        assert_eq!(table.add_score("a", 10), Some(1));
        assert_eq!(table.add_score("b", 30), Some(1));
        assert_eq!(table.add_score("c", 20), Some(2));
        assert_eq!(table.add_score("d", 20), Some(3));
        assert_eq!(table.top_score(), Some(30));
        let names: Vec<_> = table.entries.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["b", "c", "d", "a"]);
    }

    #[test]
    fn test_parse_and_render() {
        let table = ScoreTable::parse("alice,120\nbob,-3\n").unwrap();
        assert_eq!(table.entries, records(&[("alice", 120), ("bob", -3)]));
        assert_eq!(table.to_text().unwrap(), "alice,120\nbob,-3\n");
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        let err = ScoreTable::parse("alice,1\nbob\n").unwrap_err();
        assert!(matches!(err, ScoreError::FieldCount { line: 2, .. }));

        let err = ScoreTable::parse("a,b,3\n").unwrap_err();
        assert!(matches!(err, ScoreError::FieldCount { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_non_integer_points() {
        let err = ScoreTable::parse("alice,12.5\n").unwrap_err();
        match err {
            ScoreError::InvalidPoints { line, value, .. } => {
                assert_eq!(line, 1);
                assert_eq!(value, "12.5");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_render_rejects_separator_in_name() {
        let table = ScoreTable {
            entries: records(&[("a,b", 1)]),
        };
        assert!(matches!(table.to_text(), Err(ScoreError::InvalidName(_))));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let path = std::env::temp_dir().join("lane_rush_missing_scores_for_test.txt");
        let _ = fs::remove_file(&path);
        let table = ScoreTable::load(&path).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "lane_rush_scores_{}.txt",
            std::process::id()
        ));
        let mut table = ScoreTable::new();
        table.add_score("ann", 42);
        table.add_score("ben", 7);
        table.save(&path).unwrap();

        let loaded = ScoreTable::load(&path).unwrap();
        assert_eq!(loaded, table);
        let _ = fs::remove_file(&path);
    }
}
