//! High score leaderboard
//!
//! One `score,name` line per saved game, appended in play order. Sorting is
//! done when the board is read back.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field separator in the score file
pub const SCORE_DELIMITER: char = ',';

/// Rows shown by `format_table`
pub const MAX_DISPLAYED: usize = 10;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// A single saved game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u32,
    pub name: String,
}

impl ScoreRecord {
    /// Line breaks in the name become spaces so a record stays on one line
    pub fn new(score: u32, name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            score,
            name: name.replace(['\r', '\n'], " "),
        }
    }

    pub fn to_line(&self) -> String {
        format!("{}{}{}", self.score, SCORE_DELIMITER, self.name)
    }

    /// Parse one file line (1-based `line` for error messages).
    ///
    /// The name is everything after the first delimiter, so names may
    /// contain commas.
    pub fn parse_line(line: usize, text: &str) -> Result<Self, ScoreError> {
        let text = text.trim_end_matches(['\r', '\n']);
        let (score, name) = text.split_once(SCORE_DELIMITER).ok_or_else(|| ScoreError::Malformed {
            line,
            reason: "missing delimiter".to_string(),
        })?;
        let score = score.trim().parse::<u32>().map_err(|e| ScoreError::Malformed {
            line,
            reason: format!("bad score {:?}: {}", score, e),
        })?;
        Ok(Self::new(score, name.trim()))
    }
}

/// Leaderboard, sorted by score descending (ties keep file order)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    entries: Vec<ScoreRecord>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn from_records(mut entries: Vec<ScoreRecord>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self { entries }
    }

    pub fn entries(&self) -> &[ScoreRecord] {
        &self.entries
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Rank a score would take (1-indexed, after existing equal scores)
    pub fn potential_rank(&self, score: u32) -> usize {
        self.entries.iter().take_while(|e| e.score >= score).count() + 1
    }

    /// Parse a whole score file body, skipping lines that don't parse
    pub fn parse(text: &str) -> Self {
        let records = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(i, line)| match ScoreRecord::parse_line(i + 1, line) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping score entry: {}", e);
                    None
                }
            })
            .collect();
        Self::from_records(records)
    }

    /// Load the board; a missing file is an empty board
    pub fn load(path: &Path) -> Result<Self, ScoreError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let scores = Self::parse(&text);
                log::info!("Loaded {} high scores", scores.entries.len());
                Ok(scores)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Append one record to the score file, creating it if needed
    pub fn append(path: &Path, record: &ScoreRecord) -> Result<(), ScoreError> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", record.to_line())?;
        log::info!("Score {} saved for {}", record.score, record.name);
        Ok(())
    }

    /// Text table of the best `MAX_DISPLAYED` scores
    pub fn format_table(&self) -> String {
        let mut out = format!("{:<16}{:<16}\n", "Scores", "Player Name");
        out.push_str(&"-".repeat(30));
        out.push('\n');
        for entry in self.entries.iter().take(MAX_DISPLAYED) {
            out.push_str(&format!("Score: {:<9}{:<16}\n", entry.score, entry.name));
        }
        out
    }
}
