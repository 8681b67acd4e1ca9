//! The persisted top-10 high-score table.
//!
//! On disk the board is one `name TAB score` pair per line, best first. A
//! missing file just means nobody has played yet; a malformed file is a
//! [`ScoreError`] the caller is expected to log and shrug off — a broken
//! score file must never take the game down.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const MAX_ENTRIES: usize = 10;
pub const MAX_NAME_LEN: usize = 7;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("malformed score file line {line}: {reason}")]
    Format { line: usize, reason: String },
    #[error("name longer than {MAX_NAME_LEN} characters")]
    NameTooLong,
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Collaborator that asks the player for a name when a score qualifies.
/// Returning `None` abandons the entry.
pub trait NamePrompt {
    fn read_name(&mut self) -> Option<String>;
}

// ── Scoreboard ────────────────────────────────────────────────────────────────

pub struct Scoreboard {
    entries: Vec<ScoreEntry>,
    path: PathBuf,
}

impl Scoreboard {
    /// An empty board that will save to `path`.
    pub fn new(path: PathBuf) -> Self {
        Scoreboard { entries: Vec::new(), path }
    }

    /// Load the board from `path`. A missing file is an empty board, not an
    /// error.
    pub fn load(path: &Path) -> Result<Self, ScoreError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Scoreboard::new(path.to_path_buf()));
            }
            Err(err) => return Err(err.into()),
        };

        let mut entries = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let lineno = index + 1;
            if entries.len() == MAX_ENTRIES {
                return Err(ScoreError::Format {
                    line: lineno,
                    reason: format!("more than {MAX_ENTRIES} entries"),
                });
            }
            let mut fields = line.split('\t');
            let (Some(name), Some(score), None) =
                (fields.next(), fields.next(), fields.next())
            else {
                return Err(ScoreError::Format {
                    line: lineno,
                    reason: "expected exactly `name TAB score`".to_string(),
                });
            };
            let score: u32 = score.parse().map_err(|_| ScoreError::Format {
                line: lineno,
                reason: format!("score `{score}` is not a non-negative integer"),
            })?;
            entries.push(ScoreEntry { name: name.to_string(), score });
        }
        Ok(Scoreboard { entries, path: path.to_path_buf() })
    }

    pub fn save(&self) -> Result<(), ScoreError> {
        let mut text = String::new();
        for entry in &self.entries {
            text.push_str(&entry.name);
            text.push('\t');
            text.push_str(&entry.score.to_string());
            text.push('\n');
        }
        fs::write(&self.path, text)?;
        Ok(())
    }

    /// True iff `score` would make the board: positive and either the board
    /// has room or it beats the current 10th entry.
    pub fn eligible(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        match self.entries.get(MAX_ENTRIES - 1) {
            None => true,
            Some(last) => score > last.score,
        }
    }

    /// Insert an entry, keeping descending order and at most [`MAX_ENTRIES`]
    /// rows; the lowest entry is evicted when the board is full. Ties rank
    /// below existing entries with the same score. A name longer than
    /// [`MAX_NAME_LEN`] characters is rejected so the caller can re-prompt —
    /// never truncated silently.
    pub fn add(&mut self, name: &str, score: u32) -> Result<(), ScoreError> {
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ScoreError::NameTooLong);
        }
        let position = self
            .entries
            .iter()
            .position(|entry| score > entry.score)
            .unwrap_or(self.entries.len());
        if position >= MAX_ENTRIES {
            return Ok(());
        }
        self.entries.insert(
            position,
            ScoreEntry { name: name.to_string(), score },
        );
        self.entries.truncate(MAX_ENTRIES);
        Ok(())
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
