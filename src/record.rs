//! Best score persistence
//!
//! The record is a single integer stored as text. A missing or unreadable
//! record counts as 0.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;

/// Where the best score lives between runs
pub trait BestScoreStore {
    /// Stored best score, 0 when there is none
    fn load(&self) -> u64;
    fn save(&mut self, score: u64) -> anyhow::Result<()>;
}

/// Record kept in a text file
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BestScoreStore for FileRecordStore {
    fn load(&self) -> u64 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("No best score at {}: {e}", self.path.display());
                return 0;
            }
        };
        match text.lines().next().unwrap_or("").trim().parse::<u64>() {
            Ok(score) => {
                log::info!("Loaded best score {score}");
                score
            }
            Err(e) => {
                log::warn!("Malformed best score in {}: {e}", self.path.display());
                0
            }
        }
    }

    fn save(&mut self, score: u64) -> anyhow::Result<()> {
        fs::write(&self.path, score.to_string())
            .with_context(|| format!("writing best score to {}", self.path.display()))?;
        log::info!("Best score {score} saved");
        Ok(())
    }
}

/// In-memory record, for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    pub score: Option<u64>,
    pub saves: u32,
}

impl BestScoreStore for MemoryRecordStore {
    fn load(&self) -> u64 {
        self.score.unwrap_or(0)
    }

    fn save(&mut self, score: u64) -> anyhow::Result<()> {
        self.score = Some(score);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sky-strike-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_file_round_trip() {
        let path = temp_path("round-trip.txt");
        let mut store = FileRecordStore::new(&path);
        store.save(54321).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "54321");
        assert_eq!(FileRecordStore::new(&path).load(), 54321);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_zero() {
        let store = FileRecordStore::new(temp_path("missing.txt"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_malformed_file_is_zero() {
        let path = temp_path("malformed.txt");
        fs::write(&path, "not a number").unwrap();
        assert_eq!(FileRecordStore::new(&path).load(), 0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryRecordStore::default();
        assert_eq!(store.load(), 0);
        store.save(10).unwrap();
        assert_eq!(store.load(), 10);
        assert_eq!(store.saves, 1);
    }
}
