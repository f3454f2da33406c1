// JSONL history store: one `<subject>.jsonl` file per subject, one result per line

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::HistorySource;
use crate::engine::GenerationResult;

pub struct JsonlHistory {
    dir: PathBuf,
}

impl JsonlHistory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `subject_id`; path separators and other unsafe characters become `_`
    pub fn path_for(&self, subject_id: &str) -> PathBuf {
        let safe: String = subject_id
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let safe = if safe.is_empty() || safe.chars().all(|c| c == '.') {
            "_".to_string()
        } else {
            safe
        };
        self.dir.join(format!("{}.jsonl", safe))
    }

    /// Append one result to its subject's file, creating the directory as needed
    pub fn append(&self, result: &GenerationResult) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create history directory {}", self.dir.display()))?;

        let path = self.path_for(&result.subject_id);
        let json = serde_json::to_string(result).context("Failed to serialize generation result")?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open history file {}", path.display()))?;
        writeln!(file, "{}", json).context("Failed to write history entry")?;

        debug!("Appended result {} to {}", result.id, path.display());
        Ok(path)
    }

    fn read_all(&self, subject_id: &str) -> Result<Vec<GenerationResult>> {
        let path = self.path_for(subject_id);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read history file {}", path.display()))?;

        let mut results = Vec::new();
        for (line_no, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<GenerationResult>(line) {
                Ok(result) => results.push(result),
                Err(e) => warn!(
                    "Skipping unparsable history line {} in {}: {}",
                    line_no + 1,
                    path.display(),
                    e
                ),
            }
        }
        Ok(results)
    }
}

#[async_trait]
impl HistorySource for JsonlHistory {
    async fn recent_results(&self, subject_id: &str, limit: usize) -> Result<Vec<GenerationResult>> {
        let mut results = self.read_all(subject_id)?;
        results.reverse();
        results.truncate(limit);
        Ok(results)
    }
}
