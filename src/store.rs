use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::domain::OutputRecord;

/// One JSON file per region under the data directory.
#[derive(Debug, Clone)]
pub struct ScheduleStore {
    data_dir: PathBuf,
}

impl ScheduleStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn path_for(&self, region_id: &str) -> PathBuf {
        self.data_dir.join(format!("{region_id}.json"))
    }

    /// Replaces the region's file with `record`, pretty-printed.
    pub fn write(&self, record: &OutputRecord) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_dir).with_context(|| {
            format!("failed to create directory {}", self.data_dir.display())
        })?;

        let path = self.path_for(&record.region_id);
        let json = serde_json::to_string_pretty(record)?;

        let mut tmp = NamedTempFile::new_in(&self.data_dir)
            .with_context(|| format!("failed to create temp file in {}", self.data_dir.display()))?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;

        tracing::debug!(target: "store", path = %path.display(), bytes = json.len(), "record written");
        Ok(path)
    }

    /// Reads the last record written for a region, if any.
    pub fn read(&self, region_id: &str) -> Result<Option<OutputRecord>> {
        let path = self.path_for(region_id);
        read_record(&path)
    }
}

fn read_record(path: &Path) -> Result<Option<OutputRecord>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let record = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(record))
}
