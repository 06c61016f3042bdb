use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::config::DirectoryConfig;

#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub logs_dir: PathBuf,
    pub data_dir: PathBuf,
}

/// Creates the log and data directories and checks the data one accepts writes.
pub fn ensure_directories(cfg: &DirectoryConfig) -> Result<ResolvedPaths> {
    let paths = ResolvedPaths {
        logs_dir: create(&cfg.logs_dir)?,
        data_dir: create(&cfg.data_dir)?,
    };

    let probe = paths.data_dir.join(".write-test");
    fs::write(&probe, b"ok")
        .with_context(|| format!("data directory {} is not writable", paths.data_dir.display()))?;
    fs::remove_file(&probe)?;
    Ok(paths)
}

fn create(path: &str) -> Result<PathBuf> {
    let dir = PathBuf::from(path);
    fs::create_dir_all(&dir).with_context(|| format!("failed to create directory {path}"))?;
    Ok(dir.canonicalize().unwrap_or(dir))
}
