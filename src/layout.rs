use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub(crate) const DATA_DIR: &str = "data";
pub(crate) const LOGS_DIR: &str = "logs";

/// Directories a run works in, relative to `root`.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    root: PathBuf,
}

impl Layout {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Layout {
        Layout { root: root.into() }
    }

    pub(crate) fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    pub(crate) fn logs_dir(&self) -> PathBuf {
        self.root.join(LOGS_DIR)
    }

    pub(crate) fn dataset_path(&self, file_name: &str) -> PathBuf {
        self.data_dir().join(file_name)
    }

    /// Creates the data and logs directories if they are missing.
    pub(crate) fn ensure(&self) -> Result<()> {
        for dir in &[self.data_dir(), self.logs_dir()] {
            ensure_dir(dir)?;
        }
        Ok(())
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;
    tracing::info!("created directory {}", dir.display());
    Ok(())
}
