use anyhow::{Context, Result};
use rand::Rng;
use std::path::Path;

pub(crate) const MIN_VALUE: i64 = 0;
pub(crate) const MAX_VALUE: i64 = 100;

/// Draws `size` values uniformly from `MIN_VALUE..=MAX_VALUE`.
pub(crate) fn generate<R: Rng>(size: usize, rng: &mut R) -> Result<Vec<i64>> {
    let mut data = Vec::new();
    data.try_reserve_exact(size)
        .with_context(|| format!("cannot allocate a dataset of {} values", size))?;
    data.extend((0..size).map(|_| rng.random_range(MIN_VALUE..=MAX_VALUE)));
    Ok(data)
}

pub(crate) fn save(path: &Path, data: &[i64]) -> Result<()> {
    let buf = serde_json::to_vec(data).context("failed to serialize dataset")?;
    std::fs::write(path, buf)
        .with_context(|| format!("failed to write dataset to {}", path.display()))?;
    tracing::info!("saved {} values to {}", data.len(), path.display());
    Ok(())
}

/// Reads the dataset back, `None` if the file does not exist.
pub(crate) fn load(path: &Path) -> Result<Option<Vec<i64>>> {
    let data = match std::fs::read(path) {
        Ok(d) => d,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("file {} is not readable", path.display()))
        }
    };
    let values: Vec<i64> = serde_json::from_slice(&data)
        .with_context(|| format!("{} is not a JSON array of integers", path.display()))?;
    tracing::debug!("loaded {} values from {}", values.len(), path.display());
    Ok(Some(values))
}

/// Like `load`, but a missing file is logged and analyzed as empty.
pub(crate) fn reload_or_empty(path: &Path) -> Result<Vec<i64>> {
    match load(path)? {
        Some(values) => Ok(values),
        None => {
            tracing::error!("dataset file {} not found", path.display());
            Ok(Vec::new())
        }
    }
}
