use std::path::{Path, PathBuf};
use tokio::fs;
use crate::utils::{ConverterError, ConverterResult};

/// Checks that a configured save directory exists and is a directory.
pub fn validate_save_dir(path: &Path) -> ConverterResult<()> {
    if !path.exists() {
        return Err(ConverterError::validation(format!(
            "Invalid save location: {}",
            path.display()
        )));
    }

    if !path.is_dir() {
        return Err(ConverterError::validation(format!(
            "Save location is not a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Returns `<dir>/<stem>.zip`, or `<dir>/<stem>_<n>.zip` with the smallest
/// `n` that is not taken yet.
pub async fn unique_archive_path(dir: &Path, stem: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{stem}.zip"));
    let mut counter = 1;
    while fs::try_exists(&candidate).await.unwrap_or(false) {
        candidate = dir.join(format!("{stem}_{counter}.zip"));
        counter += 1;
    }
    candidate
}

/// Writes `bytes` to a fresh archive path under `dir` and returns the path.
pub async fn save_archive(dir: &Path, file_name: &str, bytes: &[u8]) -> ConverterResult<PathBuf> {
    let stem = file_name.strip_suffix(".zip").unwrap_or(file_name);
    let path = unique_archive_path(dir, stem).await;

    // create_new refuses to clobber a file that appeared since the probe
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await
        .map_err(|e| ConverterError::io(format!("Cannot create {}: {e}", path.display())))?;

    tokio::io::AsyncWriteExt::write_all(&mut file, bytes)
        .await
        .map_err(|e| ConverterError::io(format!("Failed to write {}: {e}", path.display())))?;

    Ok(path)
}
