use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;

use crate::store::StoreError;

/// Photo file storage behind a narrow interface: store bytes, get a
/// filename back; delete by filename. Nothing else touches the directory.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the uploaded bytes under a generated filename: current Unix
    /// millis plus the original file's extension, bumped on collision.
    /// Creates the upload directory on first use.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String, StoreError> {
        fs::create_dir_all(&self.dir).await?;

        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();

        let mut stamp = Utc::now().timestamp_millis();
        let filename = loop {
            let candidate = format!("{stamp}{ext}");
            if !fs::try_exists(self.dir.join(&candidate)).await? {
                break candidate;
            }
            stamp += 1;
        };

        fs::write(self.dir.join(&filename), bytes).await?;
        Ok(filename)
    }

    /// Best-effort removal of a stored photo. Failures are logged, not
    /// propagated; a product delete must not fail over a missing file.
    pub async fn delete(&self, filename: &str) {
        // Stored names never contain separators; reject anything that does.
        if Path::new(filename).file_name() != Some(filename.as_ref()) {
            tracing::warn!(filename, "refusing to delete suspicious upload name");
            return;
        }
        if let Err(err) = fs::remove_file(self.dir.join(filename)).await {
            tracing::warn!(filename, error = %err, "failed to delete upload");
        }
    }
}
