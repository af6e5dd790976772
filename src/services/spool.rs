//! Temporary storage for incoming images and rendered jobs.

use escpos_raster::{sniff_extension, PrintJob};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Extension used when the image format cannot be sniffed.
const FALLBACK_EXTENSION: &str = "jpg";

/// Directory holding `receipt_<uuid>.<ext>` files.
#[derive(Debug, Clone)]
pub struct Spool {
    dir: PathBuf,
    keep: bool,
}

impl Spool {
    pub fn new(dir: impl Into<PathBuf>, keep: bool) -> Self {
        Self {
            dir: dir.into(),
            keep,
        }
    }

    pub fn keeps_files(&self) -> bool {
        self.keep
    }

    pub fn path_for(&self, id: Uuid, extension: &str) -> PathBuf {
        self.dir.join(format!("receipt_{id}.{extension}"))
    }

    /// Write incoming image bytes, named after the sniffed format.
    pub async fn store_image(&self, id: Uuid, bytes: &[u8]) -> std::io::Result<PathBuf> {
        let extension = sniff_extension(bytes).unwrap_or(FALLBACK_EXTENSION);
        let path = self.path_for(id, extension);
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Spooled image");
        Ok(path)
    }

    /// Keep a copy of the raw job next to the image, if configured to.
    pub async fn store_job(&self, id: Uuid, job: &PrintJob) -> std::io::Result<Option<PathBuf>> {
        if !self.keep {
            return Ok(None);
        }
        let path = self.path_for(id, "bin");
        tokio::fs::write(&path, job.as_bytes()).await?;
        Ok(Some(path))
    }

    /// Remove a spooled file unless files are kept.
    ///
    /// Failures are logged, never returned: the job itself already finished.
    pub async fn release(&self, path: &Path) {
        if self.keep {
            return;
        }
        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::warn!(%e, path = %path.display(), "Failed to remove spooled file");
        }
    }
}
