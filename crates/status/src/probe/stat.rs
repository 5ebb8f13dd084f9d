//! Block-count residency probe.
//!
//! Classifies a file by comparing its apparent size against the number of
//! blocks allocated for it. An HSM that migrates a file to tape leaves a
//! stub with the original size but no allocated blocks, which is exactly
//! what `stat(2)` reports as `st_size > 0, st_blocks == 0`.

use super::ResidencyProbe;
use crate::error::{ErrorKind, Result};
use crate::residency::Residency;
use async_trait::async_trait;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use tokio::fs;

/// Residency probe backed by a single metadata read.
///
/// # Examples
///
/// ```no_run
/// use hsmstat_status::{ResidencyProbe, StatProbe};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let probe = StatProbe::new(500);
/// let residency = probe.probe(Path::new("/data/store/sample.dat")).await?;
/// println!("sample.dat is {residency}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct StatProbe {
    /// Files at or below this size (bytes) are never classified offline.
    min_file_size: u64,
}

impl StatProbe {
    pub fn new(min_file_size: u64) -> Self {
        Self { min_file_size }
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}

#[async_trait]
impl ResidencyProbe for StatProbe {
    async fn probe(&self, path: &Path) -> Result<Residency> {
        let metadata = fs::metadata(path).await.map_err(|e| Self::map_io_error(e, path))?;
        let residency = Residency::classify(metadata.size(), metadata.blocks(), self.min_file_size);
        tracing::debug!(
            path = %path.display(),
            size = metadata.size(),
            blocks = metadata.blocks(),
            residency = %residency,
            "probed file residency"
        );
        Ok(residency)
    }
}
