//! Scripted residency probe for testing.

use super::ResidencyProbe;
use crate::error::{ErrorKind, Result};
use crate::residency::Residency;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Probe with scripted answers, keyed by absolute path.
///
/// Records every path it is asked about, so tests can assert that a check
/// did (or, for non-allow-listed boxes, did not) reach the filesystem
/// layer at all. Probing a path without a scripted answer returns
/// [`NotFound`](crate::error::ErrorKind::NotFound).
///
/// # Examples
///
/// ```
/// use hsmstat_status::{Residency, ResidencyProbe};
/// use hsmstat_status::probe::MockProbe;
/// use std::path::Path;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let probe = MockProbe::with_answers([
///     ("/data/store/sample.dat", Residency::Offline),
/// ]);
/// let residency = probe.probe(Path::new("/data/store/sample.dat")).await?;
/// assert_eq!(residency, Residency::Offline);
/// assert_eq!(probe.probed().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockProbe {
    answers: HashMap<PathBuf, Residency>,
    probed: Mutex<Vec<PathBuf>>,
}

impl MockProbe {
    /// Create a probe pre-loaded with scripted answers.
    pub fn with_answers(answers: impl IntoIterator<Item = (impl Into<PathBuf>, Residency)>) -> Self {
        Self {
            answers: answers.into_iter().map(|(path, residency)| (path.into(), residency)).collect(),
            probed: Mutex::new(Vec::new()),
        }
    }

    /// Paths this probe has been asked about, in order.
    pub fn probed(&self) -> Vec<PathBuf> {
        // Unwrap is fine in test-only code; a poisoned lock means a test
        // already panicked.
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResidencyProbe for MockProbe {
    async fn probe(&self, path: &Path) -> Result<Residency> {
        self.probed.lock().unwrap().push(path.to_path_buf());
        match self.answers.get(path) {
            Some(residency) => Ok(*residency),
            None => Err(exn::Exn::from(ErrorKind::NotFound(path.to_path_buf()))),
        }
    }
}
