//! Residency probes.
//!
//! A probe answers online/offline for a single absolute filesystem path.
//! The trait exists so that the checker can be pointed at something other
//! than a real filesystem: a dummy for storage boxes with no HSM behind
//! them, or a scripted probe in tests.

#[cfg(any(test, feature = "mock"))]
mod mock;
mod stat;

#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockProbe;
pub use self::stat::StatProbe;
use crate::error::Result;
use crate::residency::Residency;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Shared handle to a probe.
pub type ProbeHandle = Arc<dyn ResidencyProbe + Send + Sync>;

/// Read-only residency inspection of a single absolute path.
///
/// Implementations must never modify the file or its metadata. A probe
/// holds no shared mutable state: it may be invoked repeatedly and
/// concurrently without coordination, and repeated probes of an unchanged
/// file yield the same classification.
#[async_trait]
pub trait ResidencyProbe: Send + Sync {
    /// Classify the file at `path`.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if the path
    /// does not exist and [`PermissionDenied`](crate::error::ErrorKind::PermissionDenied)
    /// if its metadata cannot be read.
    async fn probe(&self, path: &Path) -> Result<Residency>;
}

/// Probe that reports every path as online.
///
/// For storage boxes with plain disk behind them and no HSM: nothing is
/// ever migrated, so nothing is ever offline. Does not touch the
/// filesystem at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysOnline;

#[async_trait]
impl ResidencyProbe for AlwaysOnline {
    async fn probe(&self, _path: &Path) -> Result<Residency> {
        Ok(Residency::Online)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_online_ignores_the_filesystem() {
        let probe = AlwaysOnline;
        let residency = probe.probe(Path::new("/does/not/exist")).await.unwrap();
        assert_eq!(residency, Residency::Online);
    }
}
