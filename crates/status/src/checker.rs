//! Online/offline status checks against host storage boxes.

use crate::error::{ErrorKind, Result};
use crate::models::{FileRecord, StorageBox};
use crate::path::validate as validate_path;
use crate::probe::{ProbeHandle, StatProbe};
use crate::residency::Residency;
use hsmstat_config::{HsmConfig, StorageClasses};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Checks whether files behind filesystem-backed storage boxes are online
/// or have been migrated to tape.
///
/// Built from explicit configuration at construction time; holds no global
/// state. Every check is an independent, idempotent, read-only operation,
/// so a single checker can be shared freely across callers without
/// coordination.
///
/// Only storage boxes whose backend class is in the configured allow-list
/// are inspected. Anything else yields [`Residency::Unknown`] without the
/// filesystem being touched: a non-filesystem backend is not an error,
/// there is just nothing this checker can say about it.
///
/// # Examples
///
/// ```no_run
/// use hsmstat_config::HsmConfig;
/// use hsmstat_status::{StatusChecker, StorageBox};
/// use std::path::Path;
///
/// # async fn example(storage_box: &impl StorageBox) -> Result<(), Box<dyn std::error::Error>> {
/// let checker = StatusChecker::new(&HsmConfig::default());
/// let residency = checker.residency(storage_box, Path::new("sample.dat")).await?;
/// println!("sample.dat is {residency}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct StatusChecker {
    classes: StorageClasses,
    probe: ProbeHandle,
}

impl StatusChecker {
    /// Create a checker backed by the block-count stat probe.
    pub fn new(config: &HsmConfig) -> Self {
        Self {
            classes: config.storage_classes.clone(),
            probe: Arc::new(StatProbe::new(config.min_file_size)),
        }
    }

    /// Create a checker with a caller-supplied probe.
    ///
    /// Useful for storage boxes with no HSM behind them
    /// ([`AlwaysOnline`](crate::probe::AlwaysOnline)) and for tests.
    pub fn with_probe(classes: StorageClasses, probe: ProbeHandle) -> Self {
        Self { classes, probe }
    }

    /// Whether a storage box's backend class is in the allow-list.
    pub fn permitted(&self, storage_box: &impl StorageBox) -> bool {
        self.classes.permits(storage_box.storage_class())
    }

    /// Resolve a relative file reference against a storage box's location.
    ///
    /// # Errors
    ///
    /// - [`MissingLocation`](ErrorKind::MissingLocation) if the box has no
    ///   `location` option
    /// - [`InvalidLocation`](ErrorKind::InvalidLocation) if the location is
    ///   not an absolute path
    /// - [`InvalidPath`](ErrorKind::InvalidPath) if the reference is empty
    ///   or escapes the location
    pub fn resolve(&self, storage_box: &impl StorageBox, relative: &Path) -> Result<PathBuf> {
        let location = storage_box
            .option("location")
            .ok_or_else(|| ErrorKind::MissingLocation(storage_box.name().to_string()))?;
        let location = PathBuf::from(location);
        if !location.is_absolute() {
            exn::bail!(ErrorKind::InvalidLocation(location));
        }
        Ok(location.join(validate_path(relative)?))
    }

    /// Check the residency of one file beneath a storage box.
    ///
    /// For an allow-listed box and an existing, inspectable path the result
    /// is always [`Online`](Residency::Online) or
    /// [`Offline`](Residency::Offline); [`Unknown`](Residency::Unknown) is
    /// reserved for boxes outside the allow-list.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hsmstat_config::HsmConfig;
    /// use hsmstat_status::{StatusChecker, StorageBox};
    /// use std::path::Path;
    ///
    /// # async fn example(storage_box: &impl StorageBox) -> Result<(), Box<dyn std::error::Error>> {
    /// let checker = StatusChecker::new(&HsmConfig::default());
    /// if checker.residency(storage_box, Path::new("sample.dat")).await?.is_online() {
    ///     println!("safe to read without a tape recall");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn residency(&self, storage_box: &impl StorageBox, relative: &Path) -> Result<Residency> {
        if !self.permitted(storage_box) {
            tracing::debug!(
                storage_box = storage_box.name(),
                storage_class = storage_box.storage_class(),
                "storage class not in allow-list, residency unknown"
            );
            return Ok(Residency::Unknown);
        }
        let path = self.resolve(storage_box, relative)?;
        self.probe.probe(&path).await
    }

    /// Check the residency of a host file record.
    ///
    /// # Errors
    ///
    /// [`Unverified`](ErrorKind::Unverified) if the host has not verified
    /// the record; an unverified copy may still be mid-transfer and its
    /// stat results would be meaningless. Otherwise as
    /// [`residency`](Self::residency).
    pub async fn file_residency(
        &self,
        storage_box: &impl StorageBox,
        file: &impl FileRecord,
    ) -> Result<Residency> {
        if !file.verified() {
            tracing::warn!(file = file.id(), "refusing residency check of unverified file");
            exn::bail!(ErrorKind::Unverified(file.id().to_string()));
        }
        self.residency(storage_box, file.relative_path()).await
    }

    /// Roll up the residency of a collection of file records.
    ///
    /// A dataset or experiment is online only when every file in it is
    /// online; one migrated file makes the whole collection offline. The
    /// roll-up short-circuits once [`Offline`](Residency::Offline) is
    /// reached, since no later file can improve it. An empty collection is
    /// online.
    pub async fn collection_residency<B, F, I>(&self, storage_box: &B, files: I) -> Result<Residency>
    where
        B: StorageBox,
        F: FileRecord,
        I: IntoIterator<Item = F>,
    {
        let mut rollup = Residency::Online;
        for file in files {
            rollup = rollup.combine(self.file_residency(storage_box, &file).await?);
            if rollup == Residency::Offline {
                break;
            }
        }
        Ok(rollup)
    }
}
