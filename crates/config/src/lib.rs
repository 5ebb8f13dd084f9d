//! Configuration for HSM residency checking.
//!
//! The checker only makes sense for storage boxes whose files live on a
//! plain filesystem, so configuration is centred on an allow-list of
//! backend class names ([`StorageClasses`]) plus the minimum file size
//! below which a zero-block file is still considered resident.
//!
//! [`HsmConfig`] is constructed explicitly and handed to the checker;
//! there is no global settings lookup. [`HsmConfig::load`] merges, in
//! order: built-in defaults, an optional TOML file, and `HSM_`-prefixed
//! environment variables (`HSM_STORAGE_CLASSES`, `HSM_MIN_FILE_SIZE`).
//! A `storage_classes` value from any source *replaces* the default list;
//! extending the defaults is expressed by listing them alongside the
//! additions.

pub mod error;

use crate::error::{ErrorKind, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Backend class name of the host's own local-filesystem storage.
pub const LOCAL_FILESYSTEM_CLASS: &str = "tardis.tardis_portal.storage.MyTardisLocalFileSystemStorage";

/// Backend class name of the framework's generic filesystem storage.
pub const FILESYSTEM_CLASS: &str = "django.core.files.storage.FileSystemStorage";

/// Default minimum file size (bytes) for residency checks.
///
/// Files at or below this size can be stored entirely in the inode and
/// report zero allocated blocks while still being readable.
pub const DEFAULT_MIN_FILE_SIZE: u64 = 500;

/// Allow-list of storage backend class names supported for residency checks.
///
/// Membership is decided by exact string match; there is no wildcard or
/// prefix matching. An empty list is valid and simply permits nothing.
///
/// # Examples
///
/// ```
/// use hsmstat_config::{FILESYSTEM_CLASS, StorageClasses};
///
/// let classes = StorageClasses::default().with_class("my.host.CustomStorage");
/// assert!(classes.permits(FILESYSTEM_CLASS));
/// assert!(classes.permits("my.host.CustomStorage"));
/// assert!(!classes.permits("my.host.S3Storage"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageClasses(Vec<String>);

impl Default for StorageClasses {
    fn default() -> Self {
        Self(vec![
            LOCAL_FILESYSTEM_CLASS.to_string(),
            FILESYSTEM_CLASS.to_string(),
        ])
    }
}

impl StorageClasses {
    /// Build an allow-list from explicit class names, replacing the defaults.
    pub fn new(classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(classes.into_iter().map(Into::into).collect())
    }

    /// Whether a backend class name is permitted. Exact match only.
    pub fn permits(&self, class: &str) -> bool {
        self.0.iter().any(|permitted| permitted == class)
    }

    /// Extend the allow-list with one more class name.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.0.push(class.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the permitted class names in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Configuration for the HSM status checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HsmConfig {
    /// Backend classes whose files may be checked for residency.
    pub storage_classes: StorageClasses,
    /// Files at or below this size (bytes) are never classified offline.
    pub min_file_size: u64,
}

impl Default for HsmConfig {
    fn default() -> Self {
        Self {
            storage_classes: StorageClasses::default(),
            min_file_size: DEFAULT_MIN_FILE_SIZE,
        }
    }
}

impl HsmConfig {
    /// Load configuration from defaults, an optional TOML file, and
    /// `HSM_`-prefixed environment variables (later sources win).
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Invalid`] when a source fails to parse or
    /// deserialize. A missing file is not an error; figment treats an
    /// absent TOML file as an empty source.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hsmstat_config::HsmConfig;
    /// use std::path::Path;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = HsmConfig::load(Some(Path::new("/etc/hsmstat.toml")))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut sources = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            sources = sources.merge(Toml::file(path));
        }
        let config: Self = sources
            .merge(Env::prefixed("HSM_"))
            .extract()
            .map_err(ErrorKind::Invalid)?;
        tracing::debug!(
            classes = config.storage_classes.0.len(),
            min_file_size = config.min_file_size,
            "loaded HSM checker configuration"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LOCAL_FILESYSTEM_CLASS, true)]
    #[case(FILESYSTEM_CLASS, true)]
    #[case("django.core.files.storage.S3Boto3Storage", false)]
    // No prefix matching
    #[case("django.core.files.storage", false)]
    #[case("", false)]
    fn test_default_allow_list(#[case] class: &str, #[case] expected: bool) {
        assert_eq!(StorageClasses::default().permits(class), expected);
    }

    #[test]
    fn test_override_replaces_defaults() {
        let classes = StorageClasses::new(["my.host.CustomStorage"]);
        assert!(classes.permits("my.host.CustomStorage"));
        assert!(!classes.permits(FILESYSTEM_CLASS));
        assert!(!classes.permits(LOCAL_FILESYSTEM_CLASS));
    }

    #[test]
    fn test_extend_keeps_defaults() {
        let classes = StorageClasses::default().with_class("my.host.CustomStorage");
        assert!(classes.permits("my.host.CustomStorage"));
        assert!(classes.permits(FILESYSTEM_CLASS));
        assert!(classes.permits(LOCAL_FILESYSTEM_CLASS));
    }

    #[test]
    fn test_empty_allow_list_permits_nothing() {
        let classes = StorageClasses::new(Vec::<String>::new());
        assert!(classes.is_empty());
        assert!(!classes.permits(FILESYSTEM_CLASS));
        assert!(!classes.permits(""));
    }

    #[test]
    fn test_defaults() {
        let config = HsmConfig::default();
        assert_eq!(config.min_file_size, DEFAULT_MIN_FILE_SIZE);
        assert_eq!(config.storage_classes.iter().count(), 2);
    }

    #[test]
    fn test_load_without_sources_yields_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = HsmConfig::load(None).unwrap();
            assert_eq!(config, HsmConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "hsmstat.toml",
                r#"
                    storage_classes = ["my.host.CustomStorage"]
                    min_file_size = 1024
                "#,
            )?;
            let config = HsmConfig::load(Some(Path::new("hsmstat.toml"))).unwrap();
            assert_eq!(config.min_file_size, 1024);
            assert!(config.storage_classes.permits("my.host.CustomStorage"));
            // Overriding replaces the built-in defaults entirely.
            assert!(!config.storage_classes.permits(FILESYSTEM_CLASS));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("hsmstat.toml", "min_file_size = 1024")?;
            jail.set_env("HSM_MIN_FILE_SIZE", "30");
            let config = HsmConfig::load(Some(Path::new("hsmstat.toml"))).unwrap();
            assert_eq!(config.min_file_size, 30);
            Ok(())
        });
    }

    #[test]
    fn test_env_storage_classes() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("HSM_STORAGE_CLASSES", r#"["my.host.CustomStorage"]"#);
            let config = HsmConfig::load(None).unwrap();
            assert!(config.storage_classes.permits("my.host.CustomStorage"));
            assert!(!config.storage_classes.permits(LOCAL_FILESYSTEM_CLASS));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("hsmstat.toml", "min_file_size = \"lots\"")?;
            let result = HsmConfig::load(Some(Path::new("hsmstat.toml")));
            let err = result.unwrap_err();
            assert!(matches!(&*err, ErrorKind::Invalid(_)));
            assert!(!err.is_retryable());
            Ok(())
        });
    }
}
