//! In-memory host-model stand-ins for testing.

use crate::models::{FileRecord, StorageBox};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Storage box stand-in with explicit class name and options.
///
/// # Examples
///
/// ```
/// use hsmstat_config::FILESYSTEM_CLASS;
/// use hsmstat_status::mock::MockStorageBox;
///
/// let storage_box = MockStorageBox::new(FILESYSTEM_CLASS)
///     .with_option("location", "/data/store");
/// ```
#[derive(Debug, Clone)]
pub struct MockStorageBox {
    name: String,
    storage_class: String,
    options: HashMap<String, String>,
}

impl MockStorageBox {
    pub fn new(storage_class: impl Into<String>) -> Self {
        Self {
            name: "mock-box".to_string(),
            storage_class: storage_class.into(),
            options: HashMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

impl StorageBox for MockStorageBox {
    fn name(&self) -> &str {
        &self.name
    }

    fn storage_class(&self) -> &str {
        &self.storage_class
    }

    fn option(&self, key: &str) -> Option<String> {
        self.options.get(key).cloned()
    }
}

/// File-record stand-in; verified by default.
#[derive(Debug, Clone)]
pub struct MockFile {
    id: String,
    path: PathBuf,
    verified: bool,
}

impl MockFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            id: path.display().to_string(),
            path,
            verified: true,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn unverified(mut self) -> Self {
        self.verified = false;
        self
    }
}

impl FileRecord for MockFile {
    fn id(&self) -> &str {
        &self.id
    }

    fn relative_path(&self) -> &Path {
        &self.path
    }

    fn verified(&self) -> bool {
        self.verified
    }
}
