//! Host-model capability traits.
//!
//! The hosting application owns the storage-box and data-file models; this
//! crate only ever reads a handful of fields from them. Rather than
//! importing host types, the checker accepts anything implementing these
//! narrow traits, which keeps it testable and reusable outside the host.

use std::path::Path;

/// A configured storage backend, as modelled by the host application.
pub trait StorageBox {
    /// Name of the storage box, used for logging and error reporting only.
    fn name(&self) -> &str;

    /// Class name of the backend implementation attached to this box,
    /// e.g. `django.core.files.storage.FileSystemStorage`. Compared
    /// against the configured allow-list.
    fn storage_class(&self) -> &str;

    /// Look up a backend option by key.
    ///
    /// Residency checks consume the `location` option: the root directory
    /// beneath which the box's files live.
    fn option(&self, key: &str) -> Option<String>;
}

/// A physical file copy tracked by the host application.
pub trait FileRecord {
    /// Identifier for logging and error reporting only.
    fn id(&self) -> &str;

    /// Path of the file relative to its storage box's location.
    fn relative_path(&self) -> &Path;

    /// Whether the host has verified this copy.
    ///
    /// Unverified copies may still be mid-transfer; their residency is
    /// meaningless and checks against them are refused.
    fn verified(&self) -> bool;
}

impl<T: StorageBox + ?Sized> StorageBox for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn storage_class(&self) -> &str {
        (**self).storage_class()
    }

    fn option(&self, key: &str) -> Option<String> {
        (**self).option(key)
    }
}

impl<T: FileRecord + ?Sized> FileRecord for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn relative_path(&self) -> &Path {
        (**self).relative_path()
    }

    fn verified(&self) -> bool {
        (**self).verified()
    }
}
