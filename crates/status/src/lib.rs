//! Online/offline residency checks for HSM-backed storage.
//!
//! A Hierarchical Storage Management system transparently migrates cold
//! files to tape, leaving a stub on fast storage. This crate answers one
//! question about a file referenced by a host data-management application:
//! are its bytes immediately readable ([`Residency::Online`]), or would
//! reading trigger a tape recall ([`Residency::Offline`])?
//!
//! The answer comes from a single read-only metadata inspection of the
//! resolved path; nothing is ever written, cached, or persisted. Checks are
//! restricted to storage boxes whose backend class appears in a configured
//! allow-list ([`hsmstat_config::StorageClasses`]); everything else yields
//! [`Residency::Unknown`]. Host models are consumed through the narrow
//! [`StorageBox`] and [`FileRecord`] traits rather than concrete framework
//! types.

pub mod checker;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod models;
mod path;
pub mod probe;
mod residency;

pub use crate::checker::StatusChecker;
pub use crate::models::{FileRecord, StorageBox};
pub use crate::path::validate as validate_path;
pub use crate::probe::{AlwaysOnline, ProbeHandle, ResidencyProbe, StatProbe};
pub use crate::residency::Residency;
