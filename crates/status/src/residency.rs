//! Online/offline classification of stored files.

use derive_more::Display;

/// Residency classification of a single file.
///
/// `Online` means the file's bytes are immediately readable from fast
/// storage; `Offline` means the HSM has migrated them to tape, leaving a
/// stub behind; `Unknown` means the backing storage is not supported for
/// residency checks, so nothing can be said either way.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum Residency {
    #[display("online")]
    Online,
    #[display("offline")]
    Offline,
    #[display("unknown")]
    Unknown,
}

impl Residency {
    /// Classify a file from its stat results.
    ///
    /// A file reporting an apparent size but zero allocated blocks has been
    /// migrated to tape; only the stub remains on disk. Files at or below
    /// `min_file_size` are exempt, since small files can be stored entirely
    /// in the inode and legitimately report zero blocks.
    ///
    /// Never returns [`Unknown`](Self::Unknown): support for the backing
    /// storage is decided before stat results exist.
    pub fn classify(size: u64, blocks: u64, min_file_size: u64) -> Self {
        if size > min_file_size && blocks == 0 {
            Self::Offline
        } else {
            Self::Online
        }
    }

    pub fn is_online(self) -> bool {
        self == Self::Online
    }

    /// Combine two classifications for collection roll-ups.
    ///
    /// `Offline` dominates (one migrated file makes the collection
    /// offline), then `Unknown`; a collection is `Online` only when every
    /// member is.
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Offline, _) | (_, Self::Offline) => Self::Offline,
            (Self::Unknown, _) | (_, Self::Unknown) => Self::Unknown,
            (Self::Online, Self::Online) => Self::Online,
        }
    }
}
