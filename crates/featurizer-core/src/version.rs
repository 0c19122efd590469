//! Version tag for persisted model archives.
//!
//! Every fitted estimator or transformer writes a `(major, minor)` pair of
//! `u16` values before its own payload:
//!
//! ```text
//! +-----------------+
//! | major: u16 (LE) |
//! +-----------------+
//! | minor: u16 (LE) |
//! +-----------------+
//! | model payload   |
//! +-----------------+
//! ```
//!
//! A reader checks the major version before touching any model field.

use std::fmt;

use crate::archive::{ArchiveReader, ArchiveWriter};
use crate::error::{FeaturizerError, Result};

/// Version tag prefixed to model archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArchiveVersion {
    pub major: u16,
    pub minor: u16,
}

impl ArchiveVersion {
    /// Create a version tag.
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    /// Write the tag.
    pub fn write(self, archive: &mut ArchiveWriter) {
        archive.write_primitive(self.major);
        archive.write_primitive(self.minor);
    }

    /// Read a tag without judging it.
    pub fn read(archive: &mut ArchiveReader<'_>) -> Result<Self> {
        let major = archive.read_primitive()?;
        let minor = archive.read_primitive()?;
        Ok(Self { major, minor })
    }

    /// Read a tag and require its major version to equal `supported_major`.
    ///
    /// Any minor version is accepted under a supported major.
    pub fn read_supported(archive: &mut ArchiveReader<'_>, supported_major: u16) -> Result<Self> {
        let version = Self::read(archive)?;
        if version.major != supported_major {
            tracing::warn!(
                major = version.major,
                minor = version.minor,
                supported_major,
                "rejecting archive with unsupported version"
            );
            return Err(FeaturizerError::UnsupportedVersion {
                major: version.major,
                minor: version.minor,
                supported_major,
            });
        }
        Ok(version)
    }
}

impl fmt::Display for ArchiveVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
