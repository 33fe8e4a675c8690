//! Data-only type for numeric ownership of a filesystem path.
//! Centralized under `crate::types` for cross-layer reuse.

use std::fmt;

use serde::Serialize;

/// Numeric owner pair. Ownership-by-name is not supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Owner {
    /// User ID of the owner
    pub uid: u32,
    /// Group ID of the owner
    pub gid: u32,
}

impl Owner {
    pub const fn new(uid: u32, gid: u32) -> Self {
        Self { uid, gid }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.uid, self.gid)
    }
}

#[cfg(unix)]
impl From<&std::fs::Metadata> for Owner {
    fn from(md: &std::fs::Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;
        Self {
            uid: md.uid(),
            gid: md.gid(),
        }
    }
}
