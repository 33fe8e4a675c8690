pub mod fs;

use std::fs::Metadata;
use std::path::Path;

use crate::types::{errors::Result, Owner};

/// Reads and changes ownership and permission bits of single filesystem entries.
///
/// Readers take the metadata the caller already holds (from a walk or an lstat)
/// so a recursive pass stats every entry only once.
pub trait OwnershipOps {
    /// Current owner of `path`.
    fn owner_of(&self, path: &Path, md: &Metadata) -> Owner;

    /// Current permission bits of `path`, masked to `0o7777`.
    fn mode_of(&self, path: &Path, md: &Metadata) -> u32;

    /// Change the owner of `path` itself; a symlink is never followed.
    /// # Errors
    /// Returns an `Io` error if the change is refused.
    fn set_owner(&self, path: &Path, owner: Owner) -> Result<()>;

    /// Change the permission bits of `path`.
    /// # Errors
    /// Returns an `Io` error if the change is refused.
    fn set_mode(&self, path: &Path, mode: u32) -> Result<()>;
}

pub use fs::FsOwnershipOps;
