// Default OwnershipOps implementation backed by the host filesystem (Unix-only)

use std::fs::Metadata;
use std::path::Path;

use rustix::fs::{chmodat, AtFlags, Mode, CWD};

use crate::adapters::OwnershipOps;
use crate::fs::meta::permission_bits;
use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::Owner;

#[derive(Copy, Clone, Debug, Default)]
pub struct FsOwnershipOps;

impl OwnershipOps for FsOwnershipOps {
    fn owner_of(&self, _path: &Path, md: &Metadata) -> Owner {
        Owner::from(md)
    }

    fn mode_of(&self, _path: &Path, md: &Metadata) -> u32 {
        permission_bits(md)
    }

    fn set_owner(&self, path: &Path, owner: Owner) -> Result<()> {
        std::os::unix::fs::lchown(path, Some(owner.uid), Some(owner.gid))
            .map_err(|e| Error::io(&format!("lchown {}", path.display()), &e))
    }

    fn set_mode(&self, path: &Path, mode: u32) -> Result<()> {
        chmodat(CWD, path, Mode::from_raw_mode(mode), AtFlags::empty()).map_err(|e| {
            Error::new(
                ErrorKind::Io,
                format!("chmod {}: {}", path.display(), std::io::Error::from(e)),
            )
        })
    }
}
