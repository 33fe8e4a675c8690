use std::path::{Component, Path, PathBuf};

use super::errors::{Error, ErrorKind, Result};

/// On-disk location of a container path: a host-visible container root joined
/// with a declared path that cannot climb out of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SafePath {
    /// Host-visible root of the container filesystem
    root: PathBuf,
    /// Declared path with its leading separator stripped
    rel: PathBuf,
}

impl SafePath {
    /// Creates a new SafePath from a container root and a declared container path.
    ///
    /// The declared path is interpreted relative to `root` whether or not it
    /// carries a leading separator. Parent (`..`) components are rejected so the
    /// result always stays under `root`; `.` components are dropped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if `root` is not absolute, if `declared` contains
    /// `..`, or if it contains a prefix component.
    pub fn from_container(root: &Path, declared: &Path) -> Result<Self> {
        if !root.is_absolute() {
            return Err(Error::new(
                ErrorKind::InvalidPath,
                format!("container root {} must be absolute", root.display()),
            ));
        }

        let mut rel = PathBuf::new();
        for seg in declared.components() {
            match seg {
                Component::RootDir | Component::CurDir => {}
                Component::Normal(p) => rel.push(p),
                Component::ParentDir => {
                    return Err(Error::new(
                        ErrorKind::InvalidPath,
                        format!("{} escapes the container root", declared.display()),
                    ));
                }
                Component::Prefix(_) => {
                    return Err(Error::new(
                        ErrorKind::InvalidPath,
                        format!("unsupported component in {}", declared.display()),
                    ));
                }
            }
        }
        Ok(SafePath {
            root: root.to_path_buf(),
            rel,
        })
    }

    /// Returns the full host-visible path.
    pub fn as_path(&self) -> PathBuf {
        self.root.join(&self.rel)
    }
}
