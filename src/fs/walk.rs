//! Lazy subtree traversal for recursive ownership changes.
//!
//! `walk_tree` yields the root first, then every entry beneath it, each paired
//! with its lstat metadata. Symlinks are reported as themselves and never
//! followed, a symlinked root included. The first error ends the walk: it is
//! yielded once and the iterator is exhausted afterwards.
use std::fs::Metadata;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::types::errors::{Error, ErrorKind, Result};

#[derive(Debug)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub metadata: Metadata,
}

/// Single-pass iterator returned by [`walk_tree`].
pub struct Walk {
    inner: walkdir::IntoIter,
    done: bool,
}

pub fn walk_tree(root: &Path) -> Walk {
    Walk {
        inner: WalkDir::new(root)
            .follow_links(false)
            .follow_root_links(false)
            .into_iter(),
        done: false,
    }
}

impl Iterator for Walk {
    type Item = Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let step = match self.inner.next()? {
            Ok(entry) => entry.metadata().map(|metadata| WalkEntry {
                path: entry.into_path(),
                metadata,
            }),
            Err(e) => Err(e),
        };
        match step {
            Ok(entry) => Some(Ok(entry)),
            Err(e) => {
                self.done = true;
                Some(Err(Error::new(ErrorKind::Io, format!("walk: {e}"))))
            }
        }
    }
}

impl FusedIterator for Walk {}
