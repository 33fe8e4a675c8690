//! Parsers for individual annotation values.
use std::path::PathBuf;

use crate::constants::MODE_MASK;
use crate::fs::paths::is_canonical_absolute;
use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::Owner;

/// Parse `uid` or `uid:gid`. A missing gid defaults to `0`.
///
/// # Errors
///
/// `InvalidOwner` for anything other than one or two colon-separated decimal
/// segments, and for ids that are negative or do not fit a `u32`.
pub fn parse_owner(value: &str) -> Result<Owner> {
    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() > 2 {
        return Err(Error::new(
            ErrorKind::InvalidOwner,
            format!(
                "expected only one or two parts in the owner but got {} instead",
                parts.len()
            ),
        ));
    }
    let uid = parse_id(parts[0], "uid")?;
    let gid = match parts.get(1) {
        Some(g) => parse_id(g, "gid")?,
        None => 0,
    };
    Ok(Owner::new(uid, gid))
}

fn parse_id(segment: &str, what: &str) -> Result<u32> {
    let id: i64 = segment.parse().map_err(|e| {
        Error::new(ErrorKind::InvalidOwner, format!("{what} {segment:?}: {e}"))
    })?;
    if id < 0 {
        return Err(Error::new(
            ErrorKind::InvalidOwner,
            format!("negative {what} {id}"),
        ));
    }
    u32::try_from(id)
        .map_err(|_| Error::new(ErrorKind::InvalidOwner, format!("{what} {id} out of range")))
}

/// Parse an octal permission value. `Ok(None)` means "do not change the mode".
///
/// # Errors
///
/// `InvalidMode` if `value` is not an octal integer or sets bits outside `0o7777`.
pub fn parse_mode(value: &str) -> Result<Option<u32>> {
    let mode = u32::from_str_radix(value, 8).map_err(|e| {
        Error::new(
            ErrorKind::InvalidMode,
            format!("{value:?} needs to be an octal integer: {e}"),
        )
    })?;
    if mode & !MODE_MASK != 0 {
        return Err(Error::new(
            ErrorKind::InvalidMode,
            format!("{value:?} sets bits outside {MODE_MASK:o}"),
        ));
    }
    Ok((mode != 0).then_some(mode))
}

/// Accept `value` only if it is already an absolute, canonical path.
///
/// # Errors
///
/// `InvalidPath` for relative paths and paths that would change when cleaned.
pub fn parse_path(value: &str) -> Result<PathBuf> {
    if is_canonical_absolute(value) {
        Ok(PathBuf::from(value))
    } else {
        Err(Error::new(
            ErrorKind::InvalidPath,
            format!("{value:?} is not an absolute canonical path"),
        ))
    }
}
