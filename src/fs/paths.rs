//! Path utilities for mount-chown filesystem operations.

/// True when `path` is absolute and already in cleaned form: no empty, `.` or
/// `..` segments and no trailing separator (except for `/` itself).
///
/// This is purely lexical; the path does not have to exist. Declared paths
/// failing this check are rejected outright rather than normalized, so a
/// request can never be redirected by `..` segments.
#[must_use]
pub fn is_canonical_absolute(path: &str) -> bool {
    if path == "/" {
        return true;
    }
    let Some(rest) = path.strip_prefix('/') else {
        return false;
    };
    rest.split('/')
        .all(|seg| !seg.is_empty() && seg != "." && seg != "..")
}
