//! Non-mutating filesystem probes used for diagnostics.
use std::path::Path;

/// Return a string describing the kind of filesystem node at `path`
/// without following a trailing symlink.
pub fn kind_of(path: &Path) -> &'static str {
    match std::fs::symlink_metadata(path) {
        Ok(md) => {
            let ft = md.file_type();
            if ft.is_symlink() {
                "symlink"
            } else if ft.is_file() {
                "file"
            } else if ft.is_dir() {
                "dir"
            } else {
                "unknown"
            }
        }
        Err(_) => "missing",
    }
}

/// Permission bits (including setuid, setgid and sticky) from `st_mode`.
#[cfg(unix)]
pub fn permission_bits(md: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    md.permissions().mode() & crate::constants::MODE_MASK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_nodes() {
        let td = tempfile::tempdir().unwrap();
        let dir = td.path().join("dir");
        let file = dir.join("file.txt");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(&file, b"x").unwrap();
        std::os::unix::fs::symlink(&file, td.path().join("link")).unwrap();

        assert_eq!(kind_of(&dir), "dir");
        assert_eq!(kind_of(&file), "file");
        assert_eq!(kind_of(&td.path().join("link")), "symlink");
        assert_eq!(kind_of(&td.path().join("nope")), "missing");
    }

    #[test]
    fn permission_bits_masks_file_type() {
        use std::os::unix::fs::PermissionsExt;
        let td = tempfile::tempdir().unwrap();
        let file = td.path().join("f");
        std::fs::write(&file, b"x").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o640)).unwrap();
        let md = std::fs::symlink_metadata(&file).unwrap();
        assert_eq!(permission_bits(&md), 0o640);
    }
}
