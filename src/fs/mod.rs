pub mod meta;
pub mod paths;
pub mod walk;

pub use meta::{kind_of, permission_bits};
pub use paths::is_canonical_absolute;
pub use walk::{walk_tree, Walk, WalkEntry};
