//! Shared crate-wide constants for mount-chown.
//!
//! Centralizes the annotation grammar and default labels used across modules.

/// Prefix every recognized annotation key starts with.
/// Full key shape: `<ANNOTATION_PREFIX><name>.<argument>`.
pub const ANNOTATION_PREFIX: &str = "com.launchplatform.oci-hooks.mount-chown.";

/// Argument carrying the absolute, canonical target path.
pub const ARG_PATH: &str = "path";
/// Argument carrying `uid` or `uid:gid`.
pub const ARG_OWNER: &str = "owner";
/// Argument carrying `recursive` or `root-only`.
pub const ARG_POLICY: &str = "policy";
/// Argument carrying an octal permission value such as `0755`.
pub const ARG_MODE: &str = "mode";

pub const POLICY_RECURSIVE: &str = "recursive";
pub const POLICY_ROOT_ONLY: &str = "root-only";

/// Permission bits a `mode` argument may carry (rwx for u/g/o plus setuid, setgid, sticky).
pub const MODE_MASK: u32 = 0o7777;

/// Name of the OCI runtime configuration inside a bundle directory.
pub const OCI_CONFIG_FILE: &str = "config.json";

/// Subsystem label attached to every emitted fact.
pub const FACTS_SUBSYSTEM: &str = "mount-chown";

/// Schema version carried in the envelope of every emitted fact.
pub const FACTS_SCHEMA_VERSION: i64 = 1;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted on the command line. `fatal` and `panic` are accepted
/// for compatibility with existing hook configurations and map to `error`.
pub const LOG_LEVELS: &[&str] = &[
    "trace", "debug", "info", "warn", "warning", "error", "fatal", "panic",
];
