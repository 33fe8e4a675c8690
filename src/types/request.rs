use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use super::errors::{Error, ErrorKind};
use super::ownership::Owner;
use crate::constants::{POLICY_RECURSIVE, POLICY_ROOT_ONLY};

/// Traversal policy for an ownership change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChownPolicy {
    /// The target and every entry beneath it.
    #[default]
    Recursive,
    /// The target only; descendants are left untouched.
    RootOnly,
}

impl ChownPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ChownPolicy::Recursive => POLICY_RECURSIVE,
            ChownPolicy::RootOnly => POLICY_ROOT_ONLY,
        }
    }
}

impl fmt::Display for ChownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChownPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            POLICY_RECURSIVE => Ok(ChownPolicy::Recursive),
            POLICY_ROOT_ONLY => Ok(ChownPolicy::RootOnly),
            other => Err(Error::new(
                ErrorKind::InvalidPolicy,
                format!("expected {POLICY_RECURSIVE} or {POLICY_ROOT_ONLY}, got {other:?}"),
            )),
        }
    }
}

/// A validated ownership-change request. Only the parser's builder produces these.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChownRequest {
    /// Logical name from the annotation namespace; diagnostics only.
    pub name: String,
    /// Absolute, canonical path as seen from inside the container.
    pub path: PathBuf,
    pub owner: Owner,
    /// Permission bits to set; `None` leaves the mode untouched.
    pub mode: Option<u32>,
    /// `None` when no policy was declared.
    pub policy: Option<ChownPolicy>,
}

impl ChownRequest {
    /// Declared policy, falling back to [`ChownPolicy::Recursive`].
    pub fn effective_policy(&self) -> ChownPolicy {
        self.policy.unwrap_or_default()
    }
}

/// Validated requests keyed by their declared path.
pub type RequestMap = HashMap<PathBuf, ChownRequest>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_from_str_accepts_both_values() {
        assert_eq!("recursive".parse::<ChownPolicy>().unwrap(), ChownPolicy::Recursive);
        assert_eq!("root-only".parse::<ChownPolicy>().unwrap(), ChownPolicy::RootOnly);
    }

    #[test]
    fn policy_from_str_is_case_sensitive() {
        let err = "Recursive".parse::<ChownPolicy>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidPolicy);
        assert!("".parse::<ChownPolicy>().is_err());
    }

    #[test]
    fn missing_policy_defaults_to_recursive() {
        let req = ChownRequest {
            name: "data".into(),
            path: PathBuf::from("/data"),
            owner: Owner::new(1, 2),
            mode: None,
            policy: None,
        };
        assert_eq!(req.effective_policy(), ChownPolicy::Recursive);
    }

    #[test]
    fn request_serializes_policy_in_kebab_case() {
        let req = ChownRequest {
            name: "data".into(),
            path: PathBuf::from("/data"),
            owner: Owner::new(2000, 2000),
            mode: Some(0o755),
            policy: Some(ChownPolicy::RootOnly),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["policy"], "root-only");
        assert_eq!(v["path"], "/data");
        assert_eq!(v["owner"]["uid"], 2000);
    }
}
