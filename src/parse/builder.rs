use std::path::PathBuf;

use crate::types::errors::{Error, ErrorKind};
use crate::types::{ChownPolicy, ChownRequest, Owner};

/// Draft of a request, accumulated field by field while annotations for one
/// name are read, then finalized into an immutable [`ChownRequest`].
#[derive(Clone, Debug, Default)]
pub struct RequestBuilder {
    name: String,
    path: Option<PathBuf>,
    owner: Option<Owner>,
    mode: Option<u32>,
    policy: String,
}

impl RequestBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&mut self, path: PathBuf) -> &mut Self {
        self.path = Some(path);
        self
    }

    pub fn owner(&mut self, owner: Owner) -> &mut Self {
        self.owner = Some(owner);
        self
    }

    pub fn mode(&mut self, mode: Option<u32>) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Stored verbatim; validated by [`build`](Self::build).
    pub fn policy(&mut self, policy: impl Into<String>) -> &mut Self {
        self.policy = policy.into();
        self
    }

    /// Finalize the draft.
    ///
    /// # Errors
    ///
    /// Returns every reason the draft cannot become a request: a missing path,
    /// a missing owner, or a policy outside the enumerated values.
    pub fn build(self) -> Result<ChownRequest, Vec<Error>> {
        let mut problems = Vec::new();
        if self.path.is_none() {
            problems.push(Error::new(
                ErrorKind::MissingField,
                format!("empty path argument value for {}", self.name),
            ));
        }
        if self.owner.is_none() {
            problems.push(Error::new(
                ErrorKind::MissingField,
                format!("empty owner argument value for {}", self.name),
            ));
        }
        let policy = if self.policy.is_empty() {
            None
        } else {
            match self.policy.parse::<ChownPolicy>() {
                Ok(p) => Some(p),
                Err(e) => {
                    problems.push(Error::new(
                        e.kind,
                        format!("policy for {}: {}", self.name, e.msg),
                    ));
                    None
                }
            }
        };

        match (self.path, self.owner) {
            (Some(path), Some(owner)) if problems.is_empty() => Ok(ChownRequest {
                name: self.name,
                path,
                owner,
                mode: self.mode,
                policy,
            }),
            _ => Err(problems),
        }
    }
}
