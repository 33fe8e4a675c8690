use std::path::PathBuf;

use serde::Serialize;

/// How a request ends up after the executor is done with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Every step completed (including no-op skips).
    Succeeded,
    /// The walk completed but some entries or the mode step failed.
    PartiallyFailed,
    /// The target could not be resolved, stat'ed, or walked to completion.
    Failed,
}

/// Per-request outcome.
#[derive(Clone, Debug, Serialize)]
pub struct RequestReport {
    pub name: String,
    pub path: PathBuf,
    pub status: RequestStatus,
    /// Ownership or mode changes made (or that would be made, in dry-run).
    pub changed: usize,
    /// Comparisons that found the entry already in the requested state.
    pub unchanged: usize,
    /// Recoverable failures on individual entries.
    pub failures: Vec<String>,
    /// The error that aborted this request, if any.
    pub error: Option<String>,
    /// Stable id of the first failure category seen, if any.
    pub error_id: Option<&'static str>,
}

impl RequestReport {
    pub(crate) fn new(name: &str, path: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            path,
            status: RequestStatus::Succeeded,
            changed: 0,
            unchanged: 0,
            failures: Vec::new(),
            error: None,
            error_id: None,
        }
    }

    /// Settle `status` from the collected failures and abort error.
    pub(crate) fn finish(mut self) -> Self {
        self.status = if self.error.is_some() {
            RequestStatus::Failed
        } else if !self.failures.is_empty() {
            RequestStatus::PartiallyFailed
        } else {
            RequestStatus::Succeeded
        };
        self
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ApplyReport {
    pub requests: Vec<RequestReport>,
    pub duration_ms: u64,
}

impl ApplyReport {
    /// True when every request fully succeeded.
    pub fn succeeded(&self) -> bool {
        self.requests
            .iter()
            .all(|r| r.status == RequestStatus::Succeeded)
    }

    /// Requests that did not fully succeed.
    pub fn failed(&self) -> impl Iterator<Item = &RequestReport> {
        self.requests
            .iter()
            .filter(|r| r.status != RequestStatus::Succeeded)
    }

    pub fn get(&self, name: &str) -> Option<&RequestReport> {
        self.requests.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_settles_status() {
        let ok = RequestReport::new("a", PathBuf::from("/a")).finish();
        assert_eq!(ok.status, RequestStatus::Succeeded);

        let mut partial = RequestReport::new("b", PathBuf::from("/b"));
        partial.failures.push("lchown /b/x: EPERM".into());
        assert_eq!(partial.finish().status, RequestStatus::PartiallyFailed);

        let mut failed = RequestReport::new("c", PathBuf::from("/c"));
        failed.failures.push("ignored once aborted".into());
        failed.error = Some("walk: No such file or directory".into());
        assert_eq!(failed.finish().status, RequestStatus::Failed);
    }

    #[test]
    fn report_aggregates() {
        let mut report = ApplyReport::default();
        report.requests.push(RequestReport::new("a", PathBuf::from("/a")).finish());
        assert!(report.succeeded());
        let mut b = RequestReport::new("b", PathBuf::from("/b"));
        b.error = Some("gone".into());
        report.requests.push(b.finish());
        assert!(!report.succeeded());
        assert_eq!(report.failed().count(), 1);
        assert_eq!(report.get("b").map(|r| r.status), Some(RequestStatus::Failed));
    }
}
