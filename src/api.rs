// Facade for API module; delegates to submodules under src/api/

use std::path::Path;

use log::Level;
use serde_json::json;

use crate::adapters::{FsOwnershipOps, OwnershipOps};
use crate::logging::{AuditCtx, DiagnosticSink, FactsEmitter, StageLogger};
use crate::parse::parse_chown_requests;
use crate::types::{ApplyMode, ApplyReport, RequestMap};

mod apply;
pub mod errors;

/// Parser and executor behind one handle, sharing the injected sinks.
pub struct MountChown<E: FactsEmitter, D: DiagnosticSink> {
    facts: E,
    diag: D,
    ops: Box<dyn OwnershipOps>,
    mode: ApplyMode,
}

impl<E: FactsEmitter, D: DiagnosticSink> MountChown<E, D> {
    pub fn new(facts: E, diag: D) -> Self {
        Self {
            facts,
            diag,
            ops: Box::new(FsOwnershipOps),
            mode: ApplyMode::Commit,
        }
    }

    pub fn with_ownership_ops(mut self, ops: Box<dyn OwnershipOps>) -> Self {
        self.ops = ops;
        self
    }

    pub fn with_mode(mut self, mode: ApplyMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn diag(&self) -> &D {
        &self.diag
    }

    /// Parse annotations into validated requests keyed by declared path.
    pub fn parse<I, K, V>(&self, annotations: I) -> RequestMap
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let requests = parse_chown_requests(annotations, &self.diag);
        match serde_json::to_string(&requests) {
            Ok(s) => self.diag.log(Level::Debug, &format!("Parsed requests: {s}")),
            Err(e) => self
                .diag
                .log(Level::Debug, &format!("Parsed {} requests ({e})", requests.len())),
        }

        let tctx = AuditCtx::new(&self.facts as &dyn FactsEmitter, self.mode.is_dry_run());
        let mut names: Vec<&str> = requests.values().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        StageLogger::new(&tctx)
            .parse_result()
            .field("accepted", json!(names))
            .emit_success();
        requests
    }

    /// Apply every request under `container_root`.
    ///
    /// Per-request failures are reported in the returned [`ApplyReport`] and
    /// never stop the remaining requests.
    ///
    /// # Errors
    ///
    /// [`errors::ApiError::InvalidRoot`] if `container_root` is not absolute;
    /// nothing is touched in that case.
    pub fn apply(
        &self,
        container_root: &Path,
        requests: &RequestMap,
    ) -> Result<ApplyReport, errors::ApiError> {
        apply::run(self, container_root, requests)
    }
}
