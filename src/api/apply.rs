//! api/apply.rs — apply() implementation: one pass over the request map.

mod handlers;

use std::path::Path;
use std::time::Instant;

use log::Level;
use serde_json::json;

use crate::logging::{AuditCtx, DiagnosticSink, FactsEmitter, StageLogger};
use crate::types::{ApplyReport, RequestMap, RequestStatus};

use super::errors::ApiError;
use super::MountChown;
use handlers::Reconciler;

pub(super) fn run<E: FactsEmitter, D: DiagnosticSink>(
    api: &MountChown<E, D>,
    root: &Path,
    requests: &RequestMap,
) -> Result<ApplyReport, ApiError> {
    if !root.is_absolute() {
        return Err(ApiError::InvalidRoot(format!(
            "{} is not absolute",
            root.display()
        )));
    }

    let t0 = Instant::now();
    let dry = api.mode.is_dry_run();
    let tctx = AuditCtx::new(&api.facts as &dyn FactsEmitter, dry);
    let slog = StageLogger::new(&tctx);
    let reconciler = Reconciler {
        ops: api.ops.as_ref(),
        diag: &api.diag,
        dry_run: dry,
    };

    let mut report = ApplyReport::default();
    for request in requests.values() {
        let path = request.path.display().to_string();
        slog.apply_attempt()
            .name(request.name.as_str())
            .path(path.as_str())
            .field("policy", json!(request.effective_policy().as_str()))
            .field("owner", json!(request.owner.to_string()))
            .field("mode", json!(request.mode.map(|m| format!("{m:o}"))))
            .emit_success();

        let outcome = reconciler.handle(root, request);

        let fields = json!({
            "changed": outcome.changed,
            "unchanged": outcome.unchanged,
            "failures": outcome.failures.len(),
            "error": outcome.error,
            "error_id": outcome.error_id,
        });
        let event = slog.apply_result()
            .name(request.name.as_str())
            .path(path.as_str())
            .merge(&fields);
        match outcome.status {
            RequestStatus::Succeeded => event.emit_success(),
            RequestStatus::PartiallyFailed => event.emit_warn(),
            RequestStatus::Failed => event.emit_failure(),
        }
        report.requests.push(outcome);
    }

    report.duration_ms = u64::try_from(t0.elapsed().as_millis()).unwrap_or(u64::MAX);
    let failed = report.failed().count();
    let summary = slog.apply_summary().field(
        "requests",
        json!({
            "total": report.requests.len(),
            "failed": failed,
        }),
    )
    .field("duration_ms", json!(report.duration_ms));
    if failed == 0 {
        summary.emit_success();
    } else {
        summary.emit_failure();
        api.diag.log(
            Level::Warn,
            &format!(
                "{failed} of {} chown requests did not fully succeed",
                report.requests.len()
            ),
        );
    }
    Ok(report)
}
