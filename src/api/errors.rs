use thiserror::Error;

use crate::types::ApplyReport;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid container root: {0}")]
    InvalidRoot(String),
}

// Stable identifiers attached to failure facts and request reports.
// We intentionally keep SCREAMING_SNAKE_CASE to match emitted IDs.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorId {
    /// The declared path could not be mapped under the container root.
    E_PATH,
    /// Reading or setting permission bits failed.
    E_MODE,
    /// Reading or setting ownership failed.
    E_OWNERSHIP,
    /// The recursive walk was aborted.
    E_WALK,
}

#[must_use]
pub const fn id_str(id: ErrorId) -> &'static str {
    match id {
        ErrorId::E_PATH => "E_PATH",
        ErrorId::E_MODE => "E_MODE",
        ErrorId::E_OWNERSHIP => "E_OWNERSHIP",
        ErrorId::E_WALK => "E_WALK",
    }
}

#[must_use]
pub const fn exit_code_for(id: ErrorId) -> i32 {
    match id {
        ErrorId::E_PATH => 10,
        ErrorId::E_MODE => 20,
        ErrorId::E_OWNERSHIP => 30,
        ErrorId::E_WALK => 40,
    }
}

#[must_use]
pub fn exit_code_for_id_str(s: &str) -> Option<i32> {
    match s {
        "E_PATH" => Some(exit_code_for(ErrorId::E_PATH)),
        "E_MODE" => Some(exit_code_for(ErrorId::E_MODE)),
        "E_OWNERSHIP" => Some(exit_code_for(ErrorId::E_OWNERSHIP)),
        "E_WALK" => Some(exit_code_for(ErrorId::E_WALK)),
        _ => None,
    }
}

/// Exit code for a run: the highest code among requests that did not fully
/// succeed, or `None` when every request succeeded.
///
/// Taking the maximum keeps the result independent of request order.
#[must_use]
pub fn exit_code_for_report(report: &ApplyReport) -> Option<i32> {
    report
        .failed()
        .map(|r| r.error_id.and_then(exit_code_for_id_str).unwrap_or(1))
        .max()
}
