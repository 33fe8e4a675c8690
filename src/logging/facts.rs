use log::Level;
use serde_json::Value;

/// Structured per-stage facts (parse, apply attempt/result, summary).
pub trait FactsEmitter {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value);
}

/// Leveled, human-readable diagnostics for every drop, skip and failure decision.
///
/// Passed explicitly into the parser and the executor; the core never calls
/// the `log` facade itself.
pub trait DiagnosticSink {
    fn log(&self, level: Level, msg: &str);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn log(&self, level: Level, msg: &str) {
        (**self).log(level, msg);
    }
}

impl<T: FactsEmitter + ?Sized> FactsEmitter for &T {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value) {
        (**self).emit(subsystem, event, decision, fields);
    }
}

/// Forwards diagnostics to the `log` facade and facts as debug-level JSON lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn log(&self, level: Level, msg: &str) {
        log::log!(target: "mount_chown", level, "{msg}");
    }
}

impl FactsEmitter for LogSink {
    fn emit(&self, subsystem: &str, event: &str, _decision: &str, fields: Value) {
        if log::log_enabled!(target: "mount_chown::facts", Level::Debug) {
            log::debug!(target: "mount_chown::facts", "{subsystem} {event} {fields}");
        }
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn log(&self, _level: Level, _msg: &str) {}
}

impl FactsEmitter for NullSink {
    fn emit(&self, _subsystem: &str, _event: &str, _decision: &str, _fields: Value) {}
}
