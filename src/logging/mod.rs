pub mod audit;
pub mod facts;
pub mod level;

pub use audit::{AuditCtx, Decision, EventBuilder, Stage, StageLogger};
pub use facts::{DiagnosticSink, FactsEmitter, LogSink, NullSink};
pub use level::parse_log_level;
