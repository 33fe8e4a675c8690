// Typed fact emission for the parse and apply stages.
//
// Every fact carries a minimal envelope: `schema_version`, `ts`, `stage`,
// `decision`, `path` and `dry_run`. Callers add stage-specific fields through
// `EventBuilder`.
use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::constants::{FACTS_SCHEMA_VERSION, FACTS_SUBSYSTEM};
use crate::logging::FactsEmitter;

pub const TS_ZERO: &str = "1970-01-01T00:00:00Z";

pub fn now_iso() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| TS_ZERO.to_string())
}

pub struct AuditCtx<'a> {
    pub facts: &'a dyn FactsEmitter,
    pub ts: String,
    pub dry_run: bool,
}

impl<'a> AuditCtx<'a> {
    pub fn new(facts: &'a dyn FactsEmitter, dry_run: bool) -> Self {
        Self {
            facts,
            ts: now_iso(),
            dry_run,
        }
    }
}

/// Stage for typed audit emission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    ParseResult,
    ApplyAttempt,
    ApplyResult,
    ApplySummary,
}

impl Stage {
    pub const fn as_event(&self) -> &'static str {
        match self {
            Stage::ParseResult => "parse.result",
            Stage::ApplyAttempt => "apply.attempt",
            Stage::ApplyResult => "apply.result",
            Stage::ApplySummary => "apply.summary",
        }
    }
}

/// Decision severity for audit events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Success,
    Failure,
    Warn,
}

impl Decision {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Decision::Success => "success",
            Decision::Failure => "failure",
            Decision::Warn => "warn",
        }
    }
}

/// Builder facade over fact emission with a centralized envelope.
pub struct StageLogger<'a> {
    ctx: &'a AuditCtx<'a>,
}

impl<'a> StageLogger<'a> {
    pub fn new(ctx: &'a AuditCtx<'a>) -> Self {
        Self { ctx }
    }

    pub fn parse_result(&'a self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::ParseResult)
    }
    pub fn apply_attempt(&'a self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::ApplyAttempt)
    }
    pub fn apply_result(&'a self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::ApplyResult)
    }
    pub fn apply_summary(&'a self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::ApplySummary)
    }
}

pub struct EventBuilder<'a> {
    ctx: &'a AuditCtx<'a>,
    stage: Stage,
    fields: serde_json::Map<String, Value>,
}

impl<'a> EventBuilder<'a> {
    fn new(ctx: &'a AuditCtx<'a>, stage: Stage) -> Self {
        let mut fields = serde_json::Map::new();
        fields.insert("stage".to_string(), json!(stage.as_event()));
        Self { ctx, stage, fields }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.fields.insert("name".into(), json!(name.into()));
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.fields.insert("path".into(), json!(path.into()));
        self
    }

    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn merge(mut self, extra: &Value) -> Self {
        if let Some(obj) = extra.as_object() {
            for (k, v) in obj {
                self.fields.insert(k.clone(), v.clone());
            }
        }
        self
    }

    pub fn emit(self, decision: Decision) {
        let mut fields = self.fields;
        fields.entry("decision").or_insert(json!(decision.as_str()));
        fields
            .entry("schema_version")
            .or_insert(json!(FACTS_SCHEMA_VERSION));
        fields.entry("ts").or_insert(json!(self.ctx.ts));
        fields.entry("path").or_insert(json!(""));
        fields.entry("dry_run").or_insert(json!(self.ctx.dry_run));
        self.ctx.facts.emit(
            FACTS_SUBSYSTEM,
            self.stage.as_event(),
            decision.as_str(),
            Value::Object(fields),
        );
    }

    pub fn emit_success(self) {
        self.emit(Decision::Success)
    }
    pub fn emit_failure(self) {
        self.emit(Decision::Failure)
    }
    pub fn emit_warn(self) {
        self.emit(Decision::Warn)
    }
}
