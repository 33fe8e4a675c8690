//! Request parser: flat namespaced annotations to validated ownership-change requests.
//!
//! Keys look like `<ANNOTATION_PREFIX><name>.<argument>`. Keys outside the
//! prefix are ignored. Every malformed value or incomplete group degrades to
//! "dropped plus diagnostic"; parsing itself never fails.
//!
//! Submodules:
//! - `values`: owner, mode and path value parsers
//! - `builder`: per-name draft accumulation and finalization

pub mod builder;
pub mod values;

use std::collections::HashMap;

use log::Level;

use crate::constants::{ANNOTATION_PREFIX, ARG_MODE, ARG_OWNER, ARG_PATH, ARG_POLICY};
use crate::logging::DiagnosticSink;
use crate::types::RequestMap;

pub use builder::RequestBuilder;
pub use values::{parse_mode, parse_owner, parse_path};

/// Parse annotations into requests keyed by declared path.
///
/// When two names declare the same path only one request survives; which one
/// depends on map iteration order and is deliberately left unspecified.
pub fn parse_chown_requests<I, K, V>(annotations: I, diag: &dyn DiagnosticSink) -> RequestMap
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut drafts: HashMap<String, RequestBuilder> = HashMap::new();

    for (key, value) in annotations {
        let (key, value) = (key.as_ref(), value.as_ref());
        let Some(suffix) = key.strip_prefix(ANNOTATION_PREFIX) else {
            continue;
        };
        let Some((name, arg)) = suffix.split_once('.') else {
            diag.log(
                Level::Warn,
                &format!("Annotation {key} has no argument suffix, ignored"),
            );
            continue;
        };

        match arg {
            ARG_PATH => match parse_path(value) {
                Ok(path) => {
                    draft(&mut drafts, name).path(path);
                }
                Err(e) => diag.log(
                    Level::Warn,
                    &format!("Invalid path argument for {name}, only abs path allowed, ignored: {e}"),
                ),
            },
            ARG_OWNER => match parse_owner(value) {
                Ok(owner) => {
                    draft(&mut drafts, name).owner(owner);
                }
                Err(e) => diag.log(
                    Level::Warn,
                    &format!("Invalid owner argument for {name}, ignored: {e}"),
                ),
            },
            ARG_POLICY => {
                draft(&mut drafts, name).policy(value);
            }
            ARG_MODE => match parse_mode(value) {
                Ok(mode) => {
                    draft(&mut drafts, name).mode(mode);
                }
                Err(e) => diag.log(
                    Level::Warn,
                    &format!("Invalid mode argument for {name}, ignored: {e}"),
                ),
            },
            other => diag.log(
                Level::Warn,
                &format!("Invalid chown argument {other} for request {name}, ignored"),
            ),
        }
    }

    let mut requests = RequestMap::new();
    for draft in drafts.into_values() {
        let name = draft.name().to_string();
        match draft.build() {
            Ok(request) => {
                let path = request.path.clone();
                if let Some(prev) = requests.insert(path.clone(), request) {
                    diag.log(
                        Level::Warn,
                        &format!(
                            "Path {} declared by both {} and {name}, keeping {name}",
                            path.display(),
                            prev.name
                        ),
                    );
                }
            }
            Err(problems) => {
                for problem in problems {
                    diag.log(Level::Warn, &format!("Dropping request {name}: {problem}"));
                }
            }
        }
    }
    requests
}

fn draft<'a>(drafts: &'a mut HashMap<String, RequestBuilder>, name: &str) -> &'a mut RequestBuilder {
    drafts
        .entry(name.to_string())
        .or_insert_with(|| RequestBuilder::new(name))
}
