#![forbid(unsafe_code)]
//! mount-chown: reconcile ownership and permission bits of container paths
//! from declarative annotations, as an OCI runtime hook.
//!
//! Pipeline:
//! - `parse`: flat `com.launchplatform.oci-hooks.mount-chown.<name>.<argument>`
//!   annotations become validated [`ChownRequest`](types::ChownRequest)s keyed
//!   by path. Malformed entries are dropped with a diagnostic.
//! - `api`: [`MountChown`] applies each request under the container root,
//!   recursively or root-only, skipping entries already in the requested state
//!   and isolating failures per request.
//!
//! Diagnostics go through an injected [`DiagnosticSink`](logging::DiagnosticSink);
//! structured per-request facts through a [`FactsEmitter`](logging::FactsEmitter).

pub mod adapters;
pub mod api;
pub mod constants;
pub mod fs;
pub mod logging;
pub mod oci;
pub mod parse;
pub mod types;

pub use api::*;
