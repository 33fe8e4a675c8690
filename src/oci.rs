//! OCI hook glue: decode the runtime state from stdin, load the bundle's
//! `config.json`, pick the requests that target declared mounts, and hand them
//! to the executor.
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::Level;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::errors::ApiError;
use crate::api::MountChown;
use crate::constants::OCI_CONFIG_FILE;
use crate::logging::{DiagnosticSink, FactsEmitter};
use crate::types::{ApplyReport, RequestMap};

#[derive(Debug, Error)]
pub enum HookError {
    #[error("failed to parse container state from stdin: {0}")]
    State(#[source] serde_json::Error),
    #[error("failed to open OCI spec file {}: {source}", .path.display())]
    OpenSpec {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse OCI spec JSON file {}: {source}", .path.display())]
    ParseSpec {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Container state a runtime writes to a hook's stdin.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    #[serde(default)]
    pub oci_version: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<i32>,
    pub bundle: PathBuf,
    #[serde(default)]
    pub annotations: HashMap<String, String>,
}

/// The subset of the runtime configuration the hook reads.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spec {
    #[serde(default)]
    pub oci_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<Root>,
    #[serde(default)]
    pub mounts: Vec<Mount>,
    #[serde(default)]
    pub annotations: HashMap<String, String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Root {
    pub path: PathBuf,
    #[serde(default)]
    pub readonly: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Mount {
    pub destination: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Decode the state from `input`, then the bundle's runtime configuration.
///
/// # Errors
///
/// Returns a [`HookError`] naming the payload or file that could not be read.
pub fn load_spec(input: impl Read) -> Result<(State, Spec), HookError> {
    let state: State = serde_json::from_reader(input).map_err(HookError::State)?;
    let path = state.bundle.join(OCI_CONFIG_FILE);
    let file = std::fs::File::open(&path).map_err(|source| HookError::OpenSpec {
        path: path.clone(),
        source,
    })?;
    let spec: Spec = serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(|source| HookError::ParseSpec { path, source })?;
    Ok((state, spec))
}

/// Host-visible root the declared paths are joined onto.
///
/// An explicit override wins; otherwise the configured root filesystem,
/// resolved against the bundle when relative; otherwise `/`.
pub fn resolve_container_root(state: &State, spec: &Spec, override_root: Option<&Path>) -> PathBuf {
    if let Some(root) = override_root {
        return root.to_path_buf();
    }
    match &spec.root {
        Some(root) if root.path.is_absolute() => root.path.clone(),
        Some(root) => state.bundle.join(&root.path),
        None => PathBuf::from("/"),
    }
}

/// Keep only requests whose path is a declared mount destination.
pub fn filter_by_mounts(
    mut requests: RequestMap,
    mounts: &[Mount],
    diag: &dyn DiagnosticSink,
) -> RequestMap {
    let mut selected = RequestMap::new();
    for mount in mounts {
        let destination = PathBuf::from(&mount.destination);
        match requests.remove(&destination) {
            Some(request) => {
                selected.insert(destination, request);
            }
            None => diag.log(
                Level::Trace,
                &format!("Cannot find mount point {} to chown, skip", mount.destination),
            ),
        }
    }
    for request in requests.values() {
        diag.log(
            Level::Debug,
            &format!(
                "Path {} for {} is not a mount point, skip",
                request.path.display(),
                request.name
            ),
        );
    }
    selected
}

/// Options the binary passes through from its command line.
#[derive(Clone, Debug, Default)]
pub struct HookOptions {
    /// Overrides the root resolved from the runtime configuration.
    pub container_root: Option<PathBuf>,
    /// Apply every valid request, not only those targeting declared mounts.
    pub all_paths: bool,
}

/// Run the hook end to end against a state payload.
///
/// # Errors
///
/// Fails only when the payload or configuration cannot be loaded, or the
/// resolved root is unusable. Per-request failures are in the report.
pub fn run_hook<E: FactsEmitter, D: DiagnosticSink>(
    input: impl Read,
    options: &HookOptions,
    api: &MountChown<E, D>,
) -> Result<ApplyReport, HookError> {
    let (state, spec) = load_spec(input)?;
    let requests = api.parse(&spec.annotations);
    let requests = if options.all_paths {
        requests
    } else {
        filter_by_mounts(requests, &spec.mounts, api.diag())
    };
    let root = resolve_container_root(&state, &spec, options.container_root.as_deref());
    api.diag().log(
        Level::Debug,
        &format!(
            "Applying {} chown requests for container {} under {}",
            requests.len(),
            state.id,
            root.display()
        ),
    );
    Ok(api.apply(&root, &requests)?)
}
