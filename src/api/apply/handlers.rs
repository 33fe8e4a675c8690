use std::fs::Metadata;
use std::path::Path;

use log::Level;

use crate::adapters::OwnershipOps;
use crate::api::errors::{id_str, ErrorId};
use crate::fs::meta::kind_of;
use crate::fs::walk::walk_tree;
use crate::logging::DiagnosticSink;
use crate::types::{ChownPolicy, ChownRequest, Owner, RequestReport, SafePath};

/// Carries everything one request needs while it moves through
/// mode step, ownership step, then recursive or root-only handling.
pub(crate) struct Reconciler<'a> {
    pub ops: &'a dyn OwnershipOps,
    pub diag: &'a dyn DiagnosticSink,
    pub dry_run: bool,
}

impl Reconciler<'_> {
    /// Run one request to completion. Never panics and never aborts the caller:
    /// every failure ends up in the returned report.
    pub(crate) fn handle(&self, root: &Path, request: &ChownRequest) -> RequestReport {
        let mut report = RequestReport::new(&request.name, request.path.clone());

        let target = match SafePath::from_container(root, &request.path) {
            Ok(sp) => sp.as_path(),
            Err(e) => {
                let msg = format!(
                    "Failed to resolve {} under {} for {}: {e}",
                    request.path.display(),
                    root.display(),
                    request.name
                );
                self.diag.log(Level::Error, &msg);
                abort(&mut report, ErrorId::E_PATH, msg);
                return report.finish();
            }
        };

        if let Some(mode) = request.mode {
            self.apply_mode(&request.name, &target, mode, &mut report);
        }

        match request.effective_policy() {
            ChownPolicy::Recursive => {
                self.chown_recursive(&request.name, &target, request.owner, &mut report)
            }
            ChownPolicy::RootOnly => {
                self.chown_root_only(&request.name, &target, request.owner, &mut report)
            }
        }
        report.finish()
    }

    fn apply_mode(&self, name: &str, target: &Path, mode: u32, report: &mut RequestReport) {
        let md = match std::fs::symlink_metadata(target) {
            Ok(md) => md,
            Err(e) => {
                let msg = format!(
                    "Failed to get stat of {} ({}) for {name}: {e}",
                    target.display(),
                    kind_of(target)
                );
                self.diag.log(Level::Error, &msg);
                fail(report, ErrorId::E_MODE, msg);
                return;
            }
        };

        let current = self.ops.mode_of(target, &md);
        if current == mode {
            self.diag.log(
                Level::Debug,
                &format!(
                    "The same mode {mode:o} of {} for {name} found, skip",
                    target.display()
                ),
            );
            report.unchanged += 1;
            return;
        }
        // The link's own bits cannot be changed and its target may lie outside the root.
        if md.file_type().is_symlink() {
            let msg = format!(
                "Refusing to change mode of symlink {} from {current:o} to {mode:o} for {name}",
                target.display()
            );
            self.diag.log(Level::Warn, &msg);
            fail(report, ErrorId::E_MODE, msg);
            return;
        }
        if self.dry_run {
            self.diag.log(
                Level::Info,
                &format!(
                    "Would chmod {} from {current:o} to {mode:o} for {name}",
                    target.display()
                ),
            );
            report.changed += 1;
            return;
        }
        match self.ops.set_mode(target, mode) {
            Ok(()) => {
                self.diag.log(
                    Level::Debug,
                    &format!("Changed mode of {} to {mode:o} for {name}", target.display()),
                );
                report.changed += 1;
            }
            Err(e) => {
                let msg = format!(
                    "Failed to chmod {} for {name} with error {e}",
                    target.display()
                );
                self.diag.log(Level::Error, &msg);
                fail(report, ErrorId::E_MODE, msg);
            }
        }
    }

    fn chown_recursive(&self, name: &str, target: &Path, owner: Owner, report: &mut RequestReport) {
        for item in walk_tree(target) {
            match item {
                Ok(entry) => self.reconcile_owner(name, &entry.path, &entry.metadata, owner, report),
                Err(e) => {
                    let msg = format!(
                        "Failed to chown {} ({}) recursively for {name} with error {e}",
                        target.display(),
                        kind_of(target)
                    );
                    self.diag.log(Level::Error, &msg);
                    abort(report, ErrorId::E_WALK, msg);
                    return;
                }
            }
        }
    }

    fn chown_root_only(&self, name: &str, target: &Path, owner: Owner, report: &mut RequestReport) {
        match std::fs::symlink_metadata(target) {
            Ok(md) => self.reconcile_owner(name, target, &md, owner, report),
            Err(e) => {
                let msg = format!(
                    "Failed to get stat of {} ({}) for {name} with error {e}",
                    target.display(),
                    kind_of(target)
                );
                self.diag.log(Level::Error, &msg);
                abort(report, ErrorId::E_OWNERSHIP, msg);
            }
        }
    }

    /// Compare-and-set for a single entry.
    fn reconcile_owner(
        &self,
        name: &str,
        path: &Path,
        md: &Metadata,
        owner: Owner,
        report: &mut RequestReport,
    ) {
        let current = self.ops.owner_of(path, md);
        if current == owner {
            self.diag.log(
                Level::Debug,
                &format!(
                    "The same UID and GID of {} for {name} found, skip",
                    path.display()
                ),
            );
            report.unchanged += 1;
            return;
        }
        if self.dry_run {
            self.diag.log(
                Level::Info,
                &format!(
                    "Would chown {} from {current} to {owner} for {name}",
                    path.display()
                ),
            );
            report.changed += 1;
            return;
        }
        match self.ops.set_owner(path, owner) {
            Ok(()) => report.changed += 1,
            Err(e) => {
                let msg = format!(
                    "Failed to chown {} for {name} with error {e}",
                    path.display()
                );
                self.diag.log(Level::Error, &msg);
                fail(report, ErrorId::E_OWNERSHIP, msg);
            }
        }
    }
}

fn fail(report: &mut RequestReport, id: ErrorId, msg: String) {
    report.error_id.get_or_insert(id_str(id));
    report.failures.push(msg);
}

fn abort(report: &mut RequestReport, id: ErrorId, msg: String) {
    report.error_id = Some(id_str(id));
    report.error = Some(msg);
}
