/// Whether the executor mutates the filesystem or only reports what it would change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApplyMode {
    DryRun,
    #[default]
    Commit,
}

impl ApplyMode {
    pub const fn is_dry_run(&self) -> bool {
        matches!(self, ApplyMode::DryRun)
    }
}
