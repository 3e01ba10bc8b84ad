mod go_ops;
mod probe;
mod workspace;

pub use go_ops::{resolve_root_identity, run_dependency_installer};
pub use probe::{ProbeSettings, SourceProbe};
pub use workspace::DisposableWorkspace;
