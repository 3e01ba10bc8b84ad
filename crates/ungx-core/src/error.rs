use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = UngxError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum UngxError {
    #[error("installer-failure: '{command}' {detail}")]
    InstallerFailure { command: String, detail: String },

    #[error("root-identity-failed: '{command}' {detail}")]
    RootIdentity { command: String, detail: String },

    #[error("manifest-missing: {}: {reason}", .path.display())]
    ManifestMissing { path: PathBuf, reason: String },

    #[error("manifest-malformed: {}: {reason}", .path.display())]
    ManifestMalformed { path: PathBuf, reason: String },

    #[error("relocation-io-error: failed {action} {}", .path.display())]
    RelocationIo {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("rewrite-io-error: failed {action} {}", .path.display())]
    RewriteIo {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("rewrite-pattern-invalid: {reason}")]
    RewritePattern { reason: String },

    #[error("probe-network-error: {url}: {reason}")]
    ProbeNetwork { url: String, reason: String },

    #[error("probe-setup-failed: {reason}")]
    ProbeSetup { reason: String },

    #[error("workspace-error: {reason}")]
    Workspace { reason: String },

    #[error("config-error: {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

impl UngxError {
    pub fn relocation(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::RelocationIo {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn rewrite(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::RewriteIo {
            action,
            path: path.into(),
            source,
        }
    }
}
