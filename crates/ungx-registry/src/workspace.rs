use std::path::Path;

use tempfile::TempDir;
use ungx_core::{Result, UngxError};

#[derive(Debug)]
pub struct DisposableWorkspace {
    dir: TempDir,
}

impl DisposableWorkspace {
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("ungx-")
            .tempdir()
            .map_err(|err| UngxError::Workspace {
                reason: format!("failed creating temporary workspace: {err}"),
            })?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
