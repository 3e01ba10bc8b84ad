use std::time::Duration;

use tracing::{info, warn};
use ungx_core::{Result, UngxError, DESCRIPTOR_FILE};
use ungx_resolver::EmbedProbe;

use crate::go_ops::run_go_get;
use crate::DisposableWorkspace;

const GITHUB_PREFIX: &str = "github.com/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSettings {
    pub go_binary: String,
    pub raw_host: String,
    pub raw_branch: String,
    pub timeout: Duration,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            go_binary: "go".to_string(),
            raw_host: "https://raw.githubusercontent.com".to_string(),
            raw_branch: "master".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct SourceProbe {
    settings: ProbeSettings,
    client: reqwest::blocking::Client,
    workspace: DisposableWorkspace,
}

impl SourceProbe {
    pub fn new(settings: ProbeSettings, workspace: DisposableWorkspace) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| UngxError::ProbeSetup {
                reason: format!("failed building http client: {err}"),
            })?;
        Ok(Self {
            settings,
            client,
            workspace,
        })
    }

    pub fn host_probe_url(&self, canonical_path: &str) -> Option<String> {
        let repo_path = canonical_path.strip_prefix(GITHUB_PREFIX)?;
        Some(format!(
            "{}/{}/{}/{}",
            self.settings.raw_host.trim_end_matches('/'),
            repo_path,
            self.settings.raw_branch,
            DESCRIPTOR_FILE
        ))
    }

    fn descriptor_on_host(&self, url: &str) -> Result<bool> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| UngxError::ProbeNetwork {
                url: url.to_string(),
                reason: err.to_string(),
            })?;
        Ok(response.status().is_success())
    }

    fn descriptor_in_checkout(&self, canonical_path: &str) -> bool {
        let gopath = self.workspace.path();
        if !run_go_get(&self.settings.go_binary, gopath, canonical_path) {
            warn!(
                canonical_path,
                "failed fetching canonical source, assuming gx based"
            );
            return true;
        }

        let descriptor = canonical_path
            .split('/')
            .fold(gopath.join("src"), |path, segment| path.join(segment))
            .join(DESCRIPTOR_FILE);
        descriptor.exists()
    }
}

impl EmbedProbe for SourceProbe {
    fn needs_embedding(&self, canonical_path: &str) -> bool {
        info!(canonical_path, "deciding whether to vendor or embed");

        match self.host_probe_url(canonical_path) {
            Some(url) => match self.descriptor_on_host(&url) {
                Ok(found) => found,
                Err(err) => {
                    warn!(error = %err, "host probe failed, assuming gx based");
                    true
                }
            },
            None => self.descriptor_in_checkout(canonical_path),
        }
    }
}
