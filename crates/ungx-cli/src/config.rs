use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use ungx_core::UngxError;
use ungx_installer::DEFAULT_SOURCE_EXTENSIONS;
use ungx_registry::ProbeSettings;

use crate::Cli;

pub(crate) const DEFAULT_CONFIG_FILE: &str = "ungx.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    pub fork: Option<String>,
    pub embed: Option<bool>,
    pub gx_binary: Option<String>,
    pub go_binary: Option<String>,
    pub raw_host: Option<String>,
    pub raw_branch: Option<String>,
    pub source_extensions: Option<Vec<String>>,
    pub probe_timeout_secs: Option<u64>,
}

impl ConfigFile {
    pub(crate) fn from_toml_str(input: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(input).map_err(|err| err.to_string())?;
        if let Some(fork) = &config.fork {
            if fork.trim().is_empty() {
                return Err("fork must not be empty".to_string());
            }
        }
        if config
            .source_extensions
            .as_ref()
            .is_some_and(|extensions| extensions.is_empty())
        {
            return Err("source_extensions must list at least one extension".to_string());
        }
        Ok(config)
    }
}

pub(crate) fn load_config(root: &Path, explicit: Option<&Path>) -> Result<ConfigFile, UngxError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = root.join(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                return Ok(ConfigFile::default());
            }
            path
        }
    };

    let content = fs::read_to_string(&path).map_err(|err| UngxError::Config {
        path: path.clone(),
        reason: format!("failed reading config: {err}"),
    })?;
    ConfigFile::from_toml_str(&content).map_err(|reason| UngxError::Config { path, reason })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunOptions {
    pub root: PathBuf,
    pub fork: Option<String>,
    pub enable_embedding: bool,
    pub dry_run: bool,
    pub skip_install: bool,
    pub gx_binary: String,
    pub probe: ProbeSettings,
    pub source_extensions: Vec<String>,
}

impl RunOptions {
    pub(crate) fn resolve(cli: &Cli, file: ConfigFile) -> Self {
        let defaults = ProbeSettings::default();
        let probe = ProbeSettings {
            go_binary: file.go_binary.unwrap_or(defaults.go_binary),
            raw_host: file.raw_host.unwrap_or(defaults.raw_host),
            raw_branch: file.raw_branch.unwrap_or(defaults.raw_branch),
            timeout: file
                .probe_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        };

        Self {
            root: cli.root.clone(),
            fork: cli
                .fork
                .clone()
                .or(file.fork)
                .filter(|fork| !fork.trim().is_empty()),
            enable_embedding: !cli.no_embed && file.embed.unwrap_or(true),
            dry_run: cli.dry_run,
            skip_install: cli.skip_install,
            gx_binary: file.gx_binary.unwrap_or_else(|| "gx".to_string()),
            probe,
            source_extensions: file.source_extensions.unwrap_or_else(|| {
                DEFAULT_SOURCE_EXTENSIONS
                    .iter()
                    .map(|ext| ext.to_string())
                    .collect()
            }),
        }
    }
}
