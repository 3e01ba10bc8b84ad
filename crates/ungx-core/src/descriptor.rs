use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Result, UngxError};

pub const DESCRIPTOR_FILE: &str = "package.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub canonical_path: String,
    pub origin: String,
    pub package_dir: String,
}

#[derive(Debug, Deserialize)]
struct DescriptorFile {
    gx: Option<DescriptorGxSection>,
}

#[derive(Debug, Deserialize)]
struct DescriptorGxSection {
    #[serde(rename = "dvcsimport")]
    dvcs_import: Option<String>,
}

impl PackageDescriptor {
    pub fn hash_reference(&self) -> String {
        format!("{}/{}", origin_reference(&self.origin), self.package_dir)
    }

    pub fn read(origin_dir: &Path) -> Result<Self> {
        let origin = origin_dir
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| UngxError::ManifestMissing {
                path: origin_dir.to_path_buf(),
                reason: "origin directory has no name".to_string(),
            })?;

        let package_dir = single_package_dir(origin_dir)?;
        let descriptor_path = origin_dir.join(&package_dir).join(DESCRIPTOR_FILE);
        let content = match fs::read_to_string(&descriptor_path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(UngxError::ManifestMissing {
                    path: descriptor_path,
                    reason: "descriptor file not found".to_string(),
                });
            }
            Err(err) => {
                return Err(UngxError::ManifestMalformed {
                    path: descriptor_path,
                    reason: format!("unreadable descriptor: {err}"),
                });
            }
        };

        let canonical_path = parse_canonical_path(&content).map_err(|reason| {
            UngxError::ManifestMalformed {
                path: descriptor_path.clone(),
                reason,
            }
        })?;

        Ok(Self {
            canonical_path,
            origin,
            package_dir,
        })
    }
}

pub fn origin_reference(origin: &str) -> String {
    format!("gx/ipfs/{origin}")
}

pub fn read_descriptors(packages_root: &Path) -> Result<Vec<PackageDescriptor>> {
    // already converted
    if !packages_root.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(packages_root).map_err(|err| UngxError::ManifestMissing {
        path: packages_root.to_path_buf(),
        reason: format!("failed listing packages: {err}"),
    })?;

    let mut origin_dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| UngxError::ManifestMissing {
            path: packages_root.to_path_buf(),
            reason: format!("failed listing packages: {err}"),
        })?;
        if entry.path().is_dir() {
            origin_dirs.push(entry.path());
        }
    }
    origin_dirs.sort();

    origin_dirs
        .iter()
        .map(|origin_dir| PackageDescriptor::read(origin_dir))
        .collect()
}

fn single_package_dir(origin_dir: &Path) -> Result<String> {
    let entries = fs::read_dir(origin_dir).map_err(|err| UngxError::ManifestMissing {
        path: origin_dir.to_path_buf(),
        reason: format!("failed listing package contents: {err}"),
    })?;

    let mut dirs: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| UngxError::ManifestMissing {
            path: origin_dir.to_path_buf(),
            reason: format!("failed listing package contents: {err}"),
        })?;
        if entry.path().is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();

    match dirs.as_slice() {
        [] => Err(UngxError::ManifestMissing {
            path: origin_dir.to_path_buf(),
            reason: "no package directory".to_string(),
        }),
        [only] => Ok(only
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()),
        _ => Err(UngxError::ManifestMalformed {
            path: origin_dir.to_path_buf(),
            reason: format!("expected one package directory, found {}", dirs.len()),
        }),
    }
}

pub(crate) fn parse_canonical_path(content: &str) -> std::result::Result<String, String> {
    let file: DescriptorFile =
        serde_json::from_str(content).map_err(|err| format!("invalid descriptor json: {err}"))?;
    let canonical_path = file
        .gx
        .and_then(|gx| gx.dvcs_import)
        .map(|path| path.trim().trim_end_matches('/').to_string())
        .unwrap_or_default();

    if canonical_path.is_empty() {
        return Err("descriptor lacks gx.dvcsimport".to_string());
    }
    validate_canonical_path(&canonical_path)?;
    Ok(canonical_path)
}

// The canonical path becomes a directory under vendor/ or gxlibs/.
fn validate_canonical_path(path: &str) -> std::result::Result<(), String> {
    if path.starts_with('/') || path.contains('\\') {
        return Err(format!("canonical path must be a relative import path: '{path}'"));
    }
    if path
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(format!("canonical path has an invalid segment: '{path}'"));
    }
    if path.chars().any(|ch| ch.is_whitespace() || ch == '"') {
        return Err(format!("canonical path contains invalid character(s): '{path}'"));
    }
    Ok(())
}
