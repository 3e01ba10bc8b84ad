use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::bytes::{Captures, Regex};
use tracing::{debug, info};
use ungx_core::{Result, UngxError};
use ungx_resolver::RewriteMap;
use walkdir::WalkDir;

pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &["go"];

const IMPORT_MARKER_PATTERN: &str = r#"// import ".*""#;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub scanned_files: usize,
    pub rewritten_files: Vec<PathBuf>,
}

/// Rewrites quoted import references in one pass over each file's original content.
///
/// A reference matches when it follows a `"` and is followed by `/` or `"`, so a key never
/// matches a longer path that merely shares its prefix. Longer keys win over shorter ones.
#[derive(Debug, Clone)]
pub struct ImportRewriter {
    pattern: Option<Regex>,
    replacements: HashMap<String, String>,
    marker: Regex,
    extensions: Vec<String>,
}

impl ImportRewriter {
    pub fn new(map: &RewriteMap, root_identity: &str, fork: Option<&str>) -> Result<Self> {
        let fork = fork.filter(|fork| !fork.is_empty() && *fork != root_identity);

        let mut replacements: HashMap<String, String> = map
            .iter()
            .map(|(from, to)| (from.to_string(), apply_fork(to, root_identity, fork)))
            .collect();
        if let Some(fork) = fork {
            replacements
                .entry(root_identity.to_string())
                .or_insert_with(|| fork.to_string());
        }

        let mut keys: Vec<&str> = replacements.keys().map(String::as_str).collect();
        keys.sort_by(|left, right| right.len().cmp(&left.len()).then_with(|| left.cmp(right)));

        let pattern = if keys.is_empty() {
            None
        } else {
            let alternation = keys
                .iter()
                .map(|key| regex::escape(key))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = Regex::new(&format!(r#""({alternation})([/"])"#)).map_err(|err| {
                UngxError::RewritePattern {
                    reason: err.to_string(),
                }
            })?;
            Some(pattern)
        };
        let marker = Regex::new(IMPORT_MARKER_PATTERN).map_err(|err| UngxError::RewritePattern {
            reason: err.to_string(),
        })?;

        Ok(Self {
            pattern,
            replacements,
            marker,
            extensions: DEFAULT_SOURCE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        })
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(Into::into)
            .map(|ext: String| ext.trim_start_matches('.').to_string())
            .collect();
        self
    }

    pub fn rewrite_content(&self, content: &[u8]) -> Vec<u8> {
        let substituted = match &self.pattern {
            Some(pattern) => pattern
                .replace_all(content, |caps: &Captures| {
                    let key = String::from_utf8_lossy(&caps[1]);
                    let replacement = self
                        .replacements
                        .get(key.as_ref())
                        .map(String::as_str)
                        .unwrap_or(key.as_ref());
                    let mut out = Vec::with_capacity(replacement.len() + 2);
                    out.push(b'"');
                    out.extend_from_slice(replacement.as_bytes());
                    out.extend_from_slice(&caps[2]);
                    out
                })
                .into_owned(),
            None => content.to_vec(),
        };
        self.marker.replace_all(&substituted, &b""[..]).into_owned()
    }

    pub fn rewrite_file(&self, path: &Path) -> Result<bool> {
        let original = fs::read(path).map_err(|err| UngxError::rewrite("reading", path, err))?;
        let rewritten = self.rewrite_content(&original);
        if rewritten == original {
            return Ok(false);
        }
        fs::write(path, &rewritten).map_err(|err| UngxError::rewrite("writing", path, err))?;
        debug!(path = %path.display(), "rewrote import paths");
        Ok(true)
    }

    pub fn rewrite_tree(&self, root: &Path) -> Result<RewriteReport> {
        info!("rewriting import statements to canonical paths");

        let mut report = RewriteReport::default();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !(entry.file_type().is_dir() && entry.file_name() == ".git"));
        for entry in walker {
            let entry = entry.map_err(|err| {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
                UngxError::rewrite("walking", path, source)
            })?;
            if !entry.file_type().is_file() || !self.is_source_file(entry.path()) {
                continue;
            }

            report.scanned_files += 1;
            if self.rewrite_file(entry.path())? {
                report.rewritten_files.push(entry.path().to_path_buf());
            }
        }

        Ok(report)
    }

    fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }
}

// A replacement under the root identity follows the fork, matching a fork pass run after
// the hash rewrites.
fn apply_fork(value: &str, root_identity: &str, fork: Option<&str>) -> String {
    let Some(fork) = fork else {
        return value.to_string();
    };
    if value == root_identity {
        return fork.to_string();
    }
    match value.strip_prefix(root_identity) {
        Some(rest) if rest.starts_with('/') => format!("{fork}{rest}"),
        _ => value.to_string(),
    }
}
