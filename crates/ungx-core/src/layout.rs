use std::path::{Path, PathBuf};

pub const EMBED_DIR: &str = "gxlibs";
pub const HASH_EMBED_DIR: &str = "ipfs";

pub fn embed_reference(root_identity: &str, canonical_path: &str) -> String {
    format!("{root_identity}/{EMBED_DIR}/{canonical_path}")
}

pub fn hash_embed_reference(root_identity: &str, origin: &str) -> String {
    format!("{root_identity}/{EMBED_DIR}/{HASH_EMBED_DIR}/{origin}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn vendor_dir(&self) -> PathBuf {
        self.root.join("vendor")
    }

    pub fn gx_packages_dir(&self) -> PathBuf {
        self.vendor_dir().join("gx").join("ipfs")
    }

    pub fn origin_dir(&self, origin: &str) -> PathBuf {
        self.gx_packages_dir().join(origin)
    }

    pub fn embed_dir(&self) -> PathBuf {
        self.root.join(EMBED_DIR)
    }

    pub fn hash_embed_dir(&self) -> PathBuf {
        self.embed_dir().join(HASH_EMBED_DIR)
    }

    pub fn vendor_path(&self, canonical_path: &str) -> PathBuf {
        join_import_path(&self.vendor_dir(), canonical_path)
    }

    pub fn embed_path(&self, canonical_path: &str) -> PathBuf {
        join_import_path(&self.embed_dir(), canonical_path)
    }

    pub fn hash_embed_path(&self, origin: &str) -> PathBuf {
        self.hash_embed_dir().join(origin)
    }
}

fn join_import_path(base: &Path, import_path: &str) -> PathBuf {
    import_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(base.to_path_buf(), |path, segment| path.join(segment))
}
