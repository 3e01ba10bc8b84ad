use std::collections::BTreeMap;

use ungx_core::PackageDescriptor;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionTally {
    counts: BTreeMap<String, usize>,
}

impl VersionTally {
    pub fn count(&self, canonical_path: &str) -> usize {
        self.counts.get(canonical_path).copied().unwrap_or(0)
    }

    pub fn is_collision(&self, canonical_path: &str) -> bool {
        self.count(canonical_path) > 1
    }

    pub fn collisions(&self) -> Vec<(&str, usize)> {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(path, count)| (path.as_str(), *count))
            .collect()
    }
}

pub fn classify_collisions(descriptors: &[PackageDescriptor]) -> VersionTally {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for descriptor in descriptors {
        *counts.entry(descriptor.canonical_path.clone()).or_default() += 1;
    }
    VersionTally { counts }
}
