use std::collections::BTreeMap;

use tracing::debug;

use crate::PackagePlan;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteMap {
    entries: BTreeMap<String, String>,
}

impl RewriteMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_plans(plans: &[PackagePlan]) -> Self {
        let mut map = Self::new();
        for plan in plans {
            for (from, to) in &plan.rewrites {
                map.insert(from.clone(), to.clone());
            }
        }
        map
    }

    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) -> Option<String> {
        let from = from.into();
        let to = to.into();
        debug!(from = %from, to = %to, "rewrite entry");
        let previous = self.entries.insert(from.clone(), to.clone());
        if let Some(previous) = previous.as_deref() {
            if previous != to {
                debug!(from = %from, previous = %previous, "rewrite entry replaced");
            }
        }
        previous
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(from, to)| (from.as_str(), to.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
