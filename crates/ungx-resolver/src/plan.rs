use tracing::info;
use ungx_core::{embed_reference, hash_embed_reference, origin_reference, PackageDescriptor};

use crate::{PackagePlan, Placement, VersionTally};

/// Decides whether a canonical path is itself gx based and so cannot be vendored.
///
/// Implementations resolve their own transport failures; a probe that cannot tell must
/// answer `true`.
pub trait EmbedProbe {
    fn needs_embedding(&self, canonical_path: &str) -> bool;
}

impl<F> EmbedProbe for F
where
    F: Fn(&str) -> bool,
{
    fn needs_embedding(&self, canonical_path: &str) -> bool {
        self(canonical_path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerOptions {
    pub enable_embedding: bool,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            enable_embedding: true,
        }
    }
}

pub struct PlacementPlanner<'a, P: EmbedProbe + ?Sized> {
    options: PlannerOptions,
    root_identity: &'a str,
    probe: &'a P,
}

impl<'a, P: EmbedProbe + ?Sized> PlacementPlanner<'a, P> {
    pub fn new(options: PlannerOptions, root_identity: &'a str, probe: &'a P) -> Self {
        Self {
            options,
            root_identity,
            probe,
        }
    }

    pub fn plan(&self, descriptor: &PackageDescriptor, tally: &VersionTally) -> PackagePlan {
        let origin = descriptor.origin.as_str();
        let canonical_path = descriptor.canonical_path.as_str();

        if tally.is_collision(canonical_path) {
            if !self.options.enable_embedding {
                info!(
                    origin,
                    canonical_path, "keeping colliding package hash addressed"
                );
                return PackagePlan {
                    descriptor: descriptor.clone(),
                    placement: Placement::HashEmbed(origin.to_string()),
                    relocate: false,
                    rewrites: Vec::new(),
                };
            }
            return PackagePlan {
                descriptor: descriptor.clone(),
                placement: Placement::HashEmbed(origin.to_string()),
                relocate: true,
                rewrites: vec![(
                    origin_reference(origin),
                    hash_embed_reference(self.root_identity, origin),
                )],
            };
        }

        if self.options.enable_embedding && self.probe.needs_embedding(canonical_path) {
            let embedded = embed_reference(self.root_identity, canonical_path);
            return PackagePlan {
                descriptor: descriptor.clone(),
                placement: Placement::Embed(canonical_path.to_string()),
                relocate: true,
                rewrites: vec![
                    (descriptor.hash_reference(), embedded.clone()),
                    (canonical_path.to_string(), embedded),
                ],
            };
        }

        PackagePlan {
            descriptor: descriptor.clone(),
            placement: Placement::InlineVendor(canonical_path.to_string()),
            relocate: true,
            rewrites: vec![(descriptor.hash_reference(), canonical_path.to_string())],
        }
    }

    pub fn plan_all(
        &self,
        descriptors: &[PackageDescriptor],
        tally: &VersionTally,
    ) -> Vec<PackagePlan> {
        descriptors
            .iter()
            .map(|descriptor| self.plan(descriptor, tally))
            .collect()
    }
}
