use ungx_core::PackageDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    InlineVendor(String),
    Embed(String),
    HashEmbed(String),
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InlineVendor(_) => "vendor",
            Self::Embed(_) => "embed",
            Self::HashEmbed(_) => "hash-embed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePlan {
    pub descriptor: PackageDescriptor,
    pub placement: Placement,
    // false only for vendor-only collisions
    pub relocate: bool,
    pub rewrites: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub vendored: usize,
    pub embedded: usize,
    pub hash_embedded: usize,
    pub kept: usize,
}

impl PlanSummary {
    pub fn from_plans(plans: &[PackagePlan]) -> Self {
        let mut summary = Self::default();
        for plan in plans {
            match (&plan.placement, plan.relocate) {
                (Placement::InlineVendor(_), _) => summary.vendored += 1,
                (Placement::Embed(_), _) => summary.embedded += 1,
                (Placement::HashEmbed(_), true) => summary.hash_embedded += 1,
                (Placement::HashEmbed(_), false) => summary.kept += 1,
            }
        }
        summary
    }
}
