mod plan;
mod rewrite_map;
mod tally;
mod types;

pub use plan::{EmbedProbe, PlacementPlanner, PlannerOptions};
pub use rewrite_map::RewriteMap;
pub use tally::{classify_collisions, VersionTally};
pub use types::{PackagePlan, Placement, PlanSummary};
