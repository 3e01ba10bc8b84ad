use ungx_resolver::{PackagePlan, Placement, RewriteMap};

use crate::pipeline::ConversionOutcome;

pub(crate) fn format_plan_lines(plans: &[PackagePlan], rewrite_map: &RewriteMap) -> Vec<String> {
    let mut lines = Vec::with_capacity(plans.len() + rewrite_map.len() + 1);
    for plan in plans {
        let origin = &plan.descriptor.origin;
        let line = match (&plan.placement, plan.relocate) {
            (Placement::HashEmbed(_), false) => format!(
                "{origin} -> keep (collision: {})",
                plan.descriptor.canonical_path
            ),
            (
                Placement::InlineVendor(target)
                | Placement::Embed(target)
                | Placement::HashEmbed(target),
                _,
            ) => format!("{origin} -> {} {target}", plan.placement.as_str()),
        };
        lines.push(line);
    }

    if !rewrite_map.is_empty() {
        lines.push("rewrites:".to_string());
        for (from, to) in rewrite_map.iter() {
            lines.push(format!("  \"{from}\" -> \"{to}\""));
        }
    }
    lines
}

pub(crate) fn format_summary_line(outcome: &ConversionOutcome) -> String {
    let summary = outcome.summary;
    let counts = format!(
        "vendored={} embedded={} hash-embedded={} kept={}",
        summary.vendored, summary.embedded, summary.hash_embedded, summary.kept
    );
    match &outcome.report {
        Some(report) => format!(
            "converted {}: {counts} moved={} scanned-files={} rewritten-files={}",
            outcome.root_identity,
            outcome.relocated.len(),
            report.scanned_files,
            report.rewritten_files.len()
        ),
        None => format!("planned {}: {counts} (dry run)", outcome.root_identity),
    }
}
