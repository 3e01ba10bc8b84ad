use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use ungx_core::{read_descriptors, ProjectLayout};
use ungx_installer::{relocate_all, ImportRewriter, RewriteReport};
use ungx_registry::{
    resolve_root_identity, run_dependency_installer, DisposableWorkspace, SourceProbe,
};
use ungx_resolver::{
    classify_collisions, EmbedProbe, PackagePlan, PlacementPlanner, PlannerOptions, PlanSummary,
    RewriteMap,
};

use crate::config::RunOptions;

#[derive(Debug, Clone)]
pub(crate) struct ConversionOutcome {
    pub root_identity: String,
    pub plans: Vec<PackagePlan>,
    pub rewrite_map: RewriteMap,
    pub summary: PlanSummary,
    pub relocated: Vec<PathBuf>,
    pub report: Option<RewriteReport>,
}

pub(crate) fn run_conversion(options: &RunOptions) -> Result<ConversionOutcome> {
    let layout = ProjectLayout::new(&options.root);

    let root_identity = resolve_root_identity(&options.probe.go_binary, layout.root())
        .context("failed to resolve package import path")?;
    info!(root = %root_identity, "resolved package import path");

    if options.skip_install {
        info!("skipping gx install");
    } else {
        run_dependency_installer(&options.gx_binary, layout.root())
            .context("failed to vendor dependencies")?;
    }

    let probe: Box<dyn EmbedProbe> = if options.enable_embedding {
        let workspace =
            DisposableWorkspace::create().context("failed to create temporary workspace")?;
        Box::new(
            SourceProbe::new(options.probe.clone(), workspace)
                .context("failed to prepare source probe")?,
        )
    } else {
        Box::new(|_: &str| false)
    };

    convert_tree(options, &layout, &root_identity, probe.as_ref())
}

pub(crate) fn convert_tree(
    options: &RunOptions,
    layout: &ProjectLayout,
    root_identity: &str,
    probe: &dyn EmbedProbe,
) -> Result<ConversionOutcome> {
    let descriptors = read_descriptors(&layout.gx_packages_dir())
        .context("failed to read package definitions")?;
    let tally = classify_collisions(&descriptors);
    for (canonical_path, count) in tally.collisions() {
        info!(canonical_path, versions = count, "colliding package versions");
    }

    info!("converting gx dependencies to canonical paths");
    let planner = PlacementPlanner::new(
        PlannerOptions {
            enable_embedding: options.enable_embedding,
        },
        root_identity,
        probe,
    );
    let plans = planner.plan_all(&descriptors, &tally);
    let rewrite_map = RewriteMap::from_plans(&plans);
    let summary = PlanSummary::from_plans(&plans);

    if options.dry_run {
        return Ok(ConversionOutcome {
            root_identity: root_identity.to_string(),
            plans,
            rewrite_map,
            summary,
            relocated: Vec::new(),
            report: None,
        });
    }

    let relocated = relocate_all(layout, &plans).context("failed to move packages")?;
    info!(moved = relocated.len(), "packages relocated");

    let rewriter = ImportRewriter::new(&rewrite_map, root_identity, options.fork.as_deref())
        .context("failed to prepare import rewrite")?
        .with_extensions(options.source_extensions.iter().cloned());
    let report = rewriter
        .rewrite_tree(layout.root())
        .context("failed to rewrite import paths")?;
    info!(
        vendored = summary.vendored,
        embedded = summary.embedded,
        hash_embedded = summary.hash_embedded,
        kept = summary.kept,
        moved = relocated.len(),
        scanned_files = report.scanned_files,
        rewritten_files = report.rewritten_files.len(),
        "conversion complete"
    );

    Ok(ConversionOutcome {
        root_identity: root_identity.to_string(),
        plans,
        rewrite_map,
        summary,
        relocated,
        report: Some(report),
    })
}
