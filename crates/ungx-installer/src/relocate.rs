use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;
use ungx_core::{ProjectLayout, Result, UngxError};
use ungx_resolver::{PackagePlan, Placement};

pub fn relocate_package(layout: &ProjectLayout, plan: &PackagePlan) -> Result<Option<PathBuf>> {
    if !plan.relocate {
        return Ok(None);
    }

    let descriptor = &plan.descriptor;
    let origin_dir = layout.origin_dir(&descriptor.origin);
    let destination = match &plan.placement {
        Placement::InlineVendor(canonical_path) => {
            let destination = layout.vendor_path(canonical_path);
            info!(
                "vendoring {} to vendor/{}",
                descriptor.hash_reference(),
                canonical_path
            );
            move_dir(&origin_dir.join(&descriptor.package_dir), &destination)?;
            remove_empty_origin(&origin_dir)?;
            destination
        }
        Placement::Embed(canonical_path) => {
            let destination = layout.embed_path(canonical_path);
            info!(
                "embedding {} to gxlibs/{}",
                descriptor.hash_reference(),
                canonical_path
            );
            move_dir(&origin_dir.join(&descriptor.package_dir), &destination)?;
            remove_empty_origin(&origin_dir)?;
            destination
        }
        Placement::HashEmbed(origin) => {
            let destination = layout.hash_embed_path(origin);
            info!("embedding gx/ipfs/{origin} to gxlibs/ipfs/{origin}");
            move_dir(&origin_dir, &destination)?;
            destination
        }
    };

    Ok(Some(destination))
}

pub fn relocate_all(layout: &ProjectLayout, plans: &[PackagePlan]) -> Result<Vec<PathBuf>> {
    let mut moved = Vec::new();
    for plan in plans {
        if let Some(destination) = relocate_package(layout, plan)? {
            moved.push(destination);
        }
    }
    Ok(moved)
}

fn move_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        return Err(UngxError::relocation(
            "reading",
            from,
            io::Error::new(io::ErrorKind::NotFound, "package directory not found"),
        ));
    }
    if to.exists() {
        return Err(UngxError::relocation(
            "moving onto",
            to,
            io::Error::new(io::ErrorKind::AlreadyExists, "destination already exists"),
        ));
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| UngxError::relocation("creating", parent, err))?;
    }
    fs::rename(from, to).map_err(|err| UngxError::relocation("moving", from, err))
}

fn remove_empty_origin(origin_dir: &Path) -> Result<()> {
    fs::remove_dir(origin_dir).map_err(|err| UngxError::relocation("removing", origin_dir, err))
}
