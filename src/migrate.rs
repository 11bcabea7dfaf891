use crate::config::InstallConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Move a legacy `~/.lode` installation into the current install
/// directory. Best-effort: a failed migration is reported and the run
/// carries on, since the fresh install below supersedes it anyway.
pub fn migrate_legacy_install(config: &InstallConfig) {
    if !config.legacy_dir.exists() {
        tracing::debug!("No legacy installation at {}", config.legacy_dir.display());
        return;
    }

    tracing::info!(
        "Migrating legacy installation from {} to {}",
        config.legacy_dir.display(),
        config.install_dir.display()
    );

    if let Err(e) = migrate(config) {
        tracing::warn!("Migration failed, continuing: {:#}", e);
    }
}

fn migrate(config: &InstallConfig) -> Result<()> {
    fs::create_dir_all(&config.install_dir).with_context(|| {
        format!(
            "Could not create install directory {}",
            config.install_dir.display()
        )
    })?;

    copy_tree(&config.legacy_dir, &config.install_dir)?;

    fs::remove_dir_all(&config.legacy_dir).with_context(|| {
        format!(
            "Could not remove legacy directory {}",
            config.legacy_dir.display()
        )
    })?;

    tracing::info!("Removed legacy directory {}", config.legacy_dir.display());
    Ok(())
}

/// Recursive copy, overwriting entries that already exist under `dst`.
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src)?;
        if rel.as_os_str().is_empty() {
            continue;
        }

        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Could not copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        }
    }
    Ok(())
}
