use crate::config::{InstallConfig, ARTIFACT_NAME};
use anyhow::{anyhow, Context, Result};
use flate2::read::GzDecoder;
use std::fs;
use std::io;
use std::path::Path;
use tar::Archive;

/// Unpack the downloaded archive into the install directory and drop the
/// temporary file. Extraction failure is fatal and leaves the temp file
/// behind for manual recovery.
pub fn install_artifact(
    config: &InstallConfig,
    archive_path: &Path,
    archive_name: &str,
) -> Result<()> {
    tracing::info!(
        "Extracting {} to {}...",
        archive_name,
        config.install_dir.display()
    );

    fs::create_dir_all(&config.install_dir).with_context(|| {
        format!(
            "Could not create install directory {}",
            config.install_dir.display()
        )
    })?;

    if let Err(e) = extract_archive(archive_path, archive_name, &config.install_dir) {
        tracing::error!(
            "Extraction failed; the downloaded archive is kept at {}",
            archive_path.display()
        );
        return Err(e);
    }

    // Cleanup is best-effort; a stale temp file does not affect the install.
    if let Err(e) = fs::remove_file(archive_path) {
        tracing::debug!("Could not remove {}: {}", archive_path.display(), e);
    }

    let binary = config.install_dir.join(ARTIFACT_NAME);
    if binary.is_file() {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&binary)?.permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&binary, perms)?;
        }
    }

    Ok(())
}

fn extract_archive(archive_path: &Path, archive_name: &str, extract_dir: &Path) -> Result<()> {
    let name = archive_name.to_lowercase();

    if name.ends_with(".zip") {
        extract_zip(archive_path, extract_dir)
    } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        extract_tar_gz(archive_path, extract_dir)
    } else if name.ends_with(".tar.xz") {
        extract_tar_xz(archive_path, extract_dir)
    } else {
        Err(anyhow!("Unsupported archive format: {}", archive_name))
    }
}

fn extract_zip(archive_path: &Path, extract_dir: &Path) -> Result<()> {
    let file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let outpath = extract_dir.join(file.name());

        // Security check for path traversal
        if !outpath.starts_with(extract_dir) {
            tracing::warn!("Skipping malicious path in zip: {}", file.name());
            continue;
        }

        if file.name().ends_with('/') {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = fs::File::create(&outpath)?;
            io::copy(&mut file, &mut outfile)?;
        }
    }

    Ok(())
}

fn extract_tar_gz(archive_path: &Path, extract_dir: &Path) -> Result<()> {
    let file = fs::File::open(archive_path)?;
    let decoder = GzDecoder::new(file);
    let mut archive = Archive::new(decoder);

    archive.unpack(extract_dir)?;

    Ok(())
}

fn extract_tar_xz(archive_path: &Path, extract_dir: &Path) -> Result<()> {
    let file = fs::File::open(archive_path)?;
    let decoder = xz2::read::XzDecoder::new(file);
    let mut archive = Archive::new(decoder);

    archive.unpack(extract_dir)?;

    Ok(())
}
