use crate::config::{InstallConfig, ARTIFACT_NAME};
use crate::platform::{Arch, PLATFORM};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Release artifacts live at
/// `<base>/<version>/lode-<version>-linux-<arch>.tar.gz`.
pub fn build_artifact_url(base: &str, version: &str, arch: Arch) -> String {
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        version,
        artifact_file_name(version, arch)
    )
}

pub fn artifact_file_name(version: &str, arch: Arch) -> String {
    format!(
        "{}-{}-{}-{}.tar.gz",
        ARTIFACT_NAME,
        version,
        PLATFORM,
        arch.tag()
    )
}

/// Fetch a URL to a uniquely named temporary file, retrying on failure.
/// Each attempt restarts the download from the beginning; the delay
/// between attempts is fixed. The caller owns the returned file.
pub async fn download_with_retries(
    config: &InstallConfig,
    url: &str,
    display_name: &str,
) -> Result<PathBuf> {
    let (_file, temp_path) = tempfile::Builder::new()
        .prefix("lode-")
        .tempfile()
        .context("Could not create temporary download file")?
        .keep()
        .context("Could not persist temporary download file")?;

    let result = retry_fixed(config.download_retries, config.retry_delay, || {
        download_file(url, &temp_path, display_name)
    })
    .await;

    match result {
        Ok(()) => Ok(temp_path),
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            Err(e).with_context(|| {
                format!(
                    "Download of {} failed after {} attempt(s)",
                    url,
                    config.download_retries.max(1)
                )
            })
        }
    }
}

/// Run `op` up to `attempts` times with a fixed delay between tries,
/// propagating the last error. No backoff, no partial resume.
pub(crate) async fn retry_fixed<T, F, Fut>(attempts: u32, delay: Duration, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts => {
                tracing::warn!(
                    "Attempt {}/{} failed: {:#}. Retrying in {:?}...",
                    attempt,
                    attempts,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn download_file(url: &str, local_path: &Path, display_name: &str) -> Result<()> {
    tracing::info!("Downloading {}...", display_name);

    let response = reqwest::get(url).await?.error_for_status()?;
    let total_size = response.content_length().unwrap_or(0);

    let pb = ProgressBar::new(total_size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} {spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap()
            .progress_chars("#>-")
    );
    pb.set_message(format!("Downloading {}", display_name));

    let mut file = fs::File::create(local_path)?;
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();

    use futures_util::StreamExt;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
        pb.set_position(downloaded);
    }

    pb.finish_with_message("Download complete");
    Ok(())
}
