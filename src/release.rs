use anyhow::Result;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Release metadata returned by the release endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseInfo {
    pub tag_name: String,
}

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("No published release found (status 404)")]
    NotFound,
    #[error("Release metadata request failed: {status}")]
    RequestFailed { status: StatusCode },
}

/// Resolve the latest released version from the metadata endpoint. Any
/// failure here is fatal to the run; nothing downstream can proceed
/// without a version.
pub async fn resolve_latest_version(release_api: &str) -> Result<String> {
    tracing::info!("Resolving the latest lode release...");

    let client = reqwest::Client::new();
    let response = client
        .get(release_api)
        .header("Accept", "application/vnd.github.v3+json")
        .header(
            "User-Agent",
            concat!("lode-install/", env!("CARGO_PKG_VERSION")),
        )
        .send()
        .await?;

    if !response.status().is_success() {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ReleaseError::NotFound.into());
        }
        return Err(ReleaseError::RequestFailed {
            status: response.status(),
        }
        .into());
    }

    let release: ReleaseInfo = response.json().await?;
    let version = strip_version_prefix(&release.tag_name).to_string();

    if semver::Version::parse(&version).is_err() {
        tracing::warn!("Release tag '{}' is not a semantic version", release.tag_name);
    }

    tracing::info!("Latest version: {}", version);
    Ok(version)
}

/// Strip a single leading `v` from a release tag: `v3.1.0` becomes
/// `3.1.0`, a bare `3.1.0` passes through unchanged.
pub fn strip_version_prefix(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}
