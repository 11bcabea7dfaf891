use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const APP_NAME: &str = "lode";
pub const LEGACY_DIR_NAME: &str = ".lode";
pub const ARTIFACT_NAME: &str = "lode";

const DEFAULT_RELEASE_API: &str = "https://api.github.com/repos/lode-sh/lode/releases/latest";
const DEFAULT_ARTIFACT_BASE: &str = "https://github.com/lode-sh/lode/releases/download";
const DEFAULT_AGENT_INSTALLER_URL: &str = "https://get.lode.sh/agent-install.sh";
const DEFAULT_DOWNLOAD_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY_SECS: u64 = 2;

/// Minimum glibc the released binaries link against.
pub const MIN_GLIBC: (u32, u32) = (2, 17);

/// Everything a run needs to know, resolved once in `main` and handed to
/// each step by reference. `LODE_INSTALL_*` environment variables
/// override the defaults.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    pub install_dir: PathBuf,
    pub legacy_dir: PathBuf,
    pub release_api: String,
    pub artifact_base: String,
    pub agent_installer_url: String,
    pub min_glibc: (u32, u32),
    pub download_retries: u32,
    pub retry_delay: Duration,
}

impl InstallConfig {
    pub fn resolve() -> Result<Self> {
        let install_dir = match std::env::var_os("LODE_INSTALL_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .ok_or_else(|| anyhow!("Could not determine data directory"))?
                .join(APP_NAME)
                .join("bin"),
        };

        let legacy_dir = match std::env::var_os("LODE_INSTALL_LEGACY_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?
                .join(LEGACY_DIR_NAME),
        };

        let release_api = std::env::var("LODE_INSTALL_RELEASE_API")
            .unwrap_or_else(|_| DEFAULT_RELEASE_API.to_string());
        let artifact_base = std::env::var("LODE_INSTALL_ARTIFACT_BASE")
            .unwrap_or_else(|_| DEFAULT_ARTIFACT_BASE.to_string());
        let agent_installer_url = std::env::var("LODE_INSTALL_AGENT_URL")
            .unwrap_or_else(|_| DEFAULT_AGENT_INSTALLER_URL.to_string());

        let download_retries = std::env::var("LODE_INSTALL_DOWNLOAD_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_DOWNLOAD_RETRIES);

        let retry_delay = std::env::var("LODE_INSTALL_RETRY_DELAY_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_RETRY_DELAY_SECS));

        let config = Self {
            install_dir,
            legacy_dir,
            release_api,
            artifact_base,
            agent_installer_url,
            min_glibc: MIN_GLIBC,
            download_retries,
            retry_delay,
        };

        tracing::debug!("Install directory: {}", config.install_dir.display());
        tracing::debug!("Legacy directory: {}", config.legacy_dir.display());
        Ok(config)
    }

    /// The sourced shell snippet sits next to `bin`, under the app's
    /// data directory.
    pub fn env_script_path(&self) -> PathBuf {
        match self.install_dir.parent() {
            Some(parent) => parent.join("env"),
            None => self.install_dir.join("env"),
        }
    }
}
