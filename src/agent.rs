use crate::config::InstallConfig;
use crate::download::download_with_retries;
use crate::prompt::Confirm;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::process::Command;

/// Offer the optional background agent. The agent ships its own remote
/// installer script; by the time this runs the CLI install is complete,
/// so nothing here is allowed to fail the run.
pub async fn offer_agent_install(config: &InstallConfig, prompt: &dyn Confirm) {
    match prompt.confirm("Install the lode background agent?", false) {
        Ok(true) => {}
        Ok(false) => {
            tracing::info!("Skipping agent install");
            return;
        }
        Err(e) => {
            tracing::warn!("Could not read answer, skipping agent install: {:#}", e);
            return;
        }
    }

    if let Err(e) = install_agent(config).await {
        tracing::warn!("Agent install failed (the lode CLI itself is installed): {:#}", e);
    }
}

async fn install_agent(config: &InstallConfig) -> Result<()> {
    let script_path =
        download_with_retries(config, &config.agent_installer_url, "agent installer").await?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&script_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script_path, perms)?;
    }

    // Runs the remote script with the caller's full environment and
    // privileges.
    let status = Command::new("sh")
        .arg(&script_path)
        .status()
        .context("Could not execute the agent installer")?;

    let _ = fs::remove_file(&script_path);

    if !status.success() {
        return Err(anyhow!("Agent installer exited with {}", status));
    }

    tracing::info!("Agent installed");
    Ok(())
}
