use crate::config::InstallConfig;
use crate::prompt::Confirm;
use anyhow::{anyhow, Result};
use console::style;
use regex::Regex;
use std::process::Command;

/// Outcome of the environment checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preflight {
    Continue,
    Cancelled,
}

/// Validate the host before touching anything. A glibc older than the
/// release builds support is fatal; running as root only costs a
/// confirmation.
pub fn run(config: &InstallConfig, prompt: &dyn Confirm) -> Result<Preflight> {
    check_runtime_version(config)?;

    if is_elevated() && !skip_privilege_check() {
        eprintln!(
            "{} running as root installs lode for the root user only",
            style("warning:").yellow().bold()
        );
        if !prompt.confirm("Continue anyway?", false)? {
            println!("Installation cancelled.");
            return Ok(Preflight::Cancelled);
        }
    }

    Ok(Preflight::Continue)
}

fn check_runtime_version(config: &InstallConfig) -> Result<()> {
    let (min_major, min_minor) = config.min_glibc;
    match glibc_version() {
        Some((major, minor)) => {
            tracing::debug!("Detected glibc {}.{}", major, minor);
            if (major, minor) < (min_major, min_minor) {
                return Err(anyhow!(
                    "glibc {}.{} is below the required minimum {}.{}",
                    major,
                    minor,
                    min_major,
                    min_minor
                ));
            }
            Ok(())
        }
        None => {
            tracing::warn!("Could not determine the glibc version; skipping the check");
            Ok(())
        }
    }
}

fn is_elevated() -> bool {
    unsafe { libc::geteuid() == 0 }
}

// Only the test runner should set this
fn skip_privilege_check() -> bool {
    std::env::var("LODE_INSTALL_SKIP_PRIVILEGE_CHECK")
        .map(|v| v == "yes")
        .unwrap_or(false)
}

/// Get the host glibc version from `ldd --version`.
fn glibc_version() -> Option<(u32, u32)> {
    let output = Command::new("ldd").arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8(output.stdout).ok()?;
    parse_glibc_version_line(stdout.lines().next()?)
}

/// The version number is the last `major.minor` pair on the first line,
/// e.g. "ldd (Ubuntu GLIBC 2.35-0ubuntu3.8) 2.35".
pub(crate) fn parse_glibc_version_line(line: &str) -> Option<(u32, u32)> {
    let re = Regex::new(r"(\d+)\.(\d+)").ok()?;
    let caps = re.captures_iter(line).last()?;

    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = caps.get(2)?.as_str().parse().ok()?;
    Some((major, minor))
}
