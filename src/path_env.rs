use crate::config::InstallConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const PROFILE_FILES: [&str; 3] = [".profile", ".bashrc", ".zshrc"];
const MARKER: &str = "# added by lode-install";

/// Update PATH for this process and persist the change for future
/// shells. Everything here is best-effort; a failure is reported and the
/// install is still considered successful.
pub fn update_path(config: &InstallConfig, modify_profile: bool) {
    let current = std::env::var("PATH").unwrap_or_default();
    let rebuilt = rebuild_path(&current, &config.install_dir, &config.legacy_dir);
    if rebuilt != current {
        std::env::set_var("PATH", &rebuilt);
        tracing::debug!("Process PATH updated");
    }

    if !modify_profile {
        tracing::info!("Leaving shell profiles untouched (--no-modify-path)");
        return;
    }

    if let Err(e) = persist_path(config) {
        tracing::warn!(
            "Could not update the shell profile, add {} to PATH manually: {:#}",
            config.install_dir.display(),
            e
        );
    }
}

/// Rebuild a PATH string: drop entries equal to the install or legacy
/// directory, then append the install directory unless the filtered list
/// still mentions it somewhere.
pub fn rebuild_path(path_var: &str, install_dir: &Path, legacy_dir: &Path) -> String {
    let install = install_dir.to_string_lossy();
    let legacy = legacy_dir.to_string_lossy();

    let mut entries: Vec<&str> = path_var
        .split(':')
        .filter(|e| !e.is_empty() && *e != install && *e != legacy)
        .collect();

    let filtered = entries.join(":");
    if !filtered.contains(install.as_ref()) {
        entries.push(install.as_ref());
    }

    entries.join(":")
}

fn persist_path(config: &InstallConfig) -> Result<()> {
    let env_script = config.env_script_path();
    write_env_script(&env_script, &config.install_dir)?;

    let home = dirs::home_dir().context("Could not determine home directory")?;
    let source_line = format!(". \"{}\" {}", env_script.display(), MARKER);

    for name in PROFILE_FILES {
        let profile = home.join(name);
        // .profile is created when missing so at least one login shell
        // picks the change up; the others are only amended if present.
        if !profile.exists() && name != ".profile" {
            continue;
        }
        if ensure_source_line(&profile, &source_line)? {
            tracing::info!("Added PATH setup to {}", profile.display());
        }
    }

    Ok(())
}

/// Write the sh snippet that prepends the install directory to PATH when
/// it is not already there.
fn write_env_script(path: &Path, install_dir: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let script = format!(
        "#!/bin/sh\n\
         # lode shell setup\n\
         case \":${{PATH}}:\" in\n\
         \t*:\"{dir}\":*) ;;\n\
         \t*) export PATH=\"{dir}:$PATH\" ;;\n\
         esac\n",
        dir = install_dir.display()
    );

    fs::write(path, script).with_context(|| format!("Could not write {}", path.display()))
}

/// Keep exactly one marker-tagged line in `profile`: every previous
/// marker line (including ones pointing at a legacy location) is dropped
/// before `source_line` is appended. Returns whether the file changed.
pub(crate) fn ensure_source_line(profile: &Path, source_line: &str) -> Result<bool> {
    let original = if profile.exists() {
        fs::read_to_string(profile)
            .with_context(|| format!("Could not read {}", profile.display()))?
    } else {
        String::new()
    };

    let mut lines: Vec<&str> = original.lines().filter(|l| !l.contains(MARKER)).collect();
    lines.push(source_line);
    let rebuilt = format!("{}\n", lines.join("\n"));

    if original == rebuilt {
        return Ok(false);
    }

    fs::write(profile, rebuilt).with_context(|| format!("Could not write {}", profile.display()))?;
    Ok(true)
}
