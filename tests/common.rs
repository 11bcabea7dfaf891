use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

// Shared harness for the integration tests: every run gets its own HOME
// and data dir, and the remote endpoints are pointed at a local mock
// server through the LODE_INSTALL_* overrides.
#[allow(dead_code)]
pub struct TestContext {
    pub _temp_dir: TempDir,
    pub home: PathBuf,
    pub install_dir: PathBuf,
    pub legacy_dir: PathBuf,
    pub env_script: PathBuf,
    pub bin_path: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let home = temp_dir.path().join("home");
        std::fs::create_dir_all(&home).expect("Failed to create home dir");

        let install_dir = temp_dir.path().join("data/lode/bin");
        let legacy_dir = home.join(".lode");
        let env_script = temp_dir.path().join("data/lode/env");

        let bin_path = PathBuf::from(env!("CARGO_BIN_EXE_lode-install"));

        Self {
            _temp_dir: temp_dir,
            home,
            install_dir,
            legacy_dir,
            env_script,
            bin_path,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(&self.bin_path);
        cmd.env("HOME", &self.home);
        cmd.env("XDG_DATA_HOME", self._temp_dir.path().join("data"));
        cmd.env("LODE_INSTALL_DIR", &self.install_dir);
        cmd.env("LODE_INSTALL_LEGACY_DIR", &self.legacy_dir);
        cmd.env("LODE_INSTALL_RETRY_DELAY_SECS", "0");
        // CI containers run as root
        cmd.env("LODE_INSTALL_SKIP_PRIVILEGE_CHECK", "yes");
        // Prompts read EOF and fall back to their defaults
        cmd.stdin(Stdio::null());
        cmd
    }
}

#[allow(dead_code)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status,
        }
    }
}

#[allow(dead_code)]
impl CommandOutput {
    pub fn assert_success(&self) -> &Self {
        if !self.status.success() {
            panic!(
                "Command failed with status {:?}\nstdout: {}\nstderr: {}",
                self.status.code(),
                self.stdout,
                self.stderr
            );
        }
        self
    }

    pub fn assert_failure(&self) -> &Self {
        if self.status.success() {
            panic!(
                "Command unexpectedly succeeded\nstdout: {}\nstderr: {}",
                self.stdout, self.stderr
            );
        }
        self
    }

    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Stdout did not contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }
}
