use std::fmt;

/// Platform segment of the artifact file name. The released binaries are
/// single-target; only the architecture varies.
pub const PLATFORM: &str = "linux";

/// CPU architecture tag used to select the release artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X64,
    Arm64,
    X86,
}

impl Arch {
    /// Artifact name segment for this architecture.
    pub fn tag(self) -> &'static str {
        match self {
            Arch::X64 => "x64",
            Arch::Arm64 => "arm64",
            Arch::X86 => "x86",
        }
    }

    /// Map a processor-architecture label to a tag. Unrecognized labels
    /// fall back to x64.
    pub fn from_label(label: &str) -> Arch {
        match label.to_lowercase().as_str() {
            "x86_64" | "amd64" | "x64" => Arch::X64,
            "aarch64" | "arm64" => Arch::Arm64,
            "x86" | "i686" | "i386" => Arch::X86,
            other => {
                tracing::warn!("Unrecognized architecture '{}', defaulting to x64", other);
                Arch::X64
            }
        }
    }

    /// Detect the host architecture. `LODE_INSTALL_ARCH` wins over the
    /// compiled target so provisioning for another machine stays possible.
    pub fn detect() -> Arch {
        match std::env::var("LODE_INSTALL_ARCH") {
            Ok(label) => Arch::from_label(&label),
            Err(_) => Arch::from_label(std::env::consts::ARCH),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
