//! Host system probing.
//!
//! [`SystemInfo`] is captured once per process and treated as read-only
//! afterwards. A JSON snapshot can be cached on disk to skip re-probing
//! across invocations; the cache is an optimization, never a requirement.

mod cache;

pub use cache::{cache_path, load_cached, store_cache};

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::HopsError;
use crate::exec::{CommandRunner, DuctRunner};

/// Operating system family of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostOs {
    Linux,
    Darwin,
    Windows,
}

impl HostOs {
    /// Detect the OS family of the running process.
    pub fn current() -> Result<Self, HopsError> {
        match std::env::consts::OS {
            "linux" => Ok(Self::Linux),
            "macos" => Ok(Self::Darwin),
            "windows" => Ok(Self::Windows),
            other => Err(HopsError::Probe(format!(
                "unsupported operating system '{}'",
                other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Darwin => "darwin",
            Self::Windows => "windows",
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Immutable snapshot of the host system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: HostOs,
    pub distro: String,
    pub platform_version: String,
}

impl SystemInfo {
    /// Probe the running host. Fails only when the OS is unrecognized or a
    /// Linux host has no usable /etc/os-release.
    pub fn detect() -> Result<Self, HopsError> {
        let os = HostOs::current()?;
        match os {
            HostOs::Linux => Self::detect_linux(),
            HostOs::Darwin => Ok(Self {
                os,
                distro: "macos".to_string(),
                platform_version: macos_version(&DuctRunner).unwrap_or_default(),
            }),
            HostOs::Windows => Ok(Self {
                os,
                distro: "windows".to_string(),
                platform_version: String::new(),
            }),
        }
    }

    /// Load the cached snapshot if one exists, otherwise probe and cache.
    /// Cache read and write failures fall through silently; only the probe
    /// itself can fail.
    pub fn load_or_detect(refresh: bool) -> Result<Self, HopsError> {
        if !refresh
            && let Ok(path) = cache_path()
            && let Some(info) = load_cached(&path)
        {
            return Ok(info);
        }

        let info = Self::detect()?;
        if let Ok(path) = cache_path() {
            let _ = store_cache(&path, &info);
        }
        Ok(info)
    }

    fn detect_linux() -> Result<Self, HopsError> {
        let os_release = Path::new("/etc/os-release");
        let content = fs::read_to_string(os_release)
            .map_err(|e| HopsError::Probe(format!("reading /etc/os-release: {}", e)))?;

        let (distro, version) = parse_os_release(&content);
        let distro = distro
            .ok_or_else(|| HopsError::Probe("no ID field in /etc/os-release".to_string()))?;

        Ok(Self {
            os: HostOs::Linux,
            distro,
            platform_version: version.unwrap_or_default(),
        })
    }
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.platform_version.is_empty() {
            write!(f, "{}/{}", self.os, self.distro)
        } else {
            write!(f, "{}/{} {}", self.os, self.distro, self.platform_version)
        }
    }
}

/// Parse os-release content into a distro id and version.
///
/// An unknown ID falls back through ID_LIKE to the family root so that
/// derivative distros resolve to the package manager of their base.
fn parse_os_release(content: &str) -> (Option<String>, Option<String>) {
    let mut id = None;
    let mut id_like = String::new();
    let mut version = None;

    for line in content.lines() {
        if let Some(val) = line.strip_prefix("ID=") {
            id = Some(val.trim_matches('"').to_string());
        } else if let Some(val) = line.strip_prefix("ID_LIKE=") {
            id_like = val.trim_matches('"').to_string();
        } else if let Some(val) = line.strip_prefix("VERSION_ID=") {
            version = Some(val.trim_matches('"').to_string());
        }
    }

    let id = id.filter(|v| !v.is_empty());

    let distro = match id {
        Some(id) if known_distro(&id) => Some(id),
        other => {
            // Family fallback for unrecognized derivatives
            if id_like.contains("arch") {
                Some("arch".to_string())
            } else if id_like.contains("ubuntu") {
                Some("ubuntu".to_string())
            } else if id_like.contains("debian") {
                Some("debian".to_string())
            } else {
                other
            }
        }
    };

    (distro, version)
}

fn known_distro(id: &str) -> bool {
    matches!(
        id,
        "arch"
            | "manjaro"
            | "endeavouros"
            | "garuda"
            | "instantos"
            | "debian"
            | "ubuntu"
            | "pop"
            | "linuxmint"
            | "raspbian"
    )
}

/// Best-effort macOS version via sw_vers. None on any failure.
fn macos_version(runner: &dyn CommandRunner) -> Option<String> {
    let output = runner.run("sw_vers", &["-productVersion"]).ok()?;
    if !output.success() {
        return None;
    }
    Some(output.stdout.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::CommandOutput;

    #[test]
    fn test_parse_arch() {
        let content = r#"NAME="Arch Linux"
PRETTY_NAME="Arch Linux"
ID=arch
BUILD_ID=rolling
HOME_URL="https://archlinux.org/""#;
        let (distro, version) = parse_os_release(content);
        assert_eq!(distro.as_deref(), Some("arch"));
        assert_eq!(version, None);
    }

    #[test]
    fn test_parse_ubuntu() {
        let content = r#"PRETTY_NAME="Ubuntu 22.04.3 LTS"
NAME="Ubuntu"
VERSION_ID="22.04"
VERSION="22.04.3 LTS (Jammy Jellyfish)"
ID=ubuntu
ID_LIKE=debian
UBUNTU_CODENAME=jammy"#;
        let (distro, version) = parse_os_release(content);
        assert_eq!(distro.as_deref(), Some("ubuntu"));
        assert_eq!(version.as_deref(), Some("22.04"));
    }

    #[test]
    fn test_parse_unknown_arch_derivative() {
        let content = r#"NAME="Custom Arch"
ID="customarch"
ID_LIKE="arch""#;
        let (distro, _) = parse_os_release(content);
        // Falls back to the family root for unknown arch-based distros
        assert_eq!(distro.as_deref(), Some("arch"));
    }

    #[test]
    fn test_parse_unknown_without_family() {
        let content = r#"NAME="Gentoo"
ID=gentoo"#;
        let (distro, _) = parse_os_release(content);
        // Kept verbatim; the registry decides whether it is supported
        assert_eq!(distro.as_deref(), Some("gentoo"));
    }

    #[test]
    fn test_parse_missing_id() {
        let (distro, version) = parse_os_release("NAME=\"Mystery\"\n");
        assert_eq!(distro, None);
        assert_eq!(version, None);
    }

    #[test]
    fn test_macos_version_trims_runner_output() {
        struct VersionRunner {
            status: i32,
        }
        impl CommandRunner for VersionRunner {
            fn run(&self, _program: &str, _args: &[&str]) -> anyhow::Result<CommandOutput> {
                Ok(CommandOutput {
                    status: self.status,
                    stdout: "14.5\n".to_string(),
                    stderr: String::new(),
                })
            }
        }

        let version = macos_version(&VersionRunner { status: 0 });
        assert_eq!(version.as_deref(), Some("14.5"));

        // Non-zero exit means no version, not a garbage string
        assert_eq!(macos_version(&VersionRunner { status: 1 }), None);
    }

    #[test]
    fn test_host_os_display() {
        assert_eq!(HostOs::Linux.to_string(), "linux");
        assert_eq!(HostOs::Darwin.to_string(), "darwin");
        assert_eq!(HostOs::Windows.to_string(), "windows");
    }

    #[test]
    fn test_system_info_display() {
        let info = SystemInfo {
            os: HostOs::Linux,
            distro: "arch".to_string(),
            platform_version: String::new(),
        };
        assert_eq!(info.to_string(), "linux/arch");

        let info = SystemInfo {
            os: HostOs::Linux,
            distro: "ubuntu".to_string(),
            platform_version: "22.04".to_string(),
        };
        assert_eq!(info.to_string(), "linux/ubuntu 22.04");
    }
}
