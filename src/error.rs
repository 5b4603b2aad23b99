//! Error types for package resolution and installation.

use thiserror::Error;

use crate::package::PackageManager;
use crate::system::HostOs;

/// Errors surfaced to the user. Each variant carries enough context to
/// produce a human-readable message naming the package and the reason.
#[derive(Debug, Error)]
pub enum HopsError {
    /// The host OS or distro could not be determined. Fatal for the whole
    /// invocation, not just a single package.
    #[error("unable to determine host system: {0}")]
    Probe(String),

    /// No registry entry exists for this (OS, distro) combination.
    #[error("no package manager known for {os}/{distro}")]
    UnsupportedPlatform { os: HostOs, distro: String },

    /// Every candidate manager was either missing or could not find the
    /// package. Zero install actions were performed.
    #[error("package '{package}' was not found by any package manager on {os}/{distro}")]
    PackageNotFound {
        package: String,
        os: HostOs,
        distro: String,
    },

    /// The selected manager ran its install command and exited non-zero.
    /// Output is surfaced verbatim; no retries are attempted.
    #[error("{manager} failed to install '{package}':\n{output}")]
    InstallFailed {
        package: String,
        manager: PackageManager,
        output: String,
    },
}
