//! Package manager resolution and installation.
//!
//! # Architecture
//!
//! - [`PackageManager`]: supported managers and their search/install
//!   command lines
//! - [`registry`]: the (OS, distro) -> candidate order table
//! - [`PackageInstaller`]: tries candidates in order, installing with the
//!   first one whose search finds the package
//!
//! Homebrew is always the first candidate, then the OS-native manager,
//! then any secondary manager (yay after pacman, nala after apt).

mod install;
mod manager;
pub mod registry;

pub use install::{InstallOutcome, PackageInstaller};
pub use manager::PackageManager;
