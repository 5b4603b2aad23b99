//! Static (OS, distro) -> candidate manager order table.

use crate::error::HopsError;
use crate::system::HostOs;

use super::PackageManager;

/// Distros whose native manager is pacman.
const ARCH_FAMILY: &[&str] = &["arch", "manjaro", "endeavouros", "garuda", "instantos"];

/// Distros whose native manager is apt.
const DEBIAN_FAMILY: &[&str] = &["debian", "ubuntu", "pop", "linuxmint", "raspbian"];

/// Resolve the priority order of candidate managers for a host.
///
/// Homebrew is always first, then the OS-native manager, then the
/// secondary manager (yay after pacman, nala after apt). The order is
/// deterministic; (OS, distro) pairs with no row are an
/// [`HopsError::UnsupportedPlatform`], which is terminal and never retried.
pub fn resolve_order(os: HostOs, distro: &str) -> Result<Vec<PackageManager>, HopsError> {
    use PackageManager::*;

    let order: &[PackageManager] = match os {
        HostOs::Linux if ARCH_FAMILY.contains(&distro) => &[Brew, Pacman, Yay],
        HostOs::Linux if DEBIAN_FAMILY.contains(&distro) => &[Brew, Apt, Nala],
        HostOs::Darwin => &[Brew],
        HostOs::Windows => &[Brew, Scoop],
        HostOs::Linux => {
            return Err(HopsError::UnsupportedPlatform {
                os,
                distro: distro.to_string(),
            });
        }
    };

    Ok(order.to_vec())
}
