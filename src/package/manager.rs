//! Package manager definitions - the command lines each manager uses to
//! probe availability, search for a package, and install it.

use std::fmt;

use crate::exec::CommandOutput;

/// All package managers hops knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    /// APT - Debian/Ubuntu family
    Apt,
    /// Homebrew - macOS and Linuxbrew, always tried first
    Brew,
    /// Nala - apt frontend, secondary on Debian family
    Nala,
    /// Pacman - Arch Linux family
    Pacman,
    /// Scoop - Windows
    Scoop,
    /// Yay - AUR helper, secondary on Arch family
    Yay,
}

impl PackageManager {
    pub const ALL: [PackageManager; 6] = [
        Self::Apt,
        Self::Brew,
        Self::Nala,
        Self::Pacman,
        Self::Scoop,
        Self::Yay,
    ];

    /// The binary probed for availability on PATH.
    pub fn command(&self) -> &'static str {
        match self {
            Self::Apt => "apt-get",
            Self::Brew => "brew",
            Self::Nala => "nala",
            Self::Pacman => "pacman",
            Self::Scoop => "scoop",
            Self::Yay => "yay",
        }
    }

    /// Command line that queries whether the package name resolves for
    /// this manager. Exits zero iff the package is known (brew and scoop
    /// additionally need an output match, see [`Self::search_confirms`]).
    pub fn search_command(&self, package: &str) -> (&'static str, Vec<String>) {
        match self {
            Self::Apt => ("apt-cache", str_args(&["show", package])),
            Self::Brew => ("brew", str_args(&["search", "--formula", package])),
            Self::Nala => ("nala", str_args(&["show", package])),
            Self::Pacman => ("pacman", str_args(&["-Si", package])),
            Self::Scoop => ("scoop", str_args(&["search", package])),
            Self::Yay => ("yay", str_args(&["-Si", package])),
        }
    }

    /// Command line that installs the package. Managers that need root run
    /// through sudo; all run non-interactively.
    pub fn install_command(&self, package: &str) -> (&'static str, Vec<String>) {
        match self {
            Self::Apt => ("sudo", str_args(&["apt-get", "install", "-y", package])),
            Self::Brew => ("brew", str_args(&["install", package])),
            Self::Nala => ("sudo", str_args(&["nala", "install", "-y", package])),
            Self::Pacman => ("sudo", str_args(&["pacman", "-S", "--noconfirm", package])),
            Self::Scoop => ("scoop", str_args(&["install", package])),
            Self::Yay => ("yay", str_args(&["-S", "--noconfirm", package])),
        }
    }

    /// Decide whether a finished search command actually found the package.
    ///
    /// A non-zero exit is always "not found". brew and scoop fuzzy-match
    /// and exit zero even without a hit, so their output must name the
    /// package exactly.
    pub fn search_confirms(&self, package: &str, output: &CommandOutput) -> bool {
        if !output.success() {
            return false;
        }
        match self {
            Self::Brew | Self::Scoop => output
                .stdout
                .lines()
                .any(|line| line.split_whitespace().any(|word| word == package)),
            Self::Apt | Self::Nala | Self::Pacman | Self::Yay => true,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Apt => "apt",
            Self::Brew => "brew",
            Self::Nala => "nala",
            Self::Pacman => "pacman",
            Self::Scoop => "scoop",
            Self::Yay => "yay",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

fn str_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(stdout: &str) -> CommandOutput {
        CommandOutput {
            status: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    #[test]
    fn test_install_commands() {
        let (program, args) = PackageManager::Brew.install_command("wget");
        assert_eq!(program, "brew");
        assert_eq!(args, vec!["install", "wget"]);

        let (program, args) = PackageManager::Pacman.install_command("git");
        assert_eq!(program, "sudo");
        assert_eq!(args, vec!["pacman", "-S", "--noconfirm", "git"]);

        let (program, args) = PackageManager::Apt.install_command("ripgrep");
        assert_eq!(program, "sudo");
        assert_eq!(args, vec!["apt-get", "install", "-y", "ripgrep"]);
    }

    #[test]
    fn test_search_commands() {
        let (program, args) = PackageManager::Yay.search_command("paru");
        assert_eq!(program, "yay");
        assert_eq!(args, vec!["-Si", "paru"]);

        let (program, args) = PackageManager::Brew.search_command("wget");
        assert_eq!(program, "brew");
        assert_eq!(args, vec!["search", "--formula", "wget"]);
    }

    #[test]
    fn test_search_confirms_requires_zero_exit() {
        let failed = CommandOutput {
            status: 1,
            stdout: "git".to_string(),
            stderr: String::new(),
        };
        for manager in PackageManager::ALL {
            assert!(!manager.search_confirms("git", &failed));
        }
    }

    #[test]
    fn test_brew_search_needs_exact_name_in_output() {
        assert!(PackageManager::Brew.search_confirms("wget", &found("wget\nwget2")));
        // brew fuzzy-matches, so near misses must not count
        assert!(!PackageManager::Brew.search_confirms("wget", &found("wget2\nwgetpaste")));
        assert!(!PackageManager::Brew.search_confirms("wget", &found("")));
    }

    #[test]
    fn test_exit_code_managers_trust_status() {
        assert!(PackageManager::Pacman.search_confirms("git", &found("")));
        assert!(PackageManager::Apt.search_confirms("git", &found("")));
    }
}
