//! The search-then-install loop over candidate managers.

use crate::error::HopsError;
use crate::exec::{CommandProbe, CommandRunner};
use crate::system::SystemInfo;

use super::{PackageManager, registry};

/// Result of a successful installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub manager: PackageManager,
    pub output: String,
}

/// Installs packages by delegating to the first candidate manager that can
/// find them.
///
/// Holds only borrowed collaborators so tests can substitute fakes for the
/// command runner and the PATH probe.
pub struct PackageInstaller<'a> {
    info: &'a SystemInfo,
    runner: &'a dyn CommandRunner,
    probe: &'a dyn CommandProbe,
    debug: bool,
}

impl<'a> PackageInstaller<'a> {
    pub fn new(
        info: &'a SystemInfo,
        runner: &'a dyn CommandRunner,
        probe: &'a dyn CommandProbe,
    ) -> Self {
        Self {
            info,
            runner,
            probe,
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Find the manager that would be used for this package without
    /// installing anything.
    pub fn resolve(&self, package: &str) -> Result<PackageManager, HopsError> {
        self.find_provider(package)
    }

    /// Install a package with the first candidate manager whose search
    /// finds it. At most one install action runs per request, and only
    /// after that manager's search succeeded.
    pub fn install(&self, package: &str) -> Result<InstallOutcome, HopsError> {
        let manager = self.find_provider(package)?;

        let (program, args) = manager.install_command(package);
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let output =
            self.runner
                .run(program, &arg_refs)
                .map_err(|e| HopsError::InstallFailed {
                    package: package.to_string(),
                    manager,
                    output: e.to_string(),
                })?;

        if !output.success() {
            return Err(HopsError::InstallFailed {
                package: package.to_string(),
                manager,
                output: output.combined(),
            });
        }

        Ok(InstallOutcome {
            manager,
            output: output.stdout,
        })
    }

    /// Walk the candidate order. A missing binary or a failing search both
    /// skip to the next candidate; only exhausting the list is an error.
    fn find_provider(&self, package: &str) -> Result<PackageManager, HopsError> {
        let order = registry::resolve_order(self.info.os, &self.info.distro)?;

        for manager in order {
            if !self.probe.has(manager.command()) {
                if self.debug {
                    eprintln!("{} not on PATH, skipping", manager.command());
                }
                continue;
            }

            let (program, args) = manager.search_command(package);
            let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
            let found = match self.runner.run(program, &arg_refs) {
                Ok(output) => manager.search_confirms(package, &output),
                // Spawn failure counts as "not found here"
                Err(_) => false,
            };

            if found {
                return Ok(manager);
            }
            if self.debug {
                eprintln!("{} does not provide '{}'", manager, package);
            }
        }

        Err(HopsError::PackageNotFound {
            package: package.to_string(),
            os: self.info.os,
            distro: self.info.distro.clone(),
        })
    }
}
