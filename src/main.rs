mod completions;
mod config;
mod error;
mod exec;
mod info;
mod package;
mod progress;
mod system;

use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;

use crate::completions::SupportedShell;
use crate::config::HopsConfig;
use crate::error::HopsError;
use crate::exec::{DuctRunner, PathProbe};
use crate::package::PackageInstaller;
use crate::system::SystemInfo;

/// hops main parser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Activate debug mode
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install packages with the first manager that can find them
    Install {
        /// Packages to install; defaults to the configured package list
        packages: Vec<String>,

        /// Show which manager would be used without installing
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the detected host system and package manager availability
    Info {
        /// Re-probe the host instead of using the cached snapshot
        #[arg(long)]
        refresh: bool,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: SupportedShell,
    },
}

/// Used by the completions module to render the full command tree.
pub fn cli_command() -> clap::Command {
    Cli::command()
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        eprintln!("Debug mode is on");
    }

    let exit_code = match cli.command {
        Some(Commands::Install { packages, dry_run }) => run_install(packages, dry_run, cli.debug),
        Some(Commands::Info { refresh }) => match SystemInfo::load_or_detect(refresh) {
            Ok(system_info) => match info::run(&system_info, &PathProbe) {
                Ok(()) => 0,
                Err(e) => {
                    eprintln!("{} {}", "Error:".red(), e);
                    1
                }
            },
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
                1
            }
        },
        Some(Commands::Completions { shell }) => match completions::generate(shell) {
            Ok(script) => {
                print!("{}", script);
                0
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
                1
            }
        },
        None => {
            println!("hops: run with --help for usage");
            0
        }
    };

    std::process::exit(exit_code);
}

/// Install a batch of packages sequentially. One failing package does not
/// abort the rest; only a probe failure does.
fn run_install(packages: Vec<String>, dry_run: bool, debug: bool) -> i32 {
    let packages = match resolve_package_list(packages) {
        Ok(packages) => packages,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            return 1;
        }
    };

    if packages.is_empty() {
        eprintln!("No packages requested and no defaults configured");
        return 1;
    }

    let system_info = match SystemInfo::load_or_detect(false) {
        Ok(system_info) => system_info,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            return 1;
        }
    };
    if debug {
        eprintln!("Detected host: {}", system_info);
    }

    let runner = DuctRunner;
    let probe = PathProbe;
    let installer = PackageInstaller::new(&system_info, &runner, &probe).with_debug(debug);

    let mut failures = 0;
    for package in &packages {
        // Failures are scoped to one request; keep going with the rest
        if let Err(e) = install_one(&installer, package, dry_run, debug) {
            eprintln!("{} {}", "Error:".red(), e);
            failures += 1;
        }
    }

    if failures > 0 { 1 } else { 0 }
}

fn install_one(
    installer: &PackageInstaller,
    package: &str,
    dry_run: bool,
    debug: bool,
) -> Result<(), HopsError> {
    if dry_run {
        let manager = installer.resolve(package)?;
        println!("Would install package: {} (via {})", package, manager);
        return Ok(());
    }

    let spinner = if debug {
        None
    } else {
        Some(progress::create_spinner(format!(
            "Installing {}...",
            package
        )))
    };

    let result = installer.install(package);

    if let Some(pb) = spinner {
        progress::clear_spinner(pb);
    }

    let outcome = result?;
    println!(
        "{} Successfully installed package: {} {}",
        "✓".green(),
        package,
        format!("(via {})", outcome.manager).dimmed()
    );
    Ok(())
}

/// An explicit package list wins; otherwise fall back to the config file.
fn resolve_package_list(packages: Vec<String>) -> anyhow::Result<Vec<String>> {
    if !packages.is_empty() {
        return Ok(packages);
    }
    let config = HopsConfig::load()?;
    Ok(config.packages)
}
