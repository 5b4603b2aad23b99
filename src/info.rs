//! The `hops info` command - host snapshot and manager availability.

use anyhow::Result;
use colored::Colorize;

use crate::exec::CommandProbe;
use crate::package::{PackageManager, registry};
use crate::system::SystemInfo;

pub fn run(info: &SystemInfo, probe: &dyn CommandProbe) -> Result<()> {
    println!("{}", "Host".bold());
    println!("  os:      {}", info.os);
    println!("  distro:  {}", info.distro);
    if !info.platform_version.is_empty() {
        println!("  version: {}", info.platform_version);
    }

    println!();
    println!("{}", "Package managers".bold());
    for manager in PackageManager::ALL {
        let status = if probe.has(manager.command()) {
            "available".green()
        } else {
            "missing".dimmed()
        };
        println!("  {:<8} {}", manager.to_string(), status);
    }

    println!();
    match registry::resolve_order(info.os, &info.distro) {
        Ok(order) => {
            let names: Vec<&str> = order.iter().map(|m| m.display_name()).collect();
            println!("{} {}", "Candidate order:".bold(), names.join(" -> "));
        }
        Err(e) => println!("{} {}", "Candidate order:".bold(), e.to_string().red()),
    }

    Ok(())
}
