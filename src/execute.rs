use anyhow::{bail, Result};
use assetsync::directory::is_directory;
use assetsync::error::AssetsError;
use assetsync::installer::{AssetsInstaller, VendorDirInstallationManager};
use assetsync::logger::ConsoleLogger;
use assetsync::manifest::RootManifest;
use assetsync::status::{count_outcomes, DeclaredAssets, NamespaceOutcome};
use crate::cli::{AssetsCommand, CLI};

pub fn execute(cli: CLI) -> Result<()> {
    let project_root = match &cli.working_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let manifest_path = project_root.join(&cli.manifest);
    if !manifest_path.exists() {
        bail!("{} not found in {}", cli.manifest, project_root.display())
    }
    // stdout carries only the report with --json
    let json_report = matches!(cli.command, AssetsCommand::Install { json: true });
    let logger = ConsoleLogger::new(cli.quiet || json_report);
    let manifest = RootManifest::load(&manifest_path)?;
    let manager = VendorDirInstallationManager::new(&project_root, &manifest.config.vendor_dir);
    let installer = AssetsInstaller::new(manifest, manager, &logger)
        .with_manifest_name(cli.manifest.clone());

    match cli.command {
        AssetsCommand::Install { json } => {
            execute_install(installer, json)
        }
        AssetsCommand::Dirs => {
            execute_dirs(installer)
        }
        AssetsCommand::List => {
            execute_list(installer)
        }
    }
}

pub fn execute_install(mut installer: AssetsInstaller, json: bool) -> Result<()> {
    let report = installer.install()?;
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    let installed = count_outcomes(report, NamespaceOutcome::Installed);
    let failed = count_outcomes(report, NamespaceOutcome::Failed);
    let without_assets = report
        .values()
        .filter(|status| status.declared == DeclaredAssets::None)
        .count();
    println!(
        "{} installed, {} failed, {} packages without assets",
        installed, failed, without_assets
    );
    Ok(())
}

pub fn execute_dirs(installer: AssetsInstaller) -> Result<()> {
    for (namespace, dir) in installer.assets_directories().iter() {
        println!("{}: {}", namespace, dir);
    }
    Ok(())
}

pub fn execute_list(mut installer: AssetsInstaller) -> Result<()> {
    let dependencies = installer.dependencies();
    if dependencies.is_empty() {
        println!("No dependencies");
        return Ok(());
    }
    for dependency in &dependencies {
        println!("{}: {}", dependency.target, dependency.constraint);
        let assets = match installer.package_assets(dependency) {
            Ok(assets) => assets,
            Err(e @ AssetsError::PathDerivation { .. }) => return Err(e.into()),
            Err(e) => {
                println!("  could not read manifest: {}", e);
                continue;
            }
        };
        match assets {
            Some(assets) => {
                for (namespace, relative) in assets.iter() {
                    let source = installer.source_path(&dependency.target, relative)?;
                    let state = if is_directory(&source) { "" } else { " (missing)" };
                    match installer.destination_path(&dependency.target, namespace)? {
                        Some(destination) => {
                            println!("  {}: {} -> {}{}", namespace, relative, destination, state);
                        }
                        None => {
                            println!("  {}: {} (namespace not set in project){}", namespace, relative, state);
                        }
                    }
                }
            }
            None => {
                println!("  no assets");
            }
        }
    }
    Ok(())
}
