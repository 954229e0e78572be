// src/main.rs

use clap::{Parser, Subcommand};
use rypm::manager::PackageManager;
use rypm::source::SourceKind;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "rypm")]
#[command(author, version, about = "Multi-source package manager for project-local modules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Install a package from its source registry
    Install {
        /// Package name
        package: String,
        /// Package source type
        #[arg(short, long, visible_alias = "type", value_enum, default_value_t = SourceKind::Ryton)]
        source: SourceKind,
        /// Project root directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },
    /// Remove an installed package
    Remove {
        /// Package name
        package: String,
        /// Package source type
        #[arg(short, long, visible_alias = "type", value_enum, default_value_t = SourceKind::Ryton)]
        source: SourceKind,
        /// Project root directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },
    /// List installed packages
    List {
        /// Restrict listing to one source (all sources if omitted)
        #[arg(short, long, visible_alias = "type", value_enum)]
        source: Option<SourceKind>,
        /// Project root directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },
    /// Install a module directly from a GitHub reference
    Github {
        /// owner/repo shorthand or full repository URL
        reference: String,
        /// Package source type
        #[arg(short, long, visible_alias = "type", value_enum, default_value_t = SourceKind::Ryton)]
        source: SourceKind,
        /// Project root directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },
    /// Reconcile the manifest against the on-disk module tree
    Repair {
        /// Project root directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },
}

/// Map failure kinds to distinct process exit codes
fn exit_code(err: &rypm::Error) -> u8 {
    match err {
        rypm::Error::PackageNotFound { .. } => 2,
        rypm::Error::RegistryUnavailable(_) => 3,
        rypm::Error::NoCompatibleDistribution(_) => 4,
        rypm::Error::DownloadFailed(_) => 5,
        rypm::Error::ExtractionFailed(_) => 6,
        rypm::Error::CloneFailed { .. } => 7,
        rypm::Error::NotInstalled { .. } => 8,
        rypm::Error::AlreadyInstalled { .. } => 9,
        rypm::Error::ManifestCorrupt { .. } => 10,
        rypm::Error::Io(_) => 11,
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Install {
            package,
            source,
            project,
        } => {
            info!("Installing package: {} ({})", package, source);
            let pm = PackageManager::new(project)?;
            pm.install(&package, source)?;
            println!("Installed {} package: {}", source, package);
        }
        Commands::Remove {
            package,
            source,
            project,
        } => {
            info!("Removing package: {} ({})", package, source);
            let pm = PackageManager::new(project)?;
            pm.remove(&package, source)?;
            println!("Removed {} package: {}", source, package);
        }
        Commands::List { source, project } => {
            let pm = PackageManager::new(project)?;
            let listing = pm.list(source)?;

            let mut total = 0;
            for (kind, names) in &listing {
                if names.is_empty() {
                    continue;
                }
                println!("{} packages:", kind);
                for name in names {
                    println!("  - {}", name);
                    total += 1;
                }
            }
            if total == 0 {
                println!("No packages installed.");
            }
        }
        Commands::Github {
            reference,
            source,
            project,
        } => {
            info!("Installing from GitHub reference: {}", reference);
            let pm = PackageManager::new(project)?;
            let name = pm.install_from_reference(&reference, source)?;
            println!("Installed {} package: {}", source, name);
        }
        Commands::Repair { project } => {
            let pm = PackageManager::new(project)?;
            let report = pm.repair()?;

            if report.is_empty() {
                println!("Manifest already matches the module tree.");
            } else {
                for (kind, name) in &report.dropped {
                    println!("Dropped stale {} entry: {}", kind, name);
                }
                for (kind, name) in &report.added {
                    println!("Recorded untracked {} package: {}", kind, name);
                }
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // No command provided, show help
        println!("rypm Package Manager v{}", env!("CARGO_PKG_VERSION"));
        println!("Run 'rypm --help' for usage information");
        return ExitCode::SUCCESS;
    };

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            let code = e
                .downcast_ref::<rypm::Error>()
                .map(exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
