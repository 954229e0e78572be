// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn source_arg() -> Arg {
    Arg::new("source")
        .short('s')
        .long("source")
        .visible_alias("type")
        .value_parser(["ryton", "python", "zig"])
        .default_value("ryton")
        .help("Package source type")
}

fn project_arg() -> Arg {
    Arg::new("project")
        .short('p')
        .long("project")
        .value_name("PATH")
        .default_value(".")
        .help("Project root directory")
}

fn build_cli() -> Command {
    Command::new("rypm")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Ryton Contributors")
        .about("Multi-source package manager for project-local modules")
        .subcommand_required(false)
        .subcommand(
            Command::new("install")
                .about("Install a package from its source registry")
                .arg(Arg::new("package").required(true).help("Package name"))
                .arg(source_arg())
                .arg(project_arg()),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove an installed package")
                .arg(Arg::new("package").required(true).help("Package name"))
                .arg(source_arg())
                .arg(project_arg()),
        )
        .subcommand(
            Command::new("list")
                .about("List installed packages")
                .arg(
                    Arg::new("source")
                        .short('s')
                        .long("source")
                        .visible_alias("type")
                        .value_parser(["ryton", "python", "zig"])
                        .help("Restrict listing to one source (all if omitted)"),
                )
                .arg(project_arg()),
        )
        .subcommand(
            Command::new("github")
                .about("Install a module directly from a GitHub reference")
                .arg(
                    Arg::new("reference")
                        .required(true)
                        .help("owner/repo shorthand or full repository URL"),
                )
                .arg(source_arg())
                .arg(project_arg()),
        )
        .subcommand(
            Command::new("repair")
                .about("Reconcile the manifest against the on-disk module tree")
                .arg(project_arg()),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory
    let out_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("Failed to create man directory");

    // Generate main man page
    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();
    man.render(&mut buffer).expect("Failed to render man page");

    let man_path = man_dir.join("rypm.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");

    println!("cargo:warning=Man page generated at {}", man_path.display());
}
