use clap::{Parser, Subcommand};
use log::{LevelFilter, info};
use publist::{config, load, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("PUBLIST_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("PUBLIST_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "publist")]
#[command(about = "Load and validate the publication list of a static blog")]
#[command(long_about = "\
Load and validate the publication list of a static blog

Each publication is one YAML file. Display order comes from `index`,
which must be unique. Any malformed record fails the run.

Record layout:

  index: 3
  title: Fast Joins on Modern Hardware
  authors:
    - Ada Lovelace
    - Alan Turing
  conference: SIGMOD
  year: 2021
  abstract: >
    Folded, multi-line abstract.
  doi: 10.1145/1234567          # optional

Run 'publist gen-config' to generate a documented publist.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory holding the publication records
    #[arg(long, default_value = "_data/publications", global = true)]
    source: PathBuf,

    /// Log debug details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate every record and print the listing
    Check,
    /// Print the listing in display order
    List,
    /// Write the loaded records as JSON for the site generator
    Export {
        /// Output file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a stock publist.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = load::scan(&cli.source)?;
            output::print_listing(&manifest);
            println!("{}", output::format_check_summary(&manifest));
        }
        Command::List => {
            let manifest = load::scan(&cli.source)?;
            output::print_listing(&manifest);
        }
        Command::Export { output } => {
            let manifest = load::scan(&cli.source)?;
            let json = serde_json::to_string_pretty(&manifest)?;
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, json)?;
                    info!(
                        "wrote {} publications to {}",
                        manifest.publications.len(),
                        path.display()
                    );
                }
                None => println!("{}", json),
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
