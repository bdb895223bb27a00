//! feed-analyzer: row and column level change detection for feed snapshots
//!
//! Compares two tab-delimited exports of the same feed schema and reports
//! added, deleted and changed records.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use feed_analyzer::{
    cli,
    config::{self, resolve_skip_rows, AnalyzeConfigBuilder, AppConfig},
    model::Schema,
    pipeline::exit_codes,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "feed-analyzer")]
#[command(version)]
#[command(about = "Compare two snapshots of a delimited feed", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success (changes may have been found)
    1  Changes detected with --fail-on-change
    2  Invalid command-line usage
    3  Error occurred

EXAMPLES:
    # Write vendor-adds.csv, vendor-dels.csv and vendor-updates.csv
    feed-analyzer vendor -l vendors-march.tdf -r vendors-april.tdf

    # Print the changes instead of writing files
    feed-analyzer facility -l old.tdf -r new.tdf --no-output

    # Files without a header row
    feed-analyzer gl -l old.tdf -r new.tdf --no-header -p gl-nightly")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = config::CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by every schema subcommand
#[derive(Parser)]
struct AnalyzeArgs {
    /// Older snapshot of the feed
    #[arg(short, long, value_name = "FILE")]
    left: PathBuf,

    /// Newer snapshot of the feed
    #[arg(short, long, value_name = "FILE")]
    right: PathBuf,

    /// Number of leading rows to skip in each file [default: 1]
    #[arg(long, value_name = "NUM", allow_negative_numbers = true)]
    skip_rows: Option<i64>,

    /// Files have no header row (overrides --skip-rows)
    #[arg(short = 'H', long)]
    no_header: bool,

    /// Print results instead of writing CSV files
    #[arg(short = 'n', long)]
    no_output: bool,

    /// Output file name prefix [default: the schema name]
    #[arg(short, long)]
    prefix: Option<String>,

    /// Directory the CSV files are written to
    #[arg(short = 'd', long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Index both files concurrently
    #[arg(long)]
    parallel: bool,

    /// Exit with code 1 if any change is detected
    #[arg(long)]
    fail_on_change: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare facility feeds (FacilityID, VendorID)
    Facility(AnalyzeArgs),

    /// Compare general-ledger feeds (VendorID, GLAccount, Default)
    Gl(AnalyzeArgs),

    /// Compare vendor master feeds
    Vendor(AnalyzeArgs),

    /// Compare remit-to address feeds
    Remit(AnalyzeArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .feed-analyzer.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run(cli) {
        Ok(code) => {
            if code != exit_codes::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let Cli {
        quiet,
        config: config_path,
        command,
        ..
    } = cli;

    match command {
        Commands::Facility(args) => analyze(config_path, quiet, Schema::Facility, args),
        Commands::Gl(args) => analyze(config_path, quiet, Schema::GeneralLedger, args),
        Commands::Vendor(args) => analyze(config_path, quiet, Schema::Vendor, args),
        Commands::Remit(args) => analyze(config_path, quiet, Schema::RemitTo, args),

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "feed-analyzer", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema().context("failed to generate schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            match action {
                ConfigAction::Show => show_config(config_path.as_deref())?,
                ConfigAction::Path => show_config_paths(config_path.as_deref()),
                ConfigAction::Init => init_config()?,
            }
            Ok(exit_codes::SUCCESS)
        }
    }
}

/// Merge file defaults with command-line flags and run one comparison.
fn analyze(
    config_path: Option<PathBuf>,
    quiet: bool,
    schema: Schema,
    args: AnalyzeArgs,
) -> Result<i32> {
    let app = load_app_config(config_path.as_deref())?;

    let skip_rows = resolve_skip_rows(args.skip_rows, args.no_header, app.indexing.skip_rows)?;

    let config = AnalyzeConfigBuilder::from_app_config(&app)
        .schema(schema)
        .left_path(args.left)
        .right_path(args.right)
        .skip_rows(skip_rows)
        .parallel(args.parallel || app.indexing.parallel)
        .suppress_output(args.no_output || app.output.suppress)
        .prefix(args.prefix)
        .output_directory(args.output_dir)
        .quiet(quiet || app.behavior.quiet)
        .fail_on_change(args.fail_on_change || app.behavior.fail_on_change)
        .build()?;

    cli::run_analyze(config)
}

/// Load file-level defaults. An explicitly named config file must exist and parse.
fn load_app_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return config::load_config_file(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }
    let (app, _) = config::load_or_default(None);
    Ok(app)
}

fn show_config(explicit: Option<&Path>) -> Result<()> {
    let (app, loaded_from) = config::load_or_default(explicit);
    if let Some(path) = &loaded_from {
        eprintln!("# Loaded from: {}", path.display());
    } else {
        eprintln!("# No config file found; showing defaults");
    }
    let yaml = serde_yaml::to_string(&app).context("failed to serialize config")?;
    print!("{yaml}");
    Ok(())
}

fn show_config_paths(explicit: Option<&Path>) {
    let search_paths: [Option<String>; 3] = [
        std::env::current_dir()
            .ok()
            .map(|p| p.display().to_string()),
        ::dirs::config_dir().map(|p| p.join("feed-analyzer").display().to_string()),
        ::dirs::home_dir().map(|p| p.display().to_string()),
    ];
    eprintln!("Config file search paths (in order, git root after the current directory):");
    for path in search_paths.into_iter().flatten() {
        eprintln!("  {path}");
    }
    eprintln!();
    eprintln!("Recognized file names:");
    for name in &[
        ".feed-analyzer.yaml",
        ".feed-analyzer.yml",
        "feed-analyzer.yaml",
        "feed-analyzer.yml",
    ] {
        eprintln!("  {name}");
    }
    eprintln!();
    match config::discover_config_file(explicit) {
        Some(path) => eprintln!("Active config file: {}", path.display()),
        None => eprintln!("No config file found."),
    }
}

fn init_config() -> Result<()> {
    let target = std::env::current_dir()
        .context("cannot determine current directory")?
        .join(".feed-analyzer.yaml");
    if target.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first to re-initialize.",
            target.display()
        );
    }
    std::fs::write(&target, config::generate_example_config())
        .with_context(|| format!("failed to write {}", target.display()))?;
    eprintln!("Created {}", target.display());
    Ok(())
}
