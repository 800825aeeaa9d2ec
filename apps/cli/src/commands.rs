//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use folio_core::build_report;
use folio_shared::{CONFIG_FILE_NAME, init_config, load_config_or_default, to_toml};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Folio: assemble chapter sources and charts into one self-contained report.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Assemble Markdown chapters and chart images into a single self-contained HTML report.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Build the report described by the config file.
    Build {
        /// Config file (defaults to ./folio.toml; built-in defaults if absent).
        #[arg(short, long, env = "FOLIO_CONFIG")]
        config: Option<PathBuf>,

        /// Write the report here instead of the configured output.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a config file with the built-in defaults.
    Init {
        /// Where to write it.
        #[arg(long, default_value = CONFIG_FILE_NAME)]
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Show the resolved configuration.
    Show {
        /// Config file (defaults to ./folio.toml).
        #[arg(short, long, env = "FOLIO_CONFIG")]
        config: Option<PathBuf>,
    },
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "folio=info",
        1 => "folio=debug",
        _ => "folio=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build { config, out } => cmd_build(config.as_deref(), out.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Init { path, force } => cmd_config_init(&path, force),
            ConfigAction::Show { config } => cmd_config_show(config.as_deref()),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_build(config: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let config_path = config
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let cwd = std::env::current_dir().map_err(|e| eyre!("cannot determine working directory: {e}"))?;

    let loaded = load_config_or_default(&config_path, &cwd)?;
    info!(
        config = %config_path.display(),
        parts = loaded.config.parts.len(),
        assets = loaded.config.assets.len(),
        "building report"
    );

    let (result, written) = build_report(&loaded, out)?;

    println!();
    println!("  Report generated!");
    println!("  Path:     {}", written.path.display());
    println!(
        "  Parts:    {} included, {} skipped",
        result.parts_included,
        result.parts_skipped.len()
    );
    for part in &result.parts_skipped {
        println!("            missing: {part}");
    }
    println!(
        "  Charts:   {} embedded, {} missing",
        result.images_embedded, result.images_missing
    );
    println!("  Size:     {} bytes", written.size_bytes);
    println!("  SHA-256:  {}", written.sha256);
    println!();

    Ok(())
}

fn cmd_config_init(path: &Path, force: bool) -> Result<()> {
    init_config(path, force)?;
    println!("Config written to {}", path.display());
    Ok(())
}

fn cmd_config_show(config: Option<&Path>) -> Result<()> {
    let config_path = config
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let cwd = std::env::current_dir().map_err(|e| eyre!("cannot determine working directory: {e}"))?;

    let loaded = load_config_or_default(&config_path, &cwd)?;
    println!("# paths resolve against {}", loaded.base_dir.display());
    print!("{}", to_toml(&loaded.config)?);
    Ok(())
}
