use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use metalctl::config::{self, Config};
use metalctl::exit_codes::exit_code_for_error;
use metalctl::{fleet, report};

#[derive(Parser)]
#[command(name = "metalctl")]
#[command(
    about = "Fleet hygiene CLI for Equinix Metal",
    long_about = "metalctl keeps Equinix Metal projects tidy.\n\nIt lists the devices (VMs) of each configured project together with their\naccrued usage cost, and can sweep a project: delete every running or\nstopped device that is not protected by the DO_NOT_DELETE tag.\n\nProjects are configured as a name -> ID table in the config file\n(run 'metalctl init' to create one)."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API token (overrides the config file)
    #[arg(long, global = true, env = "METAL_AUTH_TOKEN")]
    token: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    output: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and sweep project devices
    Devices {
        #[command(subcommand)]
        subcommand: fleet::DeviceCommands,
    },
    /// Show the configured project table
    Projects,
    /// Initialize a config file
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = ".metalctl.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Suppress INFO by default, only show warnings and errors
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for_error(&e)
        }
    };
    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> metalctl::error::Result<i32> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Devices { subcommand } => {
            fleet::handle_command(subcommand, &config, cli.token.as_deref(), &cli.output).await
        }
        Commands::Projects => {
            report::render_projects(&config, &cli.output)?;
            Ok(0)
        }
        Commands::Init { output } => {
            config::init_config(&output)?;
            Ok(0)
        }
    }
}
