use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "droidkit")]
#[command(version, about = "Turn a GitHub repository snapshot into an Android project")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a droidkit TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download a repository and restructure it into an Android project
    Create {
        /// Repository URL, with or without a trailing .git
        #[arg(long, default_value = "")]
        url: String,

        /// Project name, also the destination directory name
        #[arg(long, default_value = "")]
        name: String,

        /// Package identifier, e.g. com.example.demo
        #[arg(long = "package", default_value = "")]
        package: String,

        /// Directory the project is created in (defaults to the home directory)
        #[arg(long)]
        base_dir: Option<PathBuf>,
    },
    /// Show the layout and files a project would get, without creating anything
    Plan {
        #[arg(long)]
        name: String,

        #[arg(long = "package")]
        package: String,

        /// Repository URL to derive the archive URL from
        #[arg(long)]
        url: Option<String>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Create {
            url,
            name,
            package,
            base_dir,
        } => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            cmd::cmd_create(&cli, &cwd, url, name, package, base_dir.clone()).await?;
        }
        Commands::Plan {
            name,
            package,
            url,
            json,
        } => cmd::cmd_plan(name, package, url.as_deref(), *json)?,
    }

    Ok(())
}
