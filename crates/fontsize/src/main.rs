//! fontsize CLI - Fontsource variable font file sizes as a static HTML table.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use config::CollectArgs;

#[derive(Parser)]
#[command(name = "fontsize")]
#[command(about = "Collect Fontsource variable font file sizes and render them as a static table")]
#[command(version)]
pub struct Cli {
    /// Defaults to `build` when omitted
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to fontsize.toml config file
    #[arg(short, long, default_value = "fontsize.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default fontsize.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        yes: bool,
    },

    /// Collect file sizes and save the dataset as JSON
    Fetch {
        /// Dataset output path
        #[arg(short, long, default_value = "fontsize.json")]
        out: PathBuf,

        #[command(flatten)]
        collect: CollectArgs,
    },

    /// Render a saved dataset without network access
    Render {
        /// Dataset to render
        #[arg(short, long, default_value = "fontsize.json")]
        input: PathBuf,

        /// Output directory (defaults to config or ".")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip CSS minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Collect file sizes and render the static pages
    Build {
        /// Output directory (defaults to config or ".")
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        collect: CollectArgs,

        /// Skip CSS minification
        #[arg(long)]
        no_minify: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Some(Commands::Init { yes }) => {
            commands::init::run(&cli.config, yes).await?;
        }
        Some(Commands::Fetch { out, collect }) => {
            commands::fetch::run(&cli.config, &collect, out).await?;
        }
        Some(Commands::Render {
            input,
            output,
            no_minify,
        }) => {
            commands::render::run(&cli.config, input, output, no_minify).await?;
        }
        Some(Commands::Build {
            output,
            collect,
            no_minify,
        }) => {
            commands::build::run(&cli.config, &collect, output, no_minify).await?;
        }
        None => {
            commands::build::run(&cli.config, &CollectArgs::default(), None, false).await?;
        }
    }

    Ok(())
}
