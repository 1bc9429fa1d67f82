mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{blocks, check, export, BlocksArgs, CheckArgs, ExportArgs};
use tracing_subscriber::EnvFilter;

/// Pagebuilder CLI - render and check saved pages
#[derive(Parser, Debug)]
#[command(name = "pagebuilder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a saved block list to HTML
    Export(ExportArgs),

    /// Report block validation messages and template advisories
    Check(CheckArgs),

    /// List the registered block types
    Blocks(BlocksArgs),
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Export(args) => export(args, &cwd),
                Command::Check(args) => check(args, &cwd),
                Command::Blocks(args) => blocks(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
