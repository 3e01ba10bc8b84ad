use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod config;
mod pipeline;
mod render;

use config::{load_config, RunOptions};
use pipeline::run_conversion;
use render::{format_plan_lines, format_summary_line};

#[derive(Parser, Debug)]
#[command(name = "ungx")]
#[command(
    about = "Convert gx hash-addressed dependencies into canonical vendored import paths",
    long_about = None
)]
struct Cli {
    #[arg(long, help = "Import path to rewrite the project's own identity to")]
    fork: Option<String>,
    #[arg(long, help = "Vendor only; leave colliding packages hash addressed")]
    no_embed: bool,
    #[arg(long, help = "Classify and plan without touching the tree")]
    dry_run: bool,
    #[arg(long, help = "Assume the gx packages are already installed")]
    skip_install: bool,
    #[arg(long, default_value = ".")]
    root: PathBuf,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn run_cli(cli: Cli) -> Result<()> {
    let file = load_config(&cli.root, cli.config.as_deref())?;
    let options = RunOptions::resolve(&cli, file);

    let outcome = run_conversion(&options)?;
    if options.dry_run {
        for line in format_plan_lines(&outcome.plans, &outcome.rewrite_map) {
            println!("{line}");
        }
    }
    println!("{}", format_summary_line(&outcome));
    Ok(())
}
