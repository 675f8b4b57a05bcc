use std::{env, error::Error, path::PathBuf};

use clap::{Parser, Subcommand};

mod day4;
mod day8;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scratchcard points and total card counts
    Day4 { input: Option<PathBuf> },
    /// Steps through the left/right node network
    Day8 { input: Option<PathBuf> },
}

fn setup_logging(verbose: bool) {
    let mut log_builder = env_logger::builder();
    if verbose {
        log_builder.filter(None, log::LevelFilter::Debug);
    } else {
        // Only set default of info if not configured via env already
        if env::var("RUST_LOG").is_err() {
            log_builder.filter(None, log::LevelFilter::Info);
        }
        log_builder.format_timestamp(None);
    }
    log_builder.init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match &cli.command {
        Commands::Day4 { input } => {
            let default = PathBuf::from("inputs/day4.txt");
            day4::run(input.as_ref().unwrap_or(&default))?;
        }
        Commands::Day8 { input } => {
            let default = PathBuf::from("inputs/day8.txt");
            day8::run(input.as_ref().unwrap_or(&default))?;
        }
    };

    Ok(())
}
