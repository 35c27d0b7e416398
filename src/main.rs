use clap::{parser::ValueSource, CommandFactory, FromArgMatches, Parser, Subcommand};
use ngramforge::config::Config;
use ngramforge::error::NfResult;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; flags given on the command line override it
    #[arg(global = true, long = "config")]
    config_file: Option<PathBuf>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract n-grams from a directory of .txt files or a CSV table
    Extract(cmd::extract::ExtractArgs),
    /// Print the most frequent n-grams recorded in the corpus tables
    Report(cmd::report::ReportArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let file_config = match &cli.config_file {
        Some(path) => {
            info!("⚙️  Loading config from: {}", path.display());
            match Config::load_from_file(path) {
                Ok(c) => Some(c),
                Err(e) => {
                    error!("❌ {}", e);
                    process::exit(1);
                }
            }
        }
        None => None,
    };

    let result: NfResult<()> = match cli.command {
        Commands::Extract(args) => {
            let sub = matches.subcommand_matches("extract").unwrap_or(&matches);
            let config = match file_config {
                Some(mut c) => {
                    c.merge_from_cli(&args.config, sub);
                    c
                }
                None => args.config.clone(),
            };
            cmd::extract::run(args, config)
        }
        Commands::Report(mut args) => {
            let sub = matches.subcommand_matches("report").unwrap_or(&matches);
            if let Some(c) = file_config {
                if sub.value_source("output_dir") != Some(ValueSource::CommandLine) {
                    args.output = c.output;
                }
            }
            cmd::report::run(args)
        }
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
