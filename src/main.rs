use clap::Parser;
use codeheap::aggregate_files;
use codeheap::logger::initialize_logger;
use codeheap::reporting::print_stats;
use codeheap::utils::{default_extensions, parse_modified_after};
use codeheap::AggregatorConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::SystemTime;
use tracing::{error, info};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Aggregate source files into a single flat directory", long_about = None)]
struct CliArgs {
    #[arg(help = "Source directory to scan for files")]
    source_dir: PathBuf,
    #[arg(help = "Directory to copy files into (cleared before every run)")]
    destination_dir: PathBuf,
    #[arg(
        short = 'e',
        long,
        num_args = 1..,
        value_delimiter = ',',
        env = "CODEHEAP_EXTENSIONS",
        default_values_t = default_extensions(),
        help = "File extensions to include"
    )]
    extensions: Vec<String>,
    #[arg(
        short = 'm',
        long,
        env = "CODEHEAP_MODIFIED_AFTER",
        value_name = "YYYY-MM-DD",
        value_parser = parse_modified_after,
        help = "Only include files modified on or after this date"
    )]
    modified_after: Option<SystemTime>,
    #[arg(long, help = "Patterns file to use instead of <SOURCE_DIR>/.gitignore")]
    ignore_file: Option<PathBuf>,
    #[arg(short = 's', long, default_value = "false", help = "Skip the summary tree of copied files")]
    no_stats: bool,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    initialize_logger();

    let config = AggregatorConfig {
        source_dir: args.source_dir,
        destination_dir: args.destination_dir.clone(),
        extensions: args.extensions,
        modified_after: args.modified_after,
        ignore_file: args.ignore_file,
    };

    match aggregate_files(config) {
        Ok(records) => {
            if !args.no_stats {
                print_stats(&records);
            }
            info!("Files have been aggregated in: {}", args.destination_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Aggregation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
