use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};

mod config;
mod console;
mod datetime;
mod error;
mod export;
mod export_command;
mod file_saver;
mod logger;
mod progress;
mod progress_command;
mod ticker;
mod time_args;
mod time_of_day;
mod time_range;

use config::Config;
use console::ConsoleProgressBar;
use export_command::{ExportArgs, ExportCommand};
use file_saver::DirectorySaver;
use progress_command::{ProgressArgs, ProgressCommand};
use time_of_day::TimeOfDay;

/// 作業時間の経過率を表示し、JSONファイルとしてエクスポートするCLIアプリケーション。
///
/// # Examples
/// ```
/// $ cargo run -- progress --start 09:00 --end 17:00
/// $ cargo run -- export --comment Meeting
/// $ cargo run -- now
/// ```
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    #[clap(
        short = 'v',
        long = "verbose",
        global = true,
        parse(from_occurrences),
        help = "Increases log verbosity (-v debug, -vv trace)"
    )]
    verbose: u64,

    #[clap(subcommand)]
    subcommand: SubCommands,
}

/// サブコマンドを表す列挙型。
#[derive(Debug, Subcommand)]
enum SubCommands {
    /// Shows the completion of the time range as a progress bar
    Progress(ProgressArgs),
    /// Exports the time range as a JSON file
    Export(ExportArgs),
    /// Prints the current time in the format HH:MM
    Now,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logger::init(args.verbose)?;

    match args.subcommand {
        SubCommands::Progress(progress) => {
            let config = Config::new();
            let shutdown = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!("Failed to listen for Ctrl-C: {}", e);
                }
            };
            ProgressCommand::new(&config)
                .run(progress, ConsoleProgressBar::new(io::stdout()), shutdown)
                .await
                .context("Failed to show progress")?;
        }
        SubCommands::Export(export) => {
            let config = Config::new().with_export_dir(export.dir.clone());
            let saver = DirectorySaver::new(&config.export_dir);
            let path = ExportCommand::new(&saver, &config)
                .run(export)
                .context("Failed to export time range")?;
            info!("Export completed.");
            println!("{}", path.display());
        }
        SubCommands::Now => println!("{}", TimeOfDay::of(&datetime::now())),
    }

    Ok(())
}
