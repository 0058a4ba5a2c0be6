//! formfill CLI
//!
//! Replicates spreadsheet rows into a desktop application's form.
//!
//! Usage:
//!   formfill run                       # settings from the environment / .env
//!   formfill run --excel-file data.xlsx --sheet Clienti --json
//!   formfill rows --excel-file data.xlsx   # print the rows that would be used

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use formfill::config::{self, non_empty};
use formfill::{
    BatchRunner, Desktop, FieldMapping, LaunchCommand, RowSource, RunConfig, RunStatus,
    SpreadsheetSource,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{info, warn};

mod display;
mod logging;

#[derive(Parser)]
#[command(name = "formfill")]
#[command(about = "Fill a desktop application's form from spreadsheet rows")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill the form once per spreadsheet row
    Run(RunArgs),
    /// Print the spreadsheet rows as JSON without touching the UI
    Rows(SourceArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Spreadsheet to read (xlsx, xls, xlsb, ods, csv, tsv)
    #[arg(long, env = "EXCEL_FILE", default_value = config::DEFAULT_SOURCE_PATH)]
    excel_file: PathBuf,

    /// Sheet holding the rows (ignored for csv/tsv)
    #[arg(long, env = "EXCEL_SHEET", default_value = config::DEFAULT_SHEET)]
    sheet: String,

    /// YAML or JSON object mapping column names to selectors
    #[arg(long, env = "FIELD_MAPPING_FILE")]
    field_mapping: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Application to start before looking for its window
    #[arg(long, env = "TARGET_APP")]
    target_app: Option<String>,

    /// Arguments passed to the target application
    #[arg(long, env = "APP_ARGS")]
    app_args: Option<String>,

    /// Selector of the window that holds the form
    #[arg(long, env = "APP_WINDOW_SELECTOR", default_value = config::DEFAULT_WINDOW_SELECTOR)]
    window_selector: String,

    /// Selector of the save button; empty disables saving
    #[arg(long, env = "SAVE_BUTTON_SELECTOR", default_value = config::DEFAULT_SAVE_BUTTON_SELECTOR)]
    save_button_selector: String,

    /// Key chord that moves the form to the next record; empty disables it
    #[arg(long, env = "NEXT_RECORD_SHORTCUT", default_value = config::DEFAULT_NEXT_RECORD_SHORTCUT)]
    next_record_shortcut: String,

    /// Wait after launching the target application
    #[arg(long, env = "LAUNCH_WAIT_MS", default_value_t = config::DEFAULT_LAUNCH_WAIT_MS)]
    launch_wait_ms: u64,

    /// Settle delay after each UI action
    #[arg(long, env = "ACTION_DELAY_MS", default_value_t = config::DEFAULT_ACTION_DELAY_MS)]
    action_delay_ms: u64,

    /// Wait after moving to the next record
    #[arg(long, env = "BETWEEN_ROWS_DELAY_MS", default_value_t = config::DEFAULT_BETWEEN_ROWS_DELAY_MS)]
    between_rows_delay_ms: u64,

    /// Window lookups before giving up
    #[arg(long, env = "WINDOW_ATTEMPTS", default_value_t = config::DEFAULT_WINDOW_ATTEMPTS)]
    window_attempts: u32,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl RunArgs {
    fn to_config(&self) -> RunConfig {
        let launch = non_empty(self.target_app.clone()).map(|program| LaunchCommand {
            program,
            args: non_empty(self.app_args.clone()),
        });

        RunConfig {
            source_path: self.source.excel_file.clone(),
            sheet_name: self.source.sheet.clone(),
            launch,
            window_selector: self.window_selector.clone(),
            save_button_selector: non_empty(Some(self.save_button_selector.clone())),
            next_record_shortcut: non_empty(Some(self.next_record_shortcut.clone())),
            launch_wait: Duration::from_millis(self.launch_wait_ms),
            action_delay: Duration::from_millis(self.action_delay_ms),
            between_rows_delay: Duration::from_millis(self.between_rows_delay_ms),
            window_attempts: self.window_attempts,
            window_retry_interval: config::WINDOW_RETRY_INTERVAL,
        }
    }
}

impl SourceArgs {
    fn load_mapping(&self) -> Result<FieldMapping> {
        match &self.field_mapping {
            Some(path) => FieldMapping::from_path(path),
            None => Ok(FieldMapping::default()),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = logging::init_logging() {
        eprintln!("Failed to initialize logging: {e}");
    }

    let outcome = match cli.command {
        Commands::Run(args) => run(args).await,
        Commands::Rows(args) => show_rows(args).map(|_| ExitCode::SUCCESS),
    };

    outcome.unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        ExitCode::from(2)
    })
}

async fn run(args: RunArgs) -> Result<ExitCode> {
    let config = args.to_config();
    let mapping = args.source.load_mapping()?;
    info!(
        "Filling {} mapped fields from {}",
        mapping.len(),
        config.source_path.display()
    );

    let desktop = Desktop::new_default().context("Failed to create UI automation driver")?;
    let runner = BatchRunner::new(desktop, config, mapping);
    let result = runner.run(&SpreadsheetSource).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        display::print_result(&result);
    }

    Ok(match result.status {
        RunStatus::Success => ExitCode::SUCCESS,
        RunStatus::Partial => ExitCode::from(1),
        RunStatus::Error => ExitCode::from(2),
    })
}

fn show_rows(args: SourceArgs) -> Result<()> {
    let mapping = args.load_mapping()?;
    let rows = SpreadsheetSource
        .read_rows(&args.excel_file, &args.sheet)
        .with_context(|| format!("Excel read failed for {}", args.excel_file.display()))?;

    if let Some(first) = rows.first() {
        for column in mapping.columns() {
            if first.get(column).is_none() {
                warn!("Mapped column '{}' is not in the sheet header", column);
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(extra: &[&str]) -> RunArgs {
        let mut argv = vec!["formfill", "run"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Run(args) => args,
            Commands::Rows(_) => panic!("expected run"),
        }
    }

    #[test]
    fn test_empty_selectors_disable_save_and_advance() {
        let config = run_args(&["--save-button-selector", "", "--next-record-shortcut", ""])
            .to_config();
        assert_eq!(config.save_button_selector, None);
        assert_eq!(config.next_record_shortcut, None);
    }

    #[test]
    fn test_launch_command_from_flags() {
        let config = run_args(&["--target-app", "notepad.exe", "--app-args", "notes.txt"])
            .to_config();
        assert_eq!(
            config.launch,
            Some(LaunchCommand {
                program: "notepad.exe".to_string(),
                args: Some("notes.txt".to_string()),
            })
        );
    }

    #[test]
    fn test_delays_and_attempts_from_flags() {
        let config = run_args(&[
            "--action-delay-ms",
            "50",
            "--between-rows-delay-ms",
            "10",
            "--window-attempts",
            "3",
        ])
        .to_config();
        assert_eq!(config.action_delay, Duration::from_millis(50));
        assert_eq!(config.between_rows_delay, Duration::from_millis(10));
        assert_eq!(config.window_attempts, 3);
        assert_eq!(config.window_retry_interval, Duration::from_millis(750));
    }
}
