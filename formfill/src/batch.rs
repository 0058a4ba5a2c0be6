use crate::config::RunConfig;
use crate::driver::Desktop;
use crate::mapping::FieldMapping;
use crate::result::RunResult;
use crate::row::process_row;
use crate::source::RowSource;
use crate::window::acquire_window;
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

/// Drives one replication run from the source file to the final [`RunResult`]
pub struct BatchRunner {
    desktop: Desktop,
    config: RunConfig,
    mapping: FieldMapping,
}

impl BatchRunner {
    pub fn new(desktop: Desktop, config: RunConfig, mapping: FieldMapping) -> Self {
        Self {
            desktop,
            config,
            mapping,
        }
    }

    /// Run the whole batch.
    ///
    /// Only a missing/unreadable/empty source or an unreachable window stops
    /// the run early, with [`crate::RunStatus::Error`]. Row failures are
    /// counted and the loop always reaches the last row.
    #[instrument(skip_all)]
    pub async fn run(&self, source: &dyn RowSource) -> RunResult {
        let config = &self.config;
        info!("Excel → form automation starting.");

        let path = &config.source_path;
        if !path.exists() {
            error!("Excel file not found at {}.", path.display());
            return RunResult::error(format!("Excel file not found at {}", path.display()), 0);
        }

        let rows = match source.read_rows(path, &config.sheet_name) {
            Ok(rows) => rows,
            Err(e) => {
                error!("Failed to read Excel data: {}", e);
                return RunResult::error(format!("Excel read failed: {e}"), 0);
            }
        };

        if rows.is_empty() {
            error!("No data rows detected in the Excel sheet.");
            return RunResult::error("Excel sheet has no data rows.", 0);
        }
        let total_rows = rows.len();
        info!("Loaded {} rows from Excel.", total_rows);

        if let Some(launch) = &config.launch {
            info!("Launching target application: {}", launch.command_line());
            if let Err(e) = self
                .desktop
                .open_application(&launch.program, launch.args.as_deref())
            {
                warn!("Launch request failed, looking for the window anyway: {}", e);
            }
            sleep(config.launch_wait).await;
        }

        if acquire_window(
            &self.desktop,
            &config.window_selector,
            config.window_attempts,
            config.window_retry_interval,
        )
        .await
        .is_none()
        {
            error!("Could not attach to the target window.");
            return RunResult::error(
                format!("Window '{}' not found.", config.window_selector),
                total_rows,
            );
        }

        let mut processed_rows = Vec::new();
        let mut failed_rows = Vec::new();

        for (idx, row) in rows.iter().enumerate().map(|(i, row)| (i + 1, row)) {
            info!("Processing Excel row #{}", idx);
            if process_row(&self.desktop, row, &self.mapping, config).await {
                processed_rows.push(idx);
            } else {
                warn!("Row #{} failed", idx);
                failed_rows.push(idx);
            }

            if idx == total_rows {
                continue;
            }
            if let Some(shortcut) = config.next_record_shortcut.as_deref() {
                info!("Advancing to next record with shortcut {}.", shortcut);
                if let Err(e) = self.desktop.press_key(shortcut) {
                    warn!("Advance shortcut {} failed: {}", shortcut, e);
                }
                sleep(config.between_rows_delay).await;
            }
        }

        info!(
            "Automation finished: {} succeeded, {} failed.",
            processed_rows.len(),
            failed_rows.len()
        );
        RunResult::completed(processed_rows, failed_rows, total_rows)
    }
}
