use crate::config::RunConfig;
use crate::driver::Desktop;
use crate::filler::fill_field;
use crate::mapping::FieldMapping;
use crate::source::DataRow;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

/// Fill every mapped field of `row`, then press save.
///
/// All fields are attempted even after one fails so that every miss gets
/// logged. Save is only pressed when every field succeeded; when a save
/// selector is configured a missing save button fails the row.
#[instrument(skip_all)]
pub async fn process_row(
    desktop: &Desktop,
    row: &DataRow,
    mapping: &FieldMapping,
    config: &RunConfig,
) -> bool {
    let mut row_success = true;

    for (column, selector) in mapping.iter() {
        let value = row.get(column).unwrap_or_default();
        if !fill_field(desktop, selector, value, config.action_delay).await {
            warn!("Field '{}' could not be filled", column);
            row_success = false;
        }
    }

    if row_success {
        if let Some(save_selector) = config.save_button_selector.as_deref() {
            row_success = click_save(desktop, save_selector, config).await;
        }
    }

    row_success
}

async fn click_save(desktop: &Desktop, selector: &str, config: &RunConfig) -> bool {
    let Some(save_button) = desktop.locator(selector).first().await else {
        warn!("Save button '{}' not found.", selector);
        return false;
    };

    match save_button.click() {
        Ok(()) => {
            info!("Save button clicked.");
            sleep(config.action_delay).await;
            true
        }
        Err(e) => {
            warn!("Save button '{}' could not be clicked: {}", selector, e);
            false
        }
    }
}
