use crate::config::SELECT_ALL_KEY;
use crate::driver::Desktop;
use crate::errors::AutomationError;
use crate::element::UIElement;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

/// Replace the content of the element behind `selector` with `value`.
///
/// Protocol: click, settle; select all, settle half; type the value (an empty
/// value still types an empty string, which clears the selection); settle.
/// Returns `false` when the element cannot be found or refuses an action.
/// There is no retry here.
#[instrument(skip(desktop, value, action_delay))]
pub async fn fill_field(
    desktop: &Desktop,
    selector: &str,
    value: &str,
    action_delay: Duration,
) -> bool {
    let Some(element) = desktop.locator(selector).first().await else {
        warn!("Selector '{}' not found.", selector);
        return false;
    };

    match replace_content(&element, value, action_delay).await {
        Ok(()) => {
            debug!("Filled {} with {} chars", element, value.chars().count());
            true
        }
        Err(e) => {
            warn!("Could not fill '{}': {}", selector, e);
            false
        }
    }
}

async fn replace_content(
    element: &UIElement,
    value: &str,
    action_delay: Duration,
) -> Result<(), AutomationError> {
    element.click()?;
    sleep(action_delay).await;

    element.press_key(SELECT_ALL_KEY)?;
    sleep(action_delay / 2).await;

    element.type_text(value)?;
    sleep(action_delay).await;
    Ok(())
}
