use crate::driver::Desktop;
use crate::element::UIElement;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

/// Resolve the target window, retrying at a fixed interval.
///
/// Makes at most `max_attempts` lookups (at least one) and waits
/// `retry_interval` between consecutive misses, never after the last one
/// and never after a hit.
#[instrument(skip(desktop, retry_interval))]
pub async fn acquire_window(
    desktop: &Desktop,
    selector: &str,
    max_attempts: u32,
    retry_interval: Duration,
) -> Option<UIElement> {
    let max_attempts = max_attempts.max(1);
    let locator = desktop.locator(selector);

    for attempt in 1..=max_attempts {
        if let Some(window) = locator.first().await {
            info!("Attached to window {} on attempt {}", window, attempt);
            return Some(window);
        }
        if attempt < max_attempts {
            warn!("Window not found, retry {}/{}...", attempt, max_attempts);
            sleep(retry_interval).await;
        }
    }

    warn!(
        "Window '{}' not found after {} attempts",
        selector, max_attempts
    );
    None
}
