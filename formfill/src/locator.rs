use tokio::task;
use tracing::{debug, warn};

use crate::driver::AutomationDriver;
use crate::element::UIElement;
use std::sync::Arc;

/// A selector bound to a driver, resolved on demand
#[derive(Clone)]
pub struct Locator {
    driver: Arc<dyn AutomationDriver>,
    selector: String,
}

impl Locator {
    pub(crate) fn new(driver: Arc<dyn AutomationDriver>, selector: String) -> Self {
        Self { driver, selector }
    }

    /// Resolve the selector once, without polling.
    ///
    /// Any driver error collapses into `None`: callers only care whether there
    /// is an element to act on.
    pub async fn first(&self) -> Option<UIElement> {
        let driver = self.driver.clone();
        let selector = self.selector.clone();

        // A platform resolve blocks for up to its own timeout, keep it off the runtime
        let resolved = task::spawn_blocking(move || driver.find_element(&selector)).await;

        match resolved {
            Ok(Ok(element)) => Some(element),
            Ok(Err(e)) => {
                debug!("Selector '{}' did not resolve: {}", self.selector, e);
                None
            }
            Err(e) => {
                warn!("Lookup of '{}' aborted: {}", self.selector, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AutomationError;
    use std::sync::Mutex;
    use std::thread::{self, ThreadId};

    /// Remembers which thread every lookup ran on
    #[derive(Default)]
    struct ThreadRecordingDriver {
        lookup_threads: Mutex<Vec<ThreadId>>,
    }

    impl AutomationDriver for ThreadRecordingDriver {
        fn find_element(&self, selector: &str) -> Result<UIElement, AutomationError> {
            self.lookup_threads
                .lock()
                .unwrap()
                .push(thread::current().id());
            Err(AutomationError::ElementNotFound(selector.to_string()))
        }

        fn press_key(&self, _key: &str) -> Result<(), AutomationError> {
            Ok(())
        }

        fn open_application(&self, _command: &str, _args: Option<&str>) -> Result<(), AutomationError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_first_resolves_off_the_runtime_thread() {
        let driver = Arc::new(ThreadRecordingDriver::default());
        let locator = Locator::new(driver.clone(), "role:Edit|name:Nome".to_string());

        assert!(locator.first().await.is_none());

        let threads = driver.lookup_threads.lock().unwrap().clone();
        assert_eq!(threads.len(), 1);
        assert_ne!(threads[0], thread::current().id());
    }
}
