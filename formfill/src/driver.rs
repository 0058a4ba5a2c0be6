//! The seam between the replication core and the platform automation backend.

use crate::element::UIElement;
use crate::errors::AutomationError;
use crate::locator::Locator;
use std::sync::Arc;
use tracing::instrument;

/// The common trait that all platform-specific drivers must implement
pub trait AutomationDriver: Send + Sync {
    /// Resolve a selector to a single element. A selector that matches nothing
    /// returns `AutomationError::ElementNotFound`.
    fn find_element(&self, selector: &str) -> Result<UIElement, AutomationError>;

    /// Send a key chord to whatever currently has keyboard focus
    fn press_key(&self, key: &str) -> Result<(), AutomationError>;

    /// Start an application. Returns once the launch request is issued, not
    /// once the application is ready.
    fn open_application(&self, command: &str, args: Option<&str>) -> Result<(), AutomationError>;
}

/// Handle on the automation backend shared by every component of a run
pub struct Desktop {
    driver: Arc<dyn AutomationDriver>,
}

impl Desktop {
    pub fn new(driver: Arc<dyn AutomationDriver>) -> Self {
        Self { driver }
    }

    /// Create a desktop backed by the driver for the current platform
    pub fn new_default() -> Result<Self, AutomationError> {
        Ok(Self::new(create_driver()?))
    }

    #[instrument(level = "debug", skip(self, selector))]
    pub fn locator(&self, selector: impl Into<String>) -> Locator {
        Locator::new(self.driver.clone(), selector.into())
    }

    #[instrument(skip(self))]
    pub fn press_key(&self, key: &str) -> Result<(), AutomationError> {
        self.driver.press_key(key)
    }

    #[instrument(skip(self))]
    pub fn open_application(&self, command: &str, args: Option<&str>) -> Result<(), AutomationError> {
        self.driver.open_application(command, args)
    }
}

impl Clone for Desktop {
    fn clone(&self) -> Self {
        Self {
            driver: self.driver.clone(),
        }
    }
}

pub fn create_driver() -> Result<Arc<dyn AutomationDriver>, AutomationError> {
    #[cfg(target_os = "windows")]
    {
        Ok(Arc::new(crate::platforms::windows::WindowsDriver::new()?))
    }
    #[cfg(not(target_os = "windows"))]
    {
        Err(AutomationError::UnsupportedPlatform(format!(
            "No UI automation driver is available for {}",
            std::env::consts::OS
        )))
    }
}
