#![allow(clippy::arc_with_non_send_sync)]

use crate::driver::AutomationDriver;
use crate::element::{UIElement, UIElementImpl};
use crate::errors::AutomationError;
use crate::platforms::keys::to_send_keys;
use crate::selector::Selector;
use std::sync::Arc;
use tracing::{debug, info};
use uiautomation::controls::ControlType;
use uiautomation::filters::NameFilter;
use uiautomation::UIAutomation;

use windows::core::{HRESULT, HSTRING, PCWSTR};
use windows::Win32::Foundation::HWND;
use windows::Win32::System::Com::{CoInitializeEx, COINIT_MULTITHREADED};
use windows::Win32::UI::Shell::ShellExecuteW;
use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;

// Timeout handed to UI Automation for a single resolve
const FIND_TIMEOUT_MS: u64 = 1000;
const FIND_DEPTH: u32 = 50;
// Per-keystroke interval passed to send_keys/send_text
const KEY_INTERVAL_MS: u64 = 10;

/// Thread-safe wrapper for UIAutomation COM object
pub struct ThreadSafeWinUIAutomation(pub Arc<UIAutomation>);

// Safety: UIAutomation is thread-safe after proper COM initialization
unsafe impl Send for ThreadSafeWinUIAutomation {}
unsafe impl Sync for ThreadSafeWinUIAutomation {}

/// Thread-safe wrapper for UIElement
#[derive(Clone)]
pub(crate) struct ThreadSafeWinUIElement(pub(crate) Arc<uiautomation::UIElement>);

// Safety: UIElement is thread-safe when wrapped properly
unsafe impl Send for ThreadSafeWinUIElement {}
unsafe impl Sync for ThreadSafeWinUIElement {}

impl From<uiautomation::Error> for AutomationError {
    fn from(error: uiautomation::Error) -> Self {
        AutomationError::PlatformError(format!("UIAutomation error: {error}"))
    }
}

/// Driver backed by the Windows UI Automation API
pub struct WindowsDriver {
    automation: ThreadSafeWinUIAutomation,
}

impl WindowsDriver {
    pub fn new() -> Result<Self, AutomationError> {
        // Initialize COM in multithreaded mode for thread safety
        unsafe {
            let hr = CoInitializeEx(None, COINIT_MULTITHREADED);
            if hr.is_err() && hr != HRESULT(0x80010106u32 as i32) {
                // Only return error if it's not the "already initialized" case
                return Err(AutomationError::PlatformError(format!(
                    "Failed to initialize COM in multithreaded mode: {hr}"
                )));
            }
        }

        let automation = UIAutomation::new_direct()
            .map_err(|e| AutomationError::PlatformError(e.to_string()))?;
        Ok(Self {
            automation: ThreadSafeWinUIAutomation(Arc::new(automation)),
        })
    }

    fn wrap(element: uiautomation::UIElement) -> UIElement {
        UIElement::new(Box::new(WindowsUIElement {
            element: ThreadSafeWinUIElement(Arc::new(element)),
        }))
    }
}

impl AutomationDriver for WindowsDriver {
    fn find_element(&self, selector: &str) -> Result<UIElement, AutomationError> {
        let root = self.automation.0.get_root_element()?;
        let matcher = self
            .automation
            .0
            .create_matcher()
            .from_ref(&root)
            .depth(FIND_DEPTH)
            .timeout(FIND_TIMEOUT_MS);

        let matcher = match Selector::from(selector) {
            Selector::Role { role, name } => {
                let control_type = map_generic_role_to_win_roles(&role);
                debug!(
                    "searching element by role: {:?} (from: {}), name_filter: {:?}",
                    control_type, role, name
                );
                let matcher = matcher.control_type(control_type);
                match name {
                    Some(name) => matcher.filter(Box::new(NameFilter {
                        value: name,
                        casesensitive: false,
                        partial: true,
                    })),
                    None => matcher,
                }
            }
            Selector::Name(name) => matcher.filter(Box::new(NameFilter {
                value: name,
                casesensitive: false,
                partial: true,
            })),
            Selector::NativeId(automation_id) => {
                matcher.filter_fn(Box::new(move |e: &uiautomation::UIElement| {
                    Ok(e.get_automation_id()
                        .map(|id| id == automation_id)
                        .unwrap_or(false))
                }))
            }
            Selector::Invalid(reason) => return Err(AutomationError::InvalidArgument(reason)),
        };

        let element = matcher.find_first().map_err(|e| {
            AutomationError::ElementNotFound(format!("Selector: '{selector}', Err: {e}"))
        })?;
        Ok(Self::wrap(element))
    }

    fn press_key(&self, key: &str) -> Result<(), AutomationError> {
        let focused = self
            .automation
            .0
            .get_focused_element()
            .map_err(|e| AutomationError::ElementNotFound(e.to_string()))?;
        Self::wrap(focused).press_key(key)
    }

    fn open_application(&self, command: &str, args: Option<&str>) -> Result<(), AutomationError> {
        info!("Launching application: {} (args: {:?})", command, args);
        let verb = HSTRING::from("open");
        let file = HSTRING::from(command);
        let params = args.map(HSTRING::from);
        unsafe {
            let result = ShellExecuteW(
                HWND::default(),
                PCWSTR(verb.as_ptr()),
                PCWSTR(file.as_ptr()),
                params
                    .as_ref()
                    .map(|p| PCWSTR(p.as_ptr()))
                    .unwrap_or(PCWSTR::null()),
                PCWSTR::null(),
                SW_SHOWNORMAL,
            );
            // A value > 32 indicates success for ShellExecuteW
            if result.0 as isize <= 32 {
                return Err(AutomationError::PlatformError(format!(
                    "Failed to launch '{}'. Error code: {:?}",
                    command, result.0
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone)]
pub(crate) struct WindowsUIElement {
    element: ThreadSafeWinUIElement,
}

impl std::fmt::Debug for WindowsUIElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowsUIElement")
            .field("name", &self.element.0.get_name().unwrap_or_default())
            .finish()
    }
}

impl UIElementImpl for WindowsUIElement {
    fn role(&self) -> String {
        self.element
            .0
            .get_control_type()
            .map(|ct| ct.to_string())
            .unwrap_or_default()
    }

    fn name(&self) -> Option<String> {
        self.element.0.get_name().ok()
    }

    fn click(&self) -> Result<(), AutomationError> {
        self.element.0.try_focus();
        debug!("attempting to click element: {:?}", self.element.0);
        self.element
            .0
            .click()
            .map_err(|e| AutomationError::PlatformError(format!("Failed to click: {e}")))
    }

    fn type_text(&self, text: &str) -> Result<(), AutomationError> {
        self.element
            .0
            .send_text(text, KEY_INTERVAL_MS)
            .map_err(|e| AutomationError::PlatformError(e.to_string()))
    }

    fn press_key(&self, key: &str) -> Result<(), AutomationError> {
        let keys = to_send_keys(key);
        debug!("sending keys {} as {}", key, keys);
        self.element
            .0
            .send_keys(&keys, KEY_INTERVAL_MS)
            .map_err(|e| AutomationError::PlatformError(format!("Failed to press key: {e:?}")))
    }

    fn clone_box(&self) -> Box<dyn UIElementImpl> {
        Box::new(self.clone())
    }
}

/// Maps generic role strings to Windows ControlType enums
fn map_generic_role_to_win_roles(role: &str) -> ControlType {
    match role.to_lowercase().as_str() {
        "pane" | "app" | "application" => ControlType::Pane,
        "window" | "dialog" => ControlType::Window,
        "button" => ControlType::Button,
        "checkbox" => ControlType::CheckBox,
        "text" => ControlType::Text,
        "edit" | "textfield" | "input" => ControlType::Edit,
        "combobox" => ControlType::ComboBox,
        "list" => ControlType::List,
        "listitem" => ControlType::ListItem,
        "tab" => ControlType::Tab,
        "tabitem" => ControlType::TabItem,
        "menuitem" => ControlType::MenuItem,
        "radiobutton" => ControlType::RadioButton,
        "datagrid" => ControlType::DataGrid,
        "dataitem" => ControlType::DataItem,
        "document" => ControlType::Document,
        "group" => ControlType::Group,
        "custom" => ControlType::Custom,
        _ => ControlType::Custom,
    }
}
