use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SOURCE_PATH: &str = r"C:\path\to\spreadsheet.xlsx";
pub const DEFAULT_SHEET: &str = "Sheet1";
pub const DEFAULT_WINDOW_SELECTOR: &str = "role:Window|name:My Desktop App";
pub const DEFAULT_SAVE_BUTTON_SELECTOR: &str = "role:Button|name:Salva";
pub const DEFAULT_NEXT_RECORD_SHORTCUT: &str = "{Alt+n}";
pub const DEFAULT_LAUNCH_WAIT_MS: u64 = 4000;
pub const DEFAULT_ACTION_DELAY_MS: u64 = 300;
pub const DEFAULT_BETWEEN_ROWS_DELAY_MS: u64 = 700;
pub const DEFAULT_WINDOW_ATTEMPTS: u32 = 8;
pub const WINDOW_RETRY_INTERVAL: Duration = Duration::from_millis(750);

/// Key chord sent to a field before typing, so the new value replaces the old one
pub const SELECT_ALL_KEY: &str = "{Control+a}";

/// Application started before the window is looked up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchCommand {
    pub program: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
}

impl LaunchCommand {
    /// The full command line, as it would be typed
    pub fn command_line(&self) -> String {
        match &self.args {
            Some(args) => format!("{} {}", self.program, args),
            None => self.program.clone(),
        }
    }
}

/// Every tunable of a run. Built once, then shared read-only by all components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub source_path: PathBuf,
    pub sheet_name: String,
    pub launch: Option<LaunchCommand>,
    pub window_selector: String,
    pub save_button_selector: Option<String>,
    pub next_record_shortcut: Option<String>,
    pub launch_wait: Duration,
    pub action_delay: Duration,
    pub between_rows_delay: Duration,
    pub window_attempts: u32,
    pub window_retry_interval: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            sheet_name: DEFAULT_SHEET.to_string(),
            launch: None,
            window_selector: DEFAULT_WINDOW_SELECTOR.to_string(),
            save_button_selector: Some(DEFAULT_SAVE_BUTTON_SELECTOR.to_string()),
            next_record_shortcut: Some(DEFAULT_NEXT_RECORD_SHORTCUT.to_string()),
            launch_wait: Duration::from_millis(DEFAULT_LAUNCH_WAIT_MS),
            action_delay: Duration::from_millis(DEFAULT_ACTION_DELAY_MS),
            between_rows_delay: Duration::from_millis(DEFAULT_BETWEEN_ROWS_DELAY_MS),
            window_attempts: DEFAULT_WINDOW_ATTEMPTS,
            window_retry_interval: WINDOW_RETRY_INTERVAL,
        }
    }
}

/// Empty or whitespace-only settings mean "not configured"
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.sheet_name, "Sheet1");
        assert_eq!(config.window_attempts, 8);
        assert_eq!(config.window_retry_interval, Duration::from_millis(750));
        assert_eq!(config.action_delay, Duration::from_millis(300));
        assert_eq!(config.between_rows_delay, Duration::from_millis(700));
        assert_eq!(config.launch_wait, Duration::from_millis(4000));
        assert_eq!(
            config.save_button_selector.as_deref(),
            Some("role:Button|name:Salva")
        );
        assert_eq!(config.next_record_shortcut.as_deref(), Some("{Alt+n}"));
        assert!(config.launch.is_none());
    }

    #[test]
    fn test_command_line_joins_args_with_a_space() {
        let launch = LaunchCommand {
            program: r"C:\Program Files\MyApp\myapp.exe".to_string(),
            args: Some("--profile default".to_string()),
        };
        assert_eq!(
            launch.command_line(),
            r"C:\Program Files\MyApp\myapp.exe --profile default"
        );
        let bare = LaunchCommand {
            program: "notepad.exe".to_string(),
            args: None,
        };
        assert_eq!(bare.command_line(), "notepad.exe");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("".to_string())), None);
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("{Alt+n}".to_string())), Some("{Alt+n}".to_string()));
    }
}
