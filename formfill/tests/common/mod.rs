#![allow(dead_code)]

use formfill::{AutomationDriver, AutomationError, Desktop, UIElement, UIElementImpl};
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Everything the code under test asked the driver to do, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Find(String),
    Click(String),
    PressKey { selector: String, key: String },
    TypeText { selector: String, text: String },
    GlobalKey(String),
    OpenApplication { command: String, args: Option<String> },
}

#[derive(Default)]
struct State {
    known: HashSet<String>,
    content: HashMap<String, String>,
    selected: HashSet<String>,
    appear_on: HashMap<String, usize>,
    miss_on: HashMap<String, HashSet<usize>>,
    broken_typing: HashSet<String>,
    launch_fails: bool,
    lookups: HashMap<String, usize>,
    calls: Vec<Call>,
}

/// Scripted in-memory driver. Only registered selectors resolve.
#[derive(Clone, Default)]
pub struct MockDriver {
    state: Arc<Mutex<State>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(self, selector: &str) -> Self {
        self.state.lock().unwrap().known.insert(selector.to_string());
        self
    }

    pub fn with_elements(self, selectors: &[&str]) -> Self {
        selectors.iter().fold(self, |d, s| d.with_element(s))
    }

    pub fn with_content(self, selector: &str, content: &str) -> Self {
        let driver = self.with_element(selector);
        driver
            .state
            .lock()
            .unwrap()
            .content
            .insert(selector.to_string(), content.to_string());
        driver
    }

    /// The selector resolves starting from its `nth` lookup (1-based)
    pub fn appearing_on(self, selector: &str, nth: usize) -> Self {
        let driver = self.with_element(selector);
        driver
            .state
            .lock()
            .unwrap()
            .appear_on
            .insert(selector.to_string(), nth);
        driver
    }

    /// The `nth` lookup (1-based) of a registered selector misses
    pub fn missing_on(self, selector: &str, nth: usize) -> Self {
        let driver = self.with_element(selector);
        driver
            .state
            .lock()
            .unwrap()
            .miss_on
            .entry(selector.to_string())
            .or_default()
            .insert(nth);
        driver
    }

    pub fn with_broken_typing(self, selector: &str) -> Self {
        let driver = self.with_element(selector);
        driver
            .state
            .lock()
            .unwrap()
            .broken_typing
            .insert(selector.to_string());
        driver
    }

    /// Launch requests are recorded, then rejected
    pub fn with_failing_launch(self) -> Self {
        self.state.lock().unwrap().launch_fails = true;
        self
    }

    pub fn desktop(&self) -> Desktop {
        Desktop::new(Arc::new(self.clone()))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn lookups(&self, selector: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Find(s) if s == selector))
            .count()
    }

    pub fn total_lookups(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Find(_)))
            .count()
    }

    pub fn clicks(&self, selector: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Click(s) if s == selector))
            .count()
    }

    pub fn global_keys(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::GlobalKey(key) => Some(key),
                _ => None,
            })
            .collect()
    }

    pub fn content(&self, selector: &str) -> String {
        self.state
            .lock()
            .unwrap()
            .content
            .get(selector)
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl AutomationDriver for MockDriver {
    fn find_element(&self, selector: &str) -> Result<UIElement, AutomationError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Find(selector.to_string()));
        let nth = {
            let count = state.lookups.entry(selector.to_string()).or_default();
            *count += 1;
            *count
        };

        let visible = state.known.contains(selector)
            && state.appear_on.get(selector).map_or(true, |first| nth >= *first)
            && !state
                .miss_on
                .get(selector)
                .is_some_and(|misses| misses.contains(&nth));

        if !visible {
            return Err(AutomationError::ElementNotFound(selector.to_string()));
        }
        Ok(UIElement::new(Box::new(MockElement {
            driver: self.clone(),
            selector: selector.to_string(),
        })))
    }

    fn press_key(&self, key: &str) -> Result<(), AutomationError> {
        self.record(Call::GlobalKey(key.to_string()));
        Ok(())
    }

    fn open_application(&self, command: &str, args: Option<&str>) -> Result<(), AutomationError> {
        self.record(Call::OpenApplication {
            command: command.to_string(),
            args: args.map(str::to_string),
        });
        if self.state.lock().unwrap().launch_fails {
            return Err(AutomationError::PlatformError(format!(
                "Failed to launch '{command}'"
            )));
        }
        Ok(())
    }
}

/// Element that edits the driver's content table like a text box would:
/// select-all followed by typing replaces, plain typing appends.
#[derive(Clone)]
struct MockElement {
    driver: MockDriver,
    selector: String,
}

impl std::fmt::Debug for MockElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockElement({})", self.selector)
    }
}

impl UIElementImpl for MockElement {
    fn role(&self) -> String {
        "edit".to_string()
    }

    fn name(&self) -> Option<String> {
        Some(self.selector.clone())
    }

    fn click(&self) -> Result<(), AutomationError> {
        let mut state = self.driver.state.lock().unwrap();
        state.selected.remove(&self.selector);
        state.calls.push(Call::Click(self.selector.clone()));
        Ok(())
    }

    fn type_text(&self, text: &str) -> Result<(), AutomationError> {
        let mut state = self.driver.state.lock().unwrap();
        state.calls.push(Call::TypeText {
            selector: self.selector.clone(),
            text: text.to_string(),
        });
        if state.broken_typing.contains(&self.selector) {
            return Err(AutomationError::PlatformError("typing rejected".to_string()));
        }
        let replace = state.selected.remove(&self.selector);
        let content = state.content.entry(self.selector.clone()).or_default();
        if replace {
            *content = text.to_string();
        } else {
            content.push_str(text);
        }
        Ok(())
    }

    fn press_key(&self, key: &str) -> Result<(), AutomationError> {
        let mut state = self.driver.state.lock().unwrap();
        state.calls.push(Call::PressKey {
            selector: self.selector.clone(),
            key: key.to_string(),
        });
        if key == "{Control+a}" {
            state.selected.insert(self.selector.clone());
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn UIElementImpl> {
        Box::new(self.clone())
    }
}

/// Write a csv file with a `.csv` suffix and return its handle
pub fn csv_source(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

/// Virtual time spent since `start` matches `expected`, within timer granularity
pub fn assert_elapsed(start: tokio::time::Instant, expected: std::time::Duration) {
    let elapsed = start.elapsed();
    let slack = std::time::Duration::from_millis(10);
    assert!(
        elapsed >= expected && elapsed < expected + slack,
        "expected {expected:?} of waiting, got {elapsed:?}"
    );
}
