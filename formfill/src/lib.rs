//! Replicate spreadsheet rows into a desktop application's form.
//!
//! A [`BatchRunner`] attaches to the target window, fills the mapped fields
//! of every row through a selector-addressed [`Desktop`], saves each record,
//! advances to the next one and reports a [`RunResult`]. The platform UI
//! automation backend sits behind [`AutomationDriver`].

pub mod batch;
pub mod config;
pub mod driver;
pub mod element;
pub mod errors;
pub mod filler;
pub mod locator;
pub mod mapping;
pub mod platforms;
pub mod result;
pub mod row;
pub mod selector;
pub mod source;
pub mod window;

pub use batch::BatchRunner;
pub use config::{LaunchCommand, RunConfig};
pub use driver::{create_driver, AutomationDriver, Desktop};
pub use element::{UIElement, UIElementImpl};
pub use errors::{AutomationError, SourceError};
pub use filler::fill_field;
pub use locator::Locator;
pub use mapping::FieldMapping;
pub use result::{RunResult, RunStatus};
pub use row::process_row;
pub use selector::Selector;
pub use source::{DataRow, RowSource, SpreadsheetSource};
pub use window::acquire_window;
