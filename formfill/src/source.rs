//! Reading spreadsheet rows into [`DataRow`]s.
//!
//! The first row of a sheet is the header row. Each following row becomes a
//! `DataRow` keyed by header name, with blank header columns ignored and every
//! value trimmed. Rows whose values are all empty are dropped.

use crate::errors::SourceError;
use calamine::{open_workbook_auto, Data, Reader};
use serde::{Serialize, Serializer};
use std::path::Path;
use tracing::{debug, instrument};

/// One spreadsheet row: column name -> cell value, in header order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataRow {
    cells: Vec<(String, String)>,
}

impl DataRow {
    pub fn new(cells: Vec<(String, String)>) -> Self {
        cells.into_iter().collect()
    }

    /// Value for `column`, or `None` when this row has no such column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every value is the empty string
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, value)| value.is_empty())
    }
}

/// A repeated column keeps its first position and takes the last value
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DataRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut cells: Vec<(String, String)> = Vec::new();
        for (column, value) in iter {
            let (column, value) = (column.into(), value.into());
            match cells.iter_mut().find(|(name, _)| *name == column) {
                Some(cell) => cell.1 = value,
                None => cells.push((column, value)),
            }
        }
        Self { cells }
    }
}

impl Serialize for DataRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Anything that can produce the rows of a run
pub trait RowSource {
    fn read_rows(&self, path: &Path, sheet: &str) -> Result<Vec<DataRow>, SourceError>;
}

/// Reads xlsx/xlsm/xlsb/xls/ods workbooks through calamine and csv/tsv files
/// through the csv crate. The sheet name is ignored for delimited text files.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetSource;

impl RowSource for SpreadsheetSource {
    #[instrument(skip(self))]
    fn read_rows(&self, path: &Path, sheet: &str) -> Result<Vec<DataRow>, SourceError> {
        if !path.exists() {
            return Err(SourceError::NotFound(path.to_path_buf()));
        }
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let table = match extension.as_deref() {
            Some("csv") => read_delimited(path, b',')?,
            Some("tsv") => read_delimited(path, b'\t')?,
            _ => read_workbook(path, sheet)?,
        };

        let rows = rows_from_table(table);
        debug!("Read {} non-blank rows from {}", rows.len(), path.display());
        Ok(rows)
    }
}

fn read_workbook(path: &Path, sheet: &str) -> Result<Vec<Vec<String>>, SourceError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| SourceError::Open {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(SourceError::SheetNotFound {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
        });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| SourceError::Read(format!("Failed to read sheet '{sheet}': {e}")))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

fn read_delimited(path: &Path, delimiter: u8) -> Result<Vec<Vec<String>>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| SourceError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut table = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| SourceError::Read(e.to_string()))?;
        table.push(record.iter().map(|field| field.to_string()).collect());
    }
    Ok(table)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // Integers without decimals
        Data::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
        Data::Float(n) => format!("{n}"),
        Data::Int(n) => format!("{n}"),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => match dt.as_datetime().filter(|_| dt.is_datetime()) {
            Some(datetime) => datetime.to_string(),
            None => format!("{}", dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Turn a raw table (header row first) into non-blank data rows
fn rows_from_table(table: Vec<Vec<String>>) -> Vec<DataRow> {
    let mut lines = table.into_iter();
    let headers: Vec<String> = match lines.next() {
        Some(header_row) => header_row.into_iter().map(|h| h.trim().to_string()).collect(),
        None => return Vec::new(),
    };

    lines
        .map(|raw| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, header)| !header.is_empty())
                .map(|(i, header)| {
                    let value = raw.get(i).map(|v| v.trim()).unwrap_or_default();
                    (header.clone(), value.to_string())
                })
                .collect::<DataRow>()
        })
        .filter(|row| !row.is_blank())
        .collect()
}
