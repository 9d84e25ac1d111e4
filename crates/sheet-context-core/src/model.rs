//! In-memory workbook model shared by the summary, search and context builders.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Number of header rows consumed before the first data row.
pub const HEADER_ROW_OFFSET: usize = 1;

/// Placeholder rendered for cells that hold no value.
pub const MISSING_CELL: &str = "N/A";

/// A raw cell value as read from the container.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    Empty,
}

impl CellValue {
    /// Blank cells are rendered as [`MISSING_CELL`] and never match a search.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            Self::Number(_) | Self::Boolean(_) => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(value) => write_number(f, *value),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Empty => Ok(()),
        }
    }
}

/// Plain decimal notation inside `[1e-6, 1e21)`, exponent form (`1e+21`,
/// `1.5e-7`) outside it.
fn write_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    // Avoid "-0" for negative zero.
    if value == 0.0 {
        return f.write_str("0");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    let magnitude = value.abs();
    if value.is_nan() || (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{value}");
    }
    let exponent_form = format!("{value:e}");
    match exponent_form.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{mantissa}e+{exponent}")
        }
        _ => f.write_str(&exponent_form),
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// One worksheet: a header row plus data rows.
///
/// Rows are kept exactly as read, so a row may be shorter or longer than
/// `headers`. Use [`Sheet::cell`] rather than indexing directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
    row_count: usize,
    column_count: usize,
}

impl Sheet {
    #[must_use]
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let row_count = rows.len();
        let column_count = headers.len();
        Self {
            name: name.into(),
            headers,
            rows,
            row_count,
            column_count,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Non-blank cell at a data row and column, if any.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .filter(|cell| !cell.is_blank())
    }

    /// Header for a column, or a synthesized `Column N` label when the header
    /// row is too short or the header cell is blank.
    #[must_use]
    pub fn column_label(&self, column: usize) -> String {
        match self.headers.get(column) {
            Some(header) if !header.is_empty() => header.clone(),
            _ => format!("Column {}", column + 1),
        }
    }

    /// Render one row as `header: value` pairs for every header column.
    pub(crate) fn render_row(&self, row: &[CellValue], separator: &str) -> String {
        self.headers
            .iter()
            .enumerate()
            .map(|(column, header)| {
                let value = row
                    .get(column)
                    .filter(|cell| !cell.is_blank())
                    .map_or_else(|| MISSING_CELL.to_string(), ToString::to_string);
                format!("{header}: {value}")
            })
            .collect::<Vec<_>>()
            .join(separator)
    }

    pub(crate) fn row_context(&self, row: &[CellValue]) -> RowContext {
        let mut context = RowContext::default();
        for (column, header) in self.headers.iter().enumerate() {
            let value = row.get(column).filter(|cell| !cell.is_blank()).cloned();
            context.insert(header.clone(), value);
        }
        context
    }
}

/// A fully ingested spreadsheet. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workbook {
    sheets: Vec<Sheet>,
    sheet_names: Vec<String>,
    summary: String,
}

impl Workbook {
    pub(crate) fn new(sheets: Vec<Sheet>, summary: String) -> Self {
        let sheet_names = sheets.iter().map(|sheet| sheet.name.clone()).collect();
        Self {
            sheets,
            sheet_names,
            summary,
        }
    }

    #[must_use]
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    #[must_use]
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }
}

/// Header to value mapping for the row that produced a search hit.
///
/// Insertion order follows the header row. A repeated header keeps its first
/// position and takes the later value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowContext {
    entries: Vec<(String, Option<CellValue>)>,
}

impl RowContext {
    pub fn insert(&mut self, header: String, value: Option<CellValue>) {
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == header) {
            entry.1 = value;
        } else {
            self.entries.push((header, value));
        }
    }

    #[must_use]
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == header)
            .and_then(|(_, value)| value.as_ref())
    }

    #[must_use]
    pub fn contains_header(&self, header: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == header)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&CellValue>)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_ref()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for RowContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub sheet: String,
    /// 1-based row in the original spreadsheet, header row included.
    pub row: usize,
    pub column: String,
    pub value: CellValue,
    pub context: RowContext,
}
