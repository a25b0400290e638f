use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

//==============================================================================
// Cell values
//==============================================================================

/// A single cell value as seen by the heuristics.
///
/// Formulas, styles and rich text are not modelled: the loader hands over the
/// cached value only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
    Bool(bool),
}

impl CellValue {
    /// Blank = no value, or text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Date(dt) => {
                if dt.num_seconds_from_midnight() == 0 {
                    write!(f, "{}", dt.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
                }
            }
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::Date(dt)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// Format a number for display, removing unnecessary decimal places
pub fn format_number(n: f64) -> String {
    // Round to 6 decimal places for display
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

//==============================================================================
// Sheets and workbooks
//==============================================================================

/// Sheet-level display attribute, unrelated to its data content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    Visible,
    Hidden,
    VeryHidden,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Visible => "visible",
            Visibility::Hidden => "hidden",
            Visibility::VeryHidden => "very-hidden",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static EMPTY_CELL: CellValue = CellValue::Empty;

/// A read-only worksheet grid addressed by 1-based (row, column)
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub visibility: Visibility,
    rows: Vec<Vec<CellValue>>,
    max_column: usize,
}

impl Sheet {
    /// Build a sheet from rows starting at A1. Ragged rows are allowed.
    pub fn new(name: impl Into<String>, visibility: Visibility, rows: Vec<Vec<CellValue>>) -> Self {
        let max_column = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self {
            name: name.into(),
            visibility,
            rows,
            max_column,
        }
    }

    /// Convenience constructor for visible sheets
    pub fn visible(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self::new(name, Visibility::Visible, rows)
    }

    pub fn max_row(&self) -> usize {
        self.rows.len()
    }

    pub fn max_column(&self) -> usize {
        self.max_column
    }

    /// Cell at 1-based (row, col). Anything outside the grid is empty.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        if row == 0 || col == 0 {
            return &EMPTY_CELL;
        }
        self.rows
            .get(row - 1)
            .and_then(|r| r.get(col - 1))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Values of `row` for columns `1..=min(max_cols, max_column)`
    pub fn row_values(&self, row: usize, max_cols: usize) -> Vec<CellValue> {
        let width = max_cols.min(self.max_column);
        (1..=width).map(|c| self.cell(row, c).clone()).collect()
    }
}

/// All sheets of one workbook, in workbook order
#[derive(Debug, Clone)]
pub struct Workbook {
    pub path: PathBuf,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(path: impl Into<PathBuf>, sheets: Vec<Sheet>) -> Self {
        Self {
            path: path.into(),
            sheets,
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

//==============================================================================
// Column roles
//==============================================================================

/// Semantic role of a column in a task table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Project,
    Phase,
    Task,
    Assignee,
    Team,
    Status,
    Completion,
    Start,
    Due,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 9] = [
        ColumnRole::Project,
        ColumnRole::Phase,
        ColumnRole::Task,
        ColumnRole::Assignee,
        ColumnRole::Team,
        ColumnRole::Status,
        ColumnRole::Completion,
        ColumnRole::Start,
        ColumnRole::Due,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::Project => "project",
            ColumnRole::Phase => "phase",
            ColumnRole::Task => "task",
            ColumnRole::Assignee => "assignee",
            ColumnRole::Team => "team",
            ColumnRole::Status => "status",
            ColumnRole::Completion => "completion",
            ColumnRole::Start => "start",
            ColumnRole::Due => "due",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role → optional 1-based column index
pub type ColumnMapping = BTreeMap<ColumnRole, Option<usize>>;
