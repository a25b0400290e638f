//! Task-table heuristics
//!
//! Pure functions over a loaded `Sheet`:
//! - `header`: find the header row of a task table
//! - `columns`: map semantic roles to column indices
//! - `counter`: count task rows below a detected header
//! - `sampler`: sample records from the designated helper sheet
//! - `purpose`: guess what a sheet is for
//! - `preview`: first non-empty cells of a sheet, for display

pub mod columns;
pub mod counter;
pub mod header;
pub mod preview;
pub mod purpose;
pub mod sampler;

pub use columns::{resolve, resolve_exact, resolve_fragment, resolve_fragments, ResolveStrategy};
pub use counter::{count_tasks, CountSummary};
pub use header::{detect_header, HeaderRow};
pub use preview::{first_non_empty_cells, truncate_chars, CellPreview};
pub use purpose::{guess_purpose, SheetPurpose};
pub use sampler::{sample_sheet, SampleRecord, SampleReport};

use crate::types::CellValue;

/// Normalized label: stringified, trimmed, lower-cased, newlines as spaces
pub fn normalize(value: &CellValue) -> String {
    normalize_str(&value.to_string())
}

pub fn normalize_str(s: &str) -> String {
    s.trim().to_lowercase().replace("\r\n", " ").replace(['\n', '\r'], " ")
}
