//! First non-empty cells of a sheet, for the purpose summary

use crate::config::CellPreviewConfig;
use crate::types::{CellValue, Sheet};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellPreview {
    pub row: usize,
    pub column: usize,
    pub value: CellValue,
}

/// Cut `s` to `max_chars` characters, ending in "..." when shortened
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Row-major scan of the top-left window, skipping blanks
pub fn first_non_empty_cells(sheet: &Sheet, config: &CellPreviewConfig) -> Vec<CellPreview> {
    let last_row = config.max_rows.min(sheet.max_row());
    let last_col = config.max_columns.min(sheet.max_column());

    let mut found = Vec::new();
    for row in 1..=last_row {
        for column in 1..=last_col {
            let cell = sheet.cell(row, column);
            if cell.is_blank() {
                continue;
            }
            let value = match cell {
                CellValue::Text(s) => {
                    let compact = s.split_whitespace().collect::<Vec<_>>().join(" ");
                    CellValue::Text(truncate_chars(&compact, config.max_chars))
                }
                other => other.clone(),
            };
            found.push(CellPreview { row, column, value });
            if found.len() >= config.limit {
                return found;
            }
        }
    }
    found
}
