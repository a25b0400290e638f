//! Record sampling for the designated helper sheet

use super::columns::resolve_fragments;
use crate::config::HeuristicConfig;
use crate::types::{CellValue, ColumnMapping, ColumnRole, Sheet};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// One sampled task row; every role is present, `None` when unresolved or empty
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRecord {
    pub row: usize,
    #[serde(flatten)]
    pub values: BTreeMap<ColumnRole, Option<CellValue>>,
}

impl SampleRecord {
    pub fn get(&self, role: ColumnRole) -> Option<&CellValue> {
        self.values.get(&role).and_then(Option::as_ref)
    }
}

/// A non-blank header label and its 1-based column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderLabel {
    pub column: usize,
    pub label: CellValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleReport {
    pub sheet: String,
    pub headers: Vec<HeaderLabel>,
    pub columns: ColumnMapping,
    /// Rows with a non-blank task cell within the row limit; `None` when the
    /// task column could not be resolved
    pub task_rows: Option<usize>,
    pub records: Vec<SampleRecord>,
}

/// Sample task records from the helper sheet (header fixed at row 1)
pub fn sample_sheet(sheet: &Sheet, config: &HeuristicConfig) -> SampleReport {
    let header_values: Vec<CellValue> = (1..=config.sample_header_columns)
        .map(|c| sheet.cell(1, c).clone())
        .collect();

    let headers = header_values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_blank())
        .map(|(i, v)| HeaderLabel {
            column: i + 1,
            label: v.clone(),
        })
        .collect();

    let columns = resolve_fragments(&header_values, |role| {
        config.sample_fragment(role).map(str::to_string)
    });

    let Some(task_col) = columns.get(&ColumnRole::Task).copied().flatten() else {
        debug!(sheet = %sheet.name, "no task column on sample sheet");
        return SampleReport {
            sheet: sheet.name.clone(),
            headers,
            columns,
            task_rows: None,
            records: Vec::new(),
        };
    };

    let last_row = sheet.max_row().min(config.sample_row_limit);
    let task_rows: Vec<usize> = (2..=last_row)
        .filter(|&r| !sheet.cell(r, task_col).is_blank())
        .collect();

    let records = task_rows
        .iter()
        .take(config.sample_size)
        .map(|&row| SampleRecord {
            row,
            values: columns
                .iter()
                .map(|(&role, &col)| {
                    let value = col
                        .map(|c| sheet.cell(row, c))
                        .filter(|v| !matches!(v, CellValue::Empty))
                        .cloned();
                    (role, value)
                })
                .collect(),
        })
        .collect();

    debug!(sheet = %sheet.name, task_col, task_rows = task_rows.len(), "sampled records");

    SampleReport {
        sheet: sheet.name.clone(),
        headers,
        columns,
        task_rows: Some(task_rows.len()),
        records,
    }
}
