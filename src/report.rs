//! Inspection report - runs every heuristic over a workbook
//!
//! The report is plain data; rendering (coloured text or JSON) happens in the
//! CLI layer.

use crate::config::HeuristicConfig;
use crate::detect::{
    count_tasks, first_non_empty_cells, guess_purpose, sample_sheet, CellPreview, CountSummary,
    SampleReport, SheetPurpose,
};
use crate::types::{Sheet, Visibility, Workbook};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetState {
    pub name: String,
    pub state: Visibility,
}

/// Purpose guess plus what it was based on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub state: Visibility,
    pub purpose: SheetPurpose,
    pub description: &'static str,
    /// Text labels of row 1
    pub headers: Vec<String>,
    pub first_cells: Vec<CellPreview>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetCount {
    pub name: String,
    pub state: Visibility,
    /// `None`: no detectable task table
    pub counts: Option<CountSummary>,
}

/// Sums over all sheets; the same task may be counted on several sheets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub rows_with_name: usize,
    pub rows_with_name_and_due: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionReport {
    pub path: PathBuf,
    pub sheets: Vec<SheetState>,
    pub visible: Vec<String>,
    pub hidden: Vec<String>,
    /// Present only when the workbook has the sample sheet
    pub sample: Option<SampleReport>,
    pub summaries: Vec<SheetSummary>,
    pub counts: Vec<SheetCount>,
    pub totals: Totals,
}

/// Run all heuristics over `workbook`
pub fn inspect_workbook(workbook: &Workbook, config: &HeuristicConfig) -> InspectionReport {
    let sheets = sheet_states(workbook);

    let (visible, hidden): (Vec<&SheetState>, Vec<&SheetState>) = sheets
        .iter()
        .partition(|s| s.state == Visibility::Visible);
    let visible = visible.into_iter().map(|s| s.name.clone()).collect();
    let hidden = hidden.into_iter().map(|s| s.name.clone()).collect();

    let sample = workbook
        .sheet(&config.sample_sheet)
        .map(|sheet| sample_sheet(sheet, config));

    let summaries = workbook
        .sheets
        .iter()
        .map(|sheet| summarize_sheet(sheet, config))
        .collect();

    let counts: Vec<SheetCount> = workbook
        .sheets
        .iter()
        .map(|sheet| SheetCount {
            name: sheet.name.clone(),
            state: sheet.visibility,
            counts: count_tasks(sheet, config),
        })
        .collect();

    let totals = totals_of(&counts);
    info!(
        path = %workbook.path.display(),
        sheets = sheets.len(),
        rows_with_name = totals.rows_with_name,
        "inspected workbook"
    );

    InspectionReport {
        path: workbook.path.clone(),
        sheets,
        visible,
        hidden,
        sample,
        summaries,
        counts,
        totals,
    }
}

/// Name and visibility of every sheet, in workbook order
pub fn sheet_states(workbook: &Workbook) -> Vec<SheetState> {
    workbook
        .sheets
        .iter()
        .map(|s| SheetState {
            name: s.name.clone(),
            state: s.visibility,
        })
        .collect()
}

/// Text labels from row 1 (within the configured width), as written
pub fn header_labels(sheet: &Sheet, max_columns: usize) -> Vec<String> {
    sheet
        .row_values(1, max_columns)
        .into_iter()
        .filter_map(|v| v.as_text().map(str::to_string))
        .filter(|s| !s.trim().is_empty())
        .collect()
}

fn summarize_sheet(sheet: &Sheet, config: &HeuristicConfig) -> SheetSummary {
    let headers = header_labels(sheet, config.purpose_header_columns);
    let purpose = guess_purpose(&sheet.name, &headers);
    SheetSummary {
        name: sheet.name.clone(),
        state: sheet.visibility,
        purpose,
        description: purpose.description(),
        headers,
        first_cells: first_non_empty_cells(sheet, &config.cell_preview),
    }
}

fn totals_of(counts: &[SheetCount]) -> Totals {
    counts
        .iter()
        .filter_map(|c| c.counts.as_ref())
        .fold(Totals::default(), |acc, c| Totals {
            rows_with_name: acc.rows_with_name + c.rows_with_name,
            rows_with_name_and_due: acc.rows_with_name_and_due
                + c.rows_with_name_and_due.unwrap_or(0),
        })
}
