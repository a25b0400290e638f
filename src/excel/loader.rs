//! Workbook loader - spreadsheet file → in-memory `Workbook`

use crate::dates::{excel_serial_to_datetime, parse_datetime_str};
use crate::error::{ProbeError, ProbeResult};
use crate::types::{CellValue, Sheet, Visibility, Workbook};
use calamine::{open_workbook_auto, Data, Range, Reader, SheetType, SheetVisible};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Loads every sheet of a workbook (xlsx, xlsm, xlsb, xls, ods) into a grid
pub struct WorkbookLoader {
    path: PathBuf,
}

impl WorkbookLoader {
    /// Create a new loader
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Open the workbook and read all sheets, in workbook order
    pub fn load(&self) -> ProbeResult<Workbook> {
        if !self.path.is_file() {
            return Err(ProbeError::FileNotFound(self.path.clone()));
        }

        let mut workbook = open_workbook_auto(&self.path).map_err(|e| {
            ProbeError::Workbook(format!("{}: {}", self.path.display(), e))
        })?;

        // (name, is worksheet, visibility)
        let metadata: Vec<(String, bool, Visibility)> = workbook
            .sheets_metadata()
            .iter()
            .map(|s| {
                (
                    s.name.clone(),
                    matches!(s.typ, SheetType::WorkSheet),
                    visibility_of(&s.visible),
                )
            })
            .collect();

        let mut sheets = Vec::with_capacity(metadata.len());
        for (name, is_worksheet, visibility) in metadata {
            let rows = if is_worksheet {
                match workbook.worksheet_range(&name) {
                    Ok(range) => grid_from_range(&range),
                    Err(e) => {
                        warn!(sheet = %name, error = %e, "unreadable sheet, treating as empty");
                        Vec::new()
                    }
                }
            } else {
                // Chart and macro sheets have no cell grid
                debug!(sheet = %name, "skipping non-worksheet");
                Vec::new()
            };

            let sheet = Sheet::new(name, visibility, rows);
            debug!(
                sheet = %sheet.name,
                state = %sheet.visibility,
                max_row = sheet.max_row(),
                max_column = sheet.max_column(),
                "loaded sheet"
            );
            sheets.push(sheet);
        }

        Ok(Workbook::new(self.path.clone(), sheets))
    }
}

fn visibility_of(visible: &SheetVisible) -> Visibility {
    match visible {
        SheetVisible::Visible => Visibility::Visible,
        SheetVisible::Hidden => Visibility::Hidden,
        SheetVisible::VeryHidden => Visibility::VeryHidden,
    }
}

/// Expand a calamine range (which may start anywhere) into rows anchored at A1
fn grid_from_range(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let (start_row, start_col) = match range.start() {
        Some((r, c)) => (r as usize, c as usize),
        None => return Vec::new(),
    };

    let mut grid: Vec<Vec<CellValue>> = vec![Vec::new(); start_row];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_col];
        cells.extend(row.iter().map(cell_from_data));
        // Trailing blanks don't widen the sheet
        while cells.last().is_some_and(|c| matches!(c, CellValue::Empty)) {
            cells.pop();
        }
        grid.push(cells);
    }

    // Same for trailing blank rows
    while grid.last().is_some_and(|r| r.is_empty()) {
        grid.pop();
    }
    grid
}

/// Convert a calamine cell into the heuristics' value model
pub(crate) fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            excel_serial_to_datetime(serial)
                .map(CellValue::Date)
                .unwrap_or(CellValue::Number(serial))
        }
        Data::DateTimeIso(s) => parse_datetime_str(s)
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;
    use chrono::NaiveDate;

    #[test]
    fn test_cell_from_data_scalars() {
        assert_eq!(cell_from_data(&Data::Empty), CellValue::Empty);
        assert_eq!(
            cell_from_data(&Data::String("Tarea".to_string())),
            CellValue::from("Tarea")
        );
        assert_eq!(cell_from_data(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(cell_from_data(&Data::Float(0.5)), CellValue::Number(0.5));
        assert_eq!(cell_from_data(&Data::Bool(true)), CellValue::Bool(true));
    }

    #[test]
    fn test_cell_from_data_iso_date() {
        let value = cell_from_data(&Data::DateTimeIso("2024-03-01".to_string()));
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(value, CellValue::Date(expected));

        let value = cell_from_data(&Data::DateTimeIso("garbage".to_string()));
        assert_eq!(value, CellValue::from("garbage"));
    }

    #[test]
    fn test_cell_from_data_error_is_text() {
        let value = cell_from_data(&Data::Error(CellErrorType::NA));
        assert_eq!(value, CellValue::from("#N/A"));
    }

    #[test]
    fn test_grid_anchored_at_a1() {
        // Range covering B2:C3
        let mut range = Range::new((1, 1), (2, 2));
        range.set_value((1, 1), Data::String("Task".to_string()));
        range.set_value((2, 2), Data::String("Due Date".to_string()));

        let grid = grid_from_range(&range);
        assert_eq!(grid.len(), 3);
        assert!(grid[0].is_empty());
        assert_eq!(grid[1][1], CellValue::from("Task"));
        assert_eq!(grid[2][2], CellValue::from("Due Date"));
    }

    #[test]
    fn test_grid_of_empty_range() {
        let range: Range<Data> = Range::empty();
        assert!(grid_from_range(&range).is_empty());
    }

    #[test]
    fn test_missing_file() {
        let result = WorkbookLoader::new("no/such/workbook.xlsx").load();
        assert!(matches!(result, Err(ProbeError::FileNotFound(_))));
    }
}
