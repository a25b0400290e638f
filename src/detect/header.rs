//! Header row detection

use super::{normalize, normalize_str};
use crate::config::HeuristicConfig;
use crate::types::{CellValue, Sheet};
use serde::Serialize;
use tracing::debug;

/// A detected header row and its raw values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderRow {
    /// 1-based row index
    pub row: usize,
    pub values: Vec<CellValue>,
    /// True when this is the fixed-row fallback (task alias only, no due alias)
    pub fallback: bool,
}

/// Find the header row of a task table.
///
/// The first row in the window holding both a task alias and a due alias
/// wins. If there is none, the configured fallback row is returned when it
/// holds a task alias; otherwise nothing.
pub fn detect_header(sheet: &Sheet, config: &HeuristicConfig) -> Option<HeaderRow> {
    let last_row = config.max_scan_rows.min(sheet.max_row());
    let task_aliases = normalized_aliases(&config.task_aliases);
    let due_aliases = normalized_aliases(&config.due_aliases);
    let mut fallback: Option<HeaderRow> = None;

    for row in 1..=last_row {
        let values = sheet.row_values(row, config.max_scan_columns);
        let normalized: Vec<String> = values.iter().map(normalize).collect();

        let has_task = normalized.iter().any(|v| task_aliases.contains(v));
        if has_task && normalized.iter().any(|v| due_aliases.contains(v)) {
            debug!(sheet = %sheet.name, row, "header row found");
            return Some(HeaderRow {
                row,
                values,
                fallback: false,
            });
        }

        // Helper sheets carry descriptive rows above the real header
        if row == config.fallback_header_row && has_task {
            fallback = Some(HeaderRow {
                row,
                values,
                fallback: true,
            });
        }
    }

    match &fallback {
        Some(h) => debug!(sheet = %sheet.name, row = h.row, "using fallback header row"),
        None => debug!(sheet = %sheet.name, "no header row"),
    }
    fallback
}

fn normalized_aliases(aliases: &[String]) -> Vec<String> {
    aliases.iter().map(|a| normalize_str(a)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(cells: &[&str]) -> Vec<CellValue> {
        cells
            .iter()
            .map(|c| {
                if c.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::from(*c)
                }
            })
            .collect()
    }

    fn config() -> HeuristicConfig {
        HeuristicConfig::default()
    }

    #[test]
    fn test_header_at_first_row() {
        let sheet = Sheet::visible(
            "Tareas",
            vec![row(&["Tarea", "Fecha fin"]), row(&["A", "2024-01-01"])],
        );
        let header = detect_header(&sheet, &config()).unwrap();
        assert_eq!(header.row, 1);
        assert!(!header.fallback);
        assert_eq!(header.values, row(&["Tarea", "Fecha fin"]));
    }

    #[test]
    fn test_normalization_applies_to_cells() {
        let sheet = Sheet::visible("S", vec![row(&["  TASK\nHELPER ", "Due\nDate"])]);
        assert_eq!(detect_header(&sheet, &config()).unwrap().row, 1);
    }

    #[test]
    fn test_earliest_full_match_wins() {
        let sheet = Sheet::visible(
            "S",
            vec![
                row(&["Plan de mantención"]),
                row(&["Task", "Due Date"]),
                row(&["x"]),
                row(&["Tarea", "Fecha fin"]),
            ],
        );
        assert_eq!(detect_header(&sheet, &config()).unwrap().row, 2);
    }

    #[test]
    fn test_full_match_beats_partial_row_four() {
        let sheet = Sheet::visible(
            "S",
            vec![
                row(&["title"]),
                row(&[""]),
                row(&[""]),
                row(&["Task Helper", "Other"]),
                row(&[""]),
                row(&["Actividad", "Término"]),
            ],
        );
        let header = detect_header(&sheet, &config()).unwrap();
        assert_eq!(header.row, 6);
        assert!(!header.fallback);
    }

    #[test]
    fn test_fallback_to_row_four() {
        let sheet = Sheet::visible(
            "Task_Helper",
            vec![
                row(&["Helper table"]),
                row(&["generated"]),
                row(&[""]),
                row(&["#", "Task Helper", "Owner"]),
                row(&["1", "Pump check", "Ana"]),
            ],
        );
        let header = detect_header(&sheet, &config()).unwrap();
        assert_eq!(header.row, 4);
        assert!(header.fallback);
        assert_eq!(header.values, row(&["#", "Task Helper", "Owner"]));
    }

    #[test]
    fn test_full_match_on_row_four_is_not_fallback() {
        let sheet = Sheet::visible(
            "S",
            vec![row(&["a"]), row(&["b"]), row(&["c"]), row(&["Task", "Fin"])],
        );
        let header = detect_header(&sheet, &config()).unwrap();
        assert_eq!(header.row, 4);
        assert!(!header.fallback);
    }

    #[test]
    fn test_partial_match_elsewhere_is_ignored() {
        let sheet = Sheet::visible(
            "S",
            vec![row(&["Task"]), row(&["x"]), row(&["y"]), row(&["z"])],
        );
        assert!(detect_header(&sheet, &config()).is_none());
    }

    #[test]
    fn test_short_sheet_never_falls_back() {
        let sheet = Sheet::visible("S", vec![row(&["a"]), row(&["b"]), row(&["Task"])]);
        assert!(detect_header(&sheet, &config()).is_none());
    }

    #[test]
    fn test_empty_sheet_not_found() {
        let sheet = Sheet::visible("Empty", vec![]);
        assert!(detect_header(&sheet, &config()).is_none());
    }

    #[test]
    fn test_scan_window_is_bounded() {
        let mut rows: Vec<Vec<CellValue>> = (0..5).map(|_| row(&["filler"])).collect();
        rows.push(row(&["Task", "Due Date"]));
        let sheet = Sheet::visible("S", rows);

        let mut config = config();
        config.max_scan_rows = 5;
        assert!(detect_header(&sheet, &config).is_none());

        config.max_scan_rows = 6;
        assert_eq!(detect_header(&sheet, &config).unwrap().row, 6);
    }

    #[test]
    fn test_column_window_is_bounded() {
        let sheet = Sheet::visible("S", vec![row(&["Task", "", "", "Due Date"])]);
        let mut config = config();
        config.max_scan_columns = 3;
        assert!(detect_header(&sheet, &config).is_none());
    }

    #[test]
    fn test_detection_is_deterministic() {
        let sheet = Sheet::visible(
            "S",
            vec![row(&["x"]), row(&["Nombre", "Fecha término"]), row(&["a", "b"])],
        );
        let first = detect_header(&sheet, &config());
        let second = detect_header(&sheet, &config());
        assert_eq!(first, second);
        assert_eq!(first.unwrap().row, 2);
    }
}
