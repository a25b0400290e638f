//! Task row counting below a detected header

use super::columns::{resolve, ResolveStrategy};
use super::header::detect_header;
use crate::config::HeuristicConfig;
use crate::types::Sheet;
use serde::Serialize;
use tracing::debug;

/// Per-sheet task counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountSummary {
    pub header_row: usize,
    pub task_col: usize,
    pub due_col: Option<usize>,
    pub rows_with_name: usize,
    /// Only present when a due column was resolved
    pub rows_with_name_and_due: Option<usize>,
}

/// Count task rows in a sheet.
///
/// `None` when no header row is found or no task column resolves against it;
/// the caller reports that as "no detectable task table".
pub fn count_tasks(sheet: &Sheet, config: &HeuristicConfig) -> Option<CountSummary> {
    let header = detect_header(sheet, config)?;
    let task_col = resolve(
        &header.values,
        ResolveStrategy::ExactAlias(&config.task_candidates),
    )?;
    let due_col = resolve(
        &header.values,
        ResolveStrategy::ExactAlias(&config.due_candidates),
    );

    let mut rows_with_name = 0;
    let mut rows_with_name_and_due = 0;
    for row in (header.row + 1)..=sheet.max_row() {
        if sheet.cell(row, task_col).is_blank() {
            continue;
        }
        rows_with_name += 1;
        if let Some(due) = due_col {
            if !sheet.cell(row, due).is_blank() {
                rows_with_name_and_due += 1;
            }
        }
    }

    debug!(
        sheet = %sheet.name,
        header_row = header.row,
        task_col,
        ?due_col,
        rows_with_name,
        "counted task rows"
    );

    Some(CountSummary {
        header_row: header.row,
        task_col,
        due_col,
        rows_with_name,
        rows_with_name_and_due: due_col.map(|_| rows_with_name_and_due),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;
    use pretty_assertions::assert_eq;

    fn cell(v: Option<&str>) -> CellValue {
        v.into()
    }

    #[test]
    fn test_tareas_scenario() {
        let sheet = Sheet::visible(
            "Tareas",
            vec![
                vec![cell(Some("Tarea")), cell(Some("Fecha fin"))],
                vec![cell(Some("A")), cell(Some("2024-01-01"))],
                vec![cell(Some("B")), cell(None)],
                vec![cell(None), cell(Some("2024-02-01"))],
            ],
        );
        let summary = count_tasks(&sheet, &HeuristicConfig::default()).unwrap();
        assert_eq!(
            summary,
            CountSummary {
                header_row: 1,
                task_col: 1,
                due_col: Some(2),
                rows_with_name: 2,
                rows_with_name_and_due: Some(1),
            }
        );
    }

    #[test]
    fn test_whitespace_only_cells_are_blank() {
        let sheet = Sheet::visible(
            "S",
            vec![
                vec!["Task".into(), "Due Date".into()],
                vec!["   ".into(), "2024-01-01".into()],
                vec!["Real".into(), " ".into()],
            ],
        );
        let summary = count_tasks(&sheet, &HeuristicConfig::default()).unwrap();
        assert_eq!(summary.rows_with_name, 1);
        assert_eq!(summary.rows_with_name_and_due, Some(0));
    }

    #[test]
    fn test_no_due_column() {
        // Row 4 fallback: task alias without any due alias
        let sheet = Sheet::visible(
            "Helper",
            vec![
                vec!["notes".into()],
                vec![],
                vec![],
                vec!["Nombre".into(), "Responsable".into()],
                vec!["Cambio de aceite".into(), "Luis".into()],
                vec!["Revisión bomba".into()],
            ],
        );
        let summary = count_tasks(&sheet, &HeuristicConfig::default()).unwrap();
        assert_eq!(summary.header_row, 4);
        assert_eq!(summary.due_col, None);
        assert_eq!(summary.rows_with_name, 2);
        assert_eq!(summary.rows_with_name_and_due, None);
    }

    #[test]
    fn test_header_without_task_candidate() {
        // "task name" is a detection alias but not a task-column candidate
        let sheet = Sheet::visible(
            "S",
            vec![
                vec!["Task Name".into(), "Due Date".into()],
                vec!["A".into(), "B".into()],
            ],
        );
        assert!(count_tasks(&sheet, &HeuristicConfig::default()).is_none());
    }

    #[test]
    fn test_zero_row_sheet() {
        let sheet = Sheet::visible("Empty", vec![]);
        assert!(count_tasks(&sheet, &HeuristicConfig::default()).is_none());
    }

    #[test]
    fn test_numbers_and_dates_count_as_values() {
        let sheet = Sheet::visible(
            "S",
            vec![
                vec!["Actividad".into(), "Término".into()],
                vec![CellValue::Number(101.0), CellValue::Number(45292.0)],
                vec![CellValue::Bool(false), CellValue::Empty],
            ],
        );
        let summary = count_tasks(&sheet, &HeuristicConfig::default()).unwrap();
        assert_eq!(summary.rows_with_name, 2);
        assert_eq!(summary.rows_with_name_and_due, Some(1));
    }

    #[test]
    fn test_name_and_due_never_exceeds_name() {
        let rows: Vec<Vec<CellValue>> = std::iter::once(vec!["Task".into(), "Fin".into()])
            .chain((0..50).map(|i| {
                let name: CellValue = if i % 3 == 0 { CellValue::Empty } else { "t".into() };
                let due: CellValue = if i % 2 == 0 { "d".into() } else { CellValue::Empty };
                vec![name, due]
            }))
            .collect();
        let sheet = Sheet::visible("S", rows);
        let summary = count_tasks(&sheet, &HeuristicConfig::default()).unwrap();
        assert!(summary.rows_with_name_and_due.unwrap() <= summary.rows_with_name);
    }

    #[test]
    fn test_due_candidate_priority_over_column_order() {
        let sheet = Sheet::visible(
            "Plan",
            vec![
                vec![cell(Some("Tarea")), cell(Some("Fecha fin")), cell(Some("Due Date"))],
                vec![cell(Some("A")), cell(None), cell(Some("2024-01-01"))],
            ],
        );
        let summary = count_tasks(&sheet, &HeuristicConfig::default()).unwrap();
        assert_eq!(summary.due_col, Some(3));
        assert_eq!(summary.rows_with_name_and_due, Some(1));
    }
}
