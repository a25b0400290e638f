//! Sheet purpose guessing

use serde::Serialize;
use std::fmt;

/// Best-effort classification of a sheet in a Gantt template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetPurpose {
    Settings,
    MainTaskTable,
    Timeline,
    GanttHelper,
    TaskHelper,
    HelperWithTaskAndDue,
    TaskSheet,
    Auxiliary,
}

impl SheetPurpose {
    pub fn description(&self) -> &'static str {
        match self {
            SheetPurpose::Settings => {
                "Template configuration (parameters, validation lists, auxiliary values)."
            }
            SheetPurpose::MainTaskTable => {
                "Main task table (manual user input; usually feeds the helper sheets)."
            }
            SheetPurpose::Timeline => {
                "Timeline-style visualization/summary sheet (derived chart or table)."
            }
            SheetPurpose::GanttHelper => {
                "Gantt helper table (normalized tasks so the chart can read dates, status and assignee)."
            }
            SheetPurpose::TaskHelper => {
                "Task helper table (calculated/auxiliary columns used by the template and/or Gantt)."
            }
            SheetPurpose::HelperWithTaskAndDue => {
                "Helper table with Task/Due Date columns (likely direct source for importing tasks)."
            }
            SheetPurpose::TaskSheet => "Task sheet (contains date columns and task names).",
            SheetPurpose::Auxiliary => {
                "Auxiliary template sheet (purpose not obvious without reviewing more content)."
            }
        }
    }
}

impl fmt::Display for SheetPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Guess a sheet's purpose from its name, then from its header labels.
/// First matching rule wins; always returns something.
pub fn guess_purpose<S: AsRef<str>>(sheet_name: &str, headers: &[S]) -> SheetPurpose {
    let name = sheet_name.to_lowercase();
    let joined = headers
        .iter()
        .map(|h| h.as_ref().to_lowercase())
        .filter(|h| !h.is_empty())
        .collect::<Vec<_>>()
        .join(" | ");

    match name.as_str() {
        "settings" => return SheetPurpose::Settings,
        "tareas" => return SheetPurpose::MainTaskTable,
        "timeline" => return SheetPurpose::Timeline,
        _ => {}
    }
    if name.contains("gantt_helper") {
        return SheetPurpose::GanttHelper;
    }
    if name.contains("task_helper") {
        return SheetPurpose::TaskHelper;
    }

    if joined.contains("task helper") && joined.contains("due date") {
        return SheetPurpose::HelperWithTaskAndDue;
    }
    if joined.contains("fecha") && (joined.contains("tarea") || joined.contains("task")) {
        return SheetPurpose::TaskSheet;
    }
    SheetPurpose::Auxiliary
}
