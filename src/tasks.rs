//! Gantt helper import - helper sheet rows → structured tasks
//!
//! Reads the normalized task table the template keeps for its Gantt chart and
//! turns every dated row into a `GanttTask`, grouping tasks of the same phase
//! under the first task of that phase.

use crate::config::ImportConfig;
use crate::dates::cell_to_date;
use crate::detect::{resolve, ResolveStrategy};
use crate::error::{ProbeError, ProbeResult};
use crate::types::{CellValue, ColumnRole, Sheet, Workbook};
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

const ID_NAME_CHARS: usize = 40;

/// A task ready to be loaded into a Gantt view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttTask {
    pub id: String,
    pub name: String,
    pub project_id: Option<CellValue>,
    pub phase_id: Option<CellValue>,
    pub assignee: Option<String>,
    pub team: Option<String>,
    pub status: Option<String>,
    /// 0..=100
    pub progress: f64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub level: u8,
    pub parent_id: Option<String>,
    pub dependencies: Vec<String>,
}

/// Lower-case, URL-ish identifier fragment (keeps Spanish letters)
pub struct Slugger {
    separators: Regex,
}

impl Slugger {
    pub fn new() -> ProbeResult<Self> {
        let separators = Regex::new(r"(?i)[^a-z0-9áéíóúñü]+")
            .map_err(|e| ProbeError::Import(format!("Regex error: {}", e)))?;
        Ok(Self { separators })
    }

    pub fn slug(&self, s: &str) -> String {
        let lowered = s.trim().to_lowercase();
        self.separators
            .replace_all(&lowered, "-")
            .trim_matches('-')
            .to_string()
    }
}

/// Import tasks from the configured helper sheet of `workbook`
pub fn import_tasks(workbook: &Workbook, config: &ImportConfig) -> ProbeResult<Vec<GanttTask>> {
    let sheet = workbook
        .sheet(&config.sheet)
        .ok_or_else(|| ProbeError::SheetNotFound(config.sheet.clone()))?;
    import_sheet(sheet, config)
}

/// Import tasks from one sheet whose header is row 1
pub fn import_sheet(sheet: &Sheet, config: &ImportConfig) -> ProbeResult<Vec<GanttTask>> {
    let headers = sheet.row_values(1, sheet.max_column());
    let col =
        |role: ColumnRole| resolve(&headers, ResolveStrategy::ExactAlias(config.candidates(role)));

    let task_col = col(ColumnRole::Task).ok_or_else(|| {
        ProbeError::Import(format!("No task column ({}) in '{}'", config.task.join(" / "), sheet.name))
    })?;
    let due_col = col(ColumnRole::Due).ok_or_else(|| {
        ProbeError::Import(format!("No due date column ({}) in '{}'", config.due.join(" / "), sheet.name))
    })?;
    let project_col = col(ColumnRole::Project);
    let phase_col = col(ColumnRole::Phase);
    let assignee_col = col(ColumnRole::Assignee);
    let team_col = col(ColumnRole::Team);
    let status_col = col(ColumnRole::Status);
    let completion_col = col(ColumnRole::Completion);
    let start_col = col(ColumnRole::Start);

    let value_at = |row: usize, c: Option<usize>| -> Option<CellValue> {
        c.map(|c| sheet.cell(row, c))
            .filter(|v| !v.is_blank())
            .cloned()
    };

    let slugger = Slugger::new()?;
    let mut tasks = Vec::new();
    let mut skipped_undated = 0usize;

    for row in 2..=sheet.max_row() {
        let name = sheet.cell(row, task_col).to_string().trim().to_string();
        if name.is_empty() {
            continue;
        }

        let Some(end) = cell_to_date(sheet.cell(row, due_col)) else {
            skipped_undated += 1;
            continue;
        };
        let start = start_col
            .and_then(|c| cell_to_date(sheet.cell(row, c)))
            .unwrap_or(end);

        let project_id = value_at(row, project_col);
        let phase_id = value_at(row, phase_col);

        let project_key = project_id
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "p".to_string());
        let name_slug: String = slugger.slug(&name).chars().take(ID_NAME_CHARS).collect();
        let id = format!("{}-{}-{}", slugger.slug(&project_key), row, name_slug);

        tasks.push(GanttTask {
            id,
            name,
            project_id,
            phase_id,
            assignee: text_at(sheet, row, assignee_col),
            team: text_at(sheet, row, team_col),
            status: text_at(sheet, row, status_col),
            progress: progress_from(completion_col.map(|c| sheet.cell(row, c))),
            start,
            end,
            level: 0,
            parent_id: None,
            dependencies: Vec::new(),
        });
    }

    if skipped_undated > 0 {
        debug!(sheet = %sheet.name, skipped_undated, "rows without a usable due date");
    }
    if tasks.is_empty() {
        return Err(ProbeError::Import(format!(
            "No importable tasks found in '{}'",
            sheet.name
        )));
    }

    assign_hierarchy(&mut tasks);
    let tasks = dedupe_by_id(tasks);
    info!(sheet = %sheet.name, count = tasks.len(), "imported tasks");
    Ok(tasks)
}

/// Trimmed text of a cell, `None` when blank or the column is missing
fn text_at(sheet: &Sheet, row: usize, col: Option<usize>) -> Option<String> {
    let text = sheet.cell(row, col?).to_string();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Completion fraction → percentage in 0..=100. Anything non-numeric is 0.
fn progress_from(value: Option<&CellValue>) -> f64 {
    let fraction = match value {
        None | Some(CellValue::Empty) => 0.0,
        Some(CellValue::Number(n)) => *n,
        Some(CellValue::Bool(b)) => f64::from(u8::from(*b)),
        Some(CellValue::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Some(CellValue::Date(_)) => f64::NAN,
    };
    if fraction.is_finite() {
        (fraction * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// First task of each phase becomes the parent of the phase's later tasks
fn assign_hierarchy(tasks: &mut [GanttTask]) {
    let mut phase_leaders: HashMap<String, String> = HashMap::new();
    for task in tasks.iter_mut() {
        let Some(phase) = task.phase_id.as_ref().map(|p| p.to_string()) else {
            task.level = 0;
            task.parent_id = None;
            continue;
        };
        let leader = phase_leaders
            .entry(phase)
            .or_insert_with(|| task.id.clone());
        if *leader == task.id {
            task.level = 0;
            task.parent_id = None;
        } else {
            task.level = 1;
            task.parent_id = Some(leader.clone());
        }
    }
}

fn dedupe_by_id(tasks: Vec<GanttTask>) -> Vec<GanttTask> {
    let mut seen = HashSet::new();
    tasks
        .into_iter()
        .filter(|t| seen.insert(t.id.clone()))
        .collect()
}
