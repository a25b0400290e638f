//! Heuristic configuration
//!
//! Every alias list, fragment and scan limit used by the detectors lives here
//! so the matching policy is data that can be reviewed, overridden from YAML,
//! and tested without touching a workbook.

use crate::error::{ProbeError, ProbeResult};
use crate::types::ColumnRole;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Window and limits for the "first non-empty cells" preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellPreviewConfig {
    pub max_rows: usize,
    pub max_columns: usize,
    pub limit: usize,
    /// Longer strings are cut to `max_chars - 3` characters plus "..."
    pub max_chars: usize,
}

impl Default for CellPreviewConfig {
    fn default() -> Self {
        Self {
            max_rows: 30,
            max_columns: 30,
            limit: 8,
            max_chars: 80,
        }
    }
}

/// Exact-alias candidates for the Gantt helper task import, one list per role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub sheet: String,
    pub project: Vec<String>,
    pub phase: Vec<String>,
    pub task: Vec<String>,
    pub assignee: Vec<String>,
    pub team: Vec<String>,
    pub status: Vec<String>,
    pub completion: Vec<String>,
    pub start: Vec<String>,
    pub due: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            sheet: "Gantt_Helper".to_string(),
            project: strings(&["Project ID"]),
            phase: strings(&["Proj. Phase ID"]),
            task: strings(&["Task Helper"]),
            assignee: strings(&["Assignee Helper"]),
            team: strings(&["Team Helper"]),
            status: strings(&["Status Helper"]),
            completion: strings(&["Completion Helper"]),
            start: strings(&["Start Date Helper", "Start date Sort"]),
            due: strings(&["Due Date Helper"]),
        }
    }
}

impl ImportConfig {
    pub fn candidates(&self, role: ColumnRole) -> &[String] {
        match role {
            ColumnRole::Project => &self.project,
            ColumnRole::Phase => &self.phase,
            ColumnRole::Task => &self.task,
            ColumnRole::Assignee => &self.assignee,
            ColumnRole::Team => &self.team,
            ColumnRole::Status => &self.status,
            ColumnRole::Completion => &self.completion,
            ColumnRole::Start => &self.start,
            ColumnRole::Due => &self.due,
        }
    }
}

/// Matching policy for header detection, column resolution and sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Normalized labels that identify a task-name header cell
    pub task_aliases: Vec<String>,
    /// Normalized labels that identify a due-date header cell
    pub due_aliases: Vec<String>,
    /// Exact-match candidates for the task column, highest priority first
    pub task_candidates: Vec<String>,
    /// Exact-match candidates for the due column, highest priority first
    pub due_candidates: Vec<String>,
    /// One substring fragment per role for the sample sheet
    pub sample_fragments: BTreeMap<ColumnRole, String>,
    pub max_scan_rows: usize,
    pub max_scan_columns: usize,
    pub fallback_header_row: usize,
    pub sample_sheet: String,
    pub sample_header_columns: usize,
    pub sample_row_limit: usize,
    pub sample_size: usize,
    pub purpose_header_columns: usize,
    pub purpose_header_sample: usize,
    pub cell_preview: CellPreviewConfig,
    pub import: ImportConfig,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        let sample_fragments = [
            (ColumnRole::Project, "project"),
            (ColumnRole::Phase, "phase"),
            (ColumnRole::Task, "task"),
            (ColumnRole::Assignee, "assignee"),
            (ColumnRole::Team, "team"),
            (ColumnRole::Status, "status"),
            (ColumnRole::Completion, "completion"),
            (ColumnRole::Start, "start date"),
            (ColumnRole::Due, "due date"),
        ]
        .into_iter()
        .map(|(role, fragment)| (role, fragment.to_string()))
        .collect();

        Self {
            task_aliases: strings(&[
                "task helper",
                "task",
                "task name",
                "tarea",
                "tareas",
                "actividad",
                "nombre",
            ]),
            due_aliases: strings(&[
                "due date helper",
                "due date",
                "fecha fin",
                "fin",
                "termino",
                "término",
                "fecha término",
                "fecha termino",
            ]),
            task_candidates: strings(&["Task Helper", "TASK", "Task", "Tarea", "Actividad", "Nombre"]),
            due_candidates: strings(&[
                "Due Date Helper",
                "Due Date",
                "Fecha fin",
                "Fin",
                "Termino",
                "Término",
            ]),
            sample_fragments,
            max_scan_rows: 60,
            max_scan_columns: 60,
            fallback_header_row: 4,
            sample_sheet: "Gantt_Helper".to_string(),
            sample_header_columns: 25,
            sample_row_limit: 2000,
            sample_size: 10,
            purpose_header_columns: 30,
            purpose_header_sample: 10,
            cell_preview: CellPreviewConfig::default(),
            import: ImportConfig::default(),
        }
    }
}

impl HeuristicConfig {
    /// Load overrides from a YAML file; omitted keys keep their defaults
    pub fn from_yaml_file(path: &Path) -> ProbeResult<Self> {
        if !path.exists() {
            return Err(ProbeError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        debug!(path = %path.display(), "loaded heuristic config");
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> ProbeResult<Self> {
        let mut config: HeuristicConfig = serde_yaml::from_str(content)?;
        // A partial fragment map only overrides the roles it names
        for (role, fragment) in HeuristicConfig::default().sample_fragments {
            config.sample_fragments.entry(role).or_insert(fragment);
        }
        config.validate()?;
        Ok(config)
    }

    /// Load from an optional path, falling back to the built-in defaults
    pub fn load(path: Option<&Path>) -> ProbeResult<Self> {
        match path {
            Some(p) => Self::from_yaml_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ProbeResult<()> {
        if self.task_aliases.is_empty() || self.task_candidates.is_empty() {
            return Err(ProbeError::Config(
                "task_aliases and task_candidates must not be empty".to_string(),
            ));
        }
        if self.max_scan_rows == 0 || self.max_scan_columns == 0 {
            return Err(ProbeError::Config(
                "max_scan_rows and max_scan_columns must be at least 1".to_string(),
            ));
        }
        if self.sample_size == 0 {
            return Err(ProbeError::Config("sample_size must be at least 1".to_string()));
        }
        if self.cell_preview.max_chars < 4 {
            return Err(ProbeError::Config(format!(
                "cell_preview.max_chars must be at least 4 (got {})",
                self.cell_preview.max_chars
            )));
        }
        Ok(())
    }

    pub fn sample_fragment(&self, role: ColumnRole) -> Option<&str> {
        self.sample_fragments.get(&role).map(String::as_str)
    }
}
