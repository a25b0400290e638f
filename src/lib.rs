//! Gantt Probe - heuristic inspection of Gantt-template workbooks
//!
//! This library opens an Excel workbook and reports, without any fixed layout
//! knowledge, what each sheet appears to contain.
//!
//! # Features
//!
//! - Sheet visibility (visible / hidden / very hidden)
//! - Header row detection by task and due-date aliases, with a row-4 fallback
//! - Column resolution by alias priority or by header fragment
//! - Task row counts per sheet, plus a sample of the helper sheet
//! - Best-effort sheet purpose guesses
//! - Import of the Gantt helper sheet into structured tasks
//!
//! # Example
//!
//! ```no_run
//! use royalbit_gantt_probe::config::HeuristicConfig;
//! use royalbit_gantt_probe::excel::WorkbookLoader;
//! use royalbit_gantt_probe::report::inspect_workbook;
//!
//! let workbook = WorkbookLoader::new("plan.xlsm").load()?;
//! let report = inspect_workbook(&workbook, &HeuristicConfig::default());
//!
//! println!("Hidden sheets: {:?}", report.hidden);
//! println!("Rows with task name: {}", report.totals.rows_with_name);
//! # Ok::<(), royalbit_gantt_probe::error::ProbeError>(())
//! ```

pub mod cli;
pub mod config;
pub mod dates;
pub mod detect;
pub mod error;
pub mod excel;
pub mod report;
pub mod tasks;
pub mod types;

// Re-export commonly used types
pub use config::HeuristicConfig;
pub use error::{ProbeError, ProbeResult};
pub use report::{inspect_workbook, InspectionReport};
pub use tasks::{import_tasks, GanttTask};
pub use types::{CellValue, ColumnRole, Sheet, Visibility, Workbook};
