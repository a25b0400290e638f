use crate::config::HeuristicConfig;
use crate::detect::{CountSummary, SampleReport};
use crate::error::ProbeResult;
use crate::excel::WorkbookLoader;
use crate::report::{inspect_workbook, sheet_states, InspectionReport, SheetState};
use crate::tasks::import_tasks;
use crate::types::{CellValue, ColumnRole, Visibility};
use clap::ValueEnum;
use colored::Colorize;
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Output format for the inspection report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Output format for imported tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TaskFormat {
    #[default]
    Json,
    Yaml,
}

fn load_config(config: Option<&Path>, sample_sheet: Option<String>) -> ProbeResult<HeuristicConfig> {
    let mut config = HeuristicConfig::load(config)?;
    if let Some(sheet) = sample_sheet {
        config.sample_sheet = sheet;
    }
    Ok(config)
}

/// Execute the inspect command
pub fn inspect(
    file: PathBuf,
    config: Option<PathBuf>,
    sample_sheet: Option<String>,
    format: ReportFormat,
) -> ProbeResult<()> {
    let config = load_config(config.as_deref(), sample_sheet)?;
    let workbook = WorkbookLoader::new(&file).load()?;
    let report = inspect_workbook(&workbook, &config);

    match format {
        ReportFormat::Text => print!("{}", render_report(&report, &config)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Execute the sheets command - sheet names and visibility only
pub fn sheets(file: PathBuf) -> ProbeResult<()> {
    let workbook = WorkbookLoader::new(&file).load()?;
    print!("{}", render_sheets(&sheet_states(&workbook)));
    Ok(())
}

/// Execute the tasks command - import the Gantt helper sheet
pub fn tasks(
    file: PathBuf,
    config: Option<PathBuf>,
    sheet: Option<String>,
    format: TaskFormat,
) -> ProbeResult<()> {
    let mut config = HeuristicConfig::load(config.as_deref())?;
    if let Some(sheet) = sheet {
        config.import.sheet = sheet;
    }

    let workbook = WorkbookLoader::new(&file).load()?;
    let tasks = import_tasks(&workbook, &config.import)?;
    debug!(count = tasks.len(), "serializing tasks");

    match format {
        TaskFormat::Json => println!("{}", serde_json::to_string_pretty(&tasks)?),
        TaskFormat::Yaml => print!("{}", serde_yaml::to_string(&tasks)?),
    }
    Ok(())
}

//==============================================================================
// Text rendering
//==============================================================================

/// Render the full report as terminal text
pub fn render_report(report: &InspectionReport, config: &HeuristicConfig) -> String {
    let mut out = String::new();
    // fmt::Write for String never fails
    let _ = write_report(&mut out, report, config);
    out
}

/// Render only the sheet listing
pub fn render_sheets(states: &[SheetState]) -> String {
    let mut out = String::new();
    let _ = write_sheet_states(&mut out, states);
    out
}

fn write_report(out: &mut String, report: &InspectionReport, config: &HeuristicConfig) -> fmt::Result {
    writeln!(out, "{}", "🔎 Gantt Probe - Workbook Inspection".bold().green())?;
    writeln!(out, "   File: {}\n", report.path.display())?;

    write_sheet_states(out, &report.sheets)?;

    if let Some(sample) = &report.sample {
        write_sample(out, sample, config)?;
    }

    writeln!(out, "\n{}", "📋 Sheet purpose summary (best-effort)".bold().cyan())?;
    for summary in &report.summaries {
        writeln!(
            out,
            "\n   - {} ({})",
            summary.name.bright_blue().bold(),
            summary.state
        )?;
        writeln!(out, "     Purpose: {}", summary.description)?;
        if !summary.headers.is_empty() {
            let shown: Vec<&String> = summary
                .headers
                .iter()
                .take(config.purpose_header_sample)
                .collect();
            writeln!(out, "     Headers sample: {:?}", shown)?;
        }
        if !summary.first_cells.is_empty() {
            writeln!(out, "     First non-empty cells:")?;
            for cell in &summary.first_cells {
                writeln!(out, "       R{}C{}: {}", cell.row, cell.column, cell.value)?;
            }
        }
    }

    writeln!(out, "\n{}", "📊 Task counts per sheet (best-effort)".bold().cyan())?;
    for sheet in &report.counts {
        writeln!(
            out,
            "   - {} ({}): {}",
            sheet.name.bright_blue(),
            sheet.state,
            describe_counts(sheet.counts.as_ref())
        )?;
    }

    writeln!(
        out,
        "\n{}",
        "TOTAL (summed per sheet, may include duplicates):".bold()
    )?;
    writeln!(
        out,
        "   - Rows with task name: {}",
        report.totals.rows_with_name.to_string().bold().green()
    )?;
    writeln!(
        out,
        "   - Rows with task name + due date: {}",
        report.totals.rows_with_name_and_due.to_string().bold().green()
    )
}

fn write_sheet_states(out: &mut String, states: &[SheetState]) -> fmt::Result {
    writeln!(out, "{}", "📑 Sheets (name → state):".bold().cyan())?;
    for s in states {
        let state = match s.state {
            Visibility::Visible => s.state.to_string().green(),
            _ => s.state.to_string().yellow(),
        };
        writeln!(out, "   - {}: {}", s.name, state)?;
    }

    let visible: Vec<&str> = states
        .iter()
        .filter(|s| s.state == Visibility::Visible)
        .map(|s| s.name.as_str())
        .collect();
    let hidden: Vec<&str> = states
        .iter()
        .filter(|s| s.state != Visibility::Visible)
        .map(|s| s.name.as_str())
        .collect();
    writeln!(out, "\n   Visible sheets: {:?}", visible)?;
    writeln!(out, "   Hidden sheets: {:?}", hidden)
}

fn write_sample(out: &mut String, sample: &SampleReport, config: &HeuristicConfig) -> fmt::Result {
    writeln!(
        out,
        "\n{}",
        format!("🔑 === {} (key sheet) ===", sample.sheet).bold().cyan()
    )?;
    for header in &sample.headers {
        writeln!(out, "   C{:02}: {}", header.column, header.label)?;
    }

    writeln!(out, "\n   Detected columns:")?;
    for (role, col) in &sample.columns {
        let shown = col.map_or_else(|| "none".dimmed().to_string(), |c| c.to_string());
        writeln!(out, "   - {}: {}", role, shown)?;
    }

    let Some(task_rows) = sample.task_rows else {
        return writeln!(
            out,
            "\n   {}",
            "⚠️  No task column detected; cannot sample records.".yellow()
        );
    };

    writeln!(
        out,
        "\n   Task-like rows found (up to {}): {}",
        config.sample_row_limit,
        task_rows.to_string().bold()
    )?;
    writeln!(out, "   Sample records (first {}):", config.sample_size)?;
    for record in &sample.records {
        let fields: Vec<String> = ColumnRole::ALL
            .iter()
            .map(|&role| format!("{}: {}", role, display_value(record.get(role))))
            .collect();
        writeln!(out, "   {{row: {}, {}}}", record.row, fields.join(", "))?;
    }
    Ok(())
}

/// Quoted text, bare numbers/dates/booleans, `-` for nothing
fn display_value(value: Option<&CellValue>) -> String {
    match value {
        None | Some(CellValue::Empty) => "-".to_string(),
        Some(CellValue::Text(s)) => format!("{:?}", s),
        Some(other) => other.to_string(),
    }
}

/// One-line description of a sheet's counts
pub fn describe_counts(counts: Option<&CountSummary>) -> String {
    let Some(c) = counts else {
        return "no detectable task table".to_string();
    };
    match (c.due_col, c.rows_with_name_and_due) {
        (Some(due_col), Some(with_due)) => format!(
            "{} rows with name | {} with name + due date (header R{}, task C{}, due C{})",
            c.rows_with_name, with_due, c.header_row, c.task_col, due_col
        ),
        _ => format!(
            "{} rows with name (header R{}, task C{})",
            c.rows_with_name, c.header_row, c.task_col
        ),
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
