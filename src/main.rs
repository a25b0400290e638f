use clap::{Parser, Subcommand};
use royalbit_gantt_probe::cli::{self, ReportFormat, TaskFormat};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gantt-probe")]
#[command(about = "Inspect Gantt-template workbooks: sheets, task tables and helper columns.")]
#[command(long_about = "Gantt Probe - heuristic workbook inspection
No layout assumptions | Spanish and English headers | Read-only

COMMANDS:
  inspect - Full report: sheets, key sheet sample, purposes, task counts
  sheets  - Sheet names and visibility only
  tasks   - Import the Gantt helper sheet as structured tasks

EXAMPLES:
  gantt-probe inspect plan.xlsm                    # Coloured report
  gantt-probe inspect plan.xlsm --format json      # Machine-readable
  gantt-probe inspect plan.xlsm -c aliases.yaml    # Custom header aliases
  gantt-probe tasks plan.xlsm --format yaml

LOGGING:
  Diagnostics go to stderr. Use -v for debug output or set RUST_LOG.")]
#[command(version)]
struct Cli {
    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Inspect a workbook and print a best-effort report.

SECTIONS:
  1. Sheets with their visibility state
  2. The key sheet (Gantt_Helper by default): headers, detected columns,
     task-like row count and the first sample records
  3. Purpose guess per sheet, with header sample and first non-empty cells
  4. Task counts per sheet and the (possibly duplicated) totals

Header rows are found by scanning the top-left 60x60 window for a row that
holds both a task alias and a due-date alias. Row 4 is used as a fallback
when it holds a task alias only.

CONFIGURATION:
  --config points at a YAML file overriding any heuristic setting:

  task_aliases: [\"task\", \"tarea\", \"actividad\"]
  due_aliases: [\"due date\", \"fecha fin\"]
  sample_sheet: Gantt_Helper")]
    /// Inspect a workbook and print a best-effort report
    Inspect {
        /// Path to the workbook (.xlsx, .xlsm, .xls, .ods)
        file: PathBuf,

        /// YAML file with heuristic overrides
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Sheet to sample in detail instead of Gantt_Helper
        #[arg(short, long)]
        sample_sheet: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// List sheet names and their visibility
    Sheets {
        /// Path to the workbook
        file: PathBuf,
    },

    #[command(long_about = "Import the Gantt helper sheet as structured tasks.

Row 1 must hold the headers. Columns are matched exactly against the
configured candidates (e.g. 'Task Helper', 'Due Date Helper'). Rows without
a task name or a due date are skipped; a missing start date defaults to the
due date. Tasks sharing a phase are grouped under the first task of that
phase.

EXAMPLE:
  gantt-probe tasks plan.xlsm --format yaml > tasks.yaml")]
    /// Import the Gantt helper sheet as structured tasks
    Tasks {
        /// Path to the workbook
        file: PathBuf,

        /// Sheet to import instead of Gantt_Helper
        #[arg(short, long)]
        sheet: Option<String>,

        /// YAML file with heuristic overrides
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = TaskFormat::Json)]
        format: TaskFormat,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "royalbit_gantt_probe=debug"
    } else {
        "royalbit_gantt_probe=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Inspect {
            file,
            config,
            sample_sheet,
            format,
        } => cli::inspect(file, config, sample_sheet, format)?,

        Commands::Sheets { file } => cli::sheets(file)?,

        Commands::Tasks {
            file,
            sheet,
            config,
            format,
        } => cli::tasks(file, config, sheet, format)?,
    }
    Ok(())
}
