//! Workbook access
//!
//! The only place that talks to calamine. Everything downstream works on the
//! plain `Workbook`/`Sheet` grid from `crate::types`.

mod loader;

pub use loader::WorkbookLoader;
