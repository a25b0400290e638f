use std::path::PathBuf;
use thiserror::Error;

pub type ProbeResult<T> = Result<T, ProbeError>;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workbook not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    #[error("Sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Import error: {0}")]
    Import(String),
}

