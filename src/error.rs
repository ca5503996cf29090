//! Error types for the fcisim library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fcisim operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a simulation run.
///
/// Only structural problems end up here. Cells that fail numeric
/// normalization, over-redemptions and skipped rows are absorbed into the
/// numeric result and never surface as an `Error`.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input path does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The input is not a ZIP-based spreadsheet.
    #[error("Unknown file format")]
    UnknownFormat,

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Invalid or malformed data in the workbook.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required workbook part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// A sheet was requested by name but the workbook does not declare it.
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Error while rendering a report.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlParse(err.to_string())
    }
}
