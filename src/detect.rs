//! Input validation for collaborators that accept arbitrary uploads.
//!
//! The simulation core never calls this; front ends use it to reject
//! non-spreadsheet input before opening a [`Workbook`](crate::xlsx::Workbook).

use crate::container::decode_xml_bytes;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Content type for the XLSX workbook part.
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";

/// Macro-enabled workbooks share the same part layout.
const XLSM_CONTENT_TYPE: &str = "application/vnd.ms-excel.sheet.macroEnabled.main+xml";

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

/// Verify that `data` is a ZIP archive holding a spreadsheet workbook.
///
/// # Example
///
/// ```no_run
/// use fcisim::detect::ensure_spreadsheet;
///
/// let data = std::fs::read("upload.bin")?;
/// ensure_spreadsheet(&data)?;
/// # Ok::<(), fcisim::Error>(())
/// ```
pub fn ensure_spreadsheet(data: &[u8]) -> Result<()> {
    if !is_zip_file(data) {
        return Err(Error::UnknownFormat);
    }
    ensure_spreadsheet_reader(std::io::Cursor::new(data))
}

/// Verify that the file at `path` is a spreadsheet workbook.
pub fn ensure_spreadsheet_path(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let mut reader = BufReader::new(File::open(path)?);
    let mut magic = [0u8; 4];
    if reader.read_exact(&mut magic).is_err() || !is_zip_file(&magic) {
        return Err(Error::UnknownFormat);
    }
    reader.rewind()?;
    ensure_spreadsheet_reader(reader)
}

fn ensure_spreadsheet_reader<R: Read + Seek>(reader: R) -> Result<()> {
    let mut archive = zip::ZipArchive::new(reader)?;

    let content_types = match archive.by_name("[Content_Types].xml") {
        Ok(mut file) => {
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            Some(decode_xml_bytes(&bytes)?)
        }
        Err(_) => None,
    };

    let declared = content_types
        .as_deref()
        .is_some_and(|ct| ct.contains(XLSX_CONTENT_TYPE) || ct.contains(XLSM_CONTENT_TYPE));

    // Fallback: some writers omit the override but keep the folder layout
    if declared || archive.file_names().any(|n| n == "xl/workbook.xml") {
        Ok(())
    } else {
        Err(Error::UnknownFormat)
    }
}
