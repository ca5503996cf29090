//! Minimal XLSX reader.
//!
//! Only what the fund simulation needs: the shared-string table, the sheet
//! directory and the decoding of a worksheet into a matrix of text cells.
//! Formulas, styles, merged cells and number formats are not interpreted.
//!
//! # Example
//!
//! ```no_run
//! use fcisim::xlsx::Workbook;
//!
//! let workbook = Workbook::open("FCI Abril 2025.xlsx")?;
//! let rows = workbook.read_sheet("SBSAhorroPesosClaseD")?;
//! println!("{} rows", rows.len());
//! # Ok::<(), fcisim::Error>(())
//! ```

mod cell_ref;
mod shared_strings;
mod sheet;
mod workbook;

pub use cell_ref::{column_index, column_letters, MAX_COLUMN_INDEX};
pub use shared_strings::SharedStrings;
pub use sheet::{decode_sheet, read_matrix, CellKind, CellMatrix, RawCell, SheetRow};
pub use workbook::{SheetDirectory, SheetEntry, Workbook};
