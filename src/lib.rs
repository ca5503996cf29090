//! # fcisim
//!
//! Position estimation for mutual-fund (FCI) movement ledgers exported as
//! XLSX.
//!
//! The library reads unit movements (subscriptions and redemptions) from a
//! ledger sheet, rebuilds the open lots with first-in-first-out matching and
//! sums the valuation and withholding tables of the same workbook into a
//! five-metric [`Report`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use fcisim::render::{to_json, JsonFormat};
//!
//! let report = fcisim::simulate_file("FCI Abril 2025.xlsx")?;
//! println!("Saldo de cuotapartes: {:.2}", report.remaining_units);
//! println!("{}", to_json(&report, JsonFormat::Pretty)?);
//! # Ok::<(), fcisim::Error>(())
//! ```
//!
//! ## Choosing sheets
//!
//! ```no_run
//! use fcisim::{Simulator, SimulatorConfig, Workbook};
//!
//! let workbook = Workbook::open("FCI Abril 2025.xlsx")?;
//! let config = SimulatorConfig::default().with_ledger_sheet("SBSAhorroPesosClaseA");
//! let report = Simulator::new(&workbook, config).run()?;
//! # Ok::<(), fcisim::Error>(())
//! ```
//!
//! ## Features
//!
//! - `async`: [`simulate_file_async`], reading the input with Tokio

pub mod container;
pub mod detect;
pub mod error;
pub mod fund;
pub mod number;
pub mod render;
pub mod xlsx;

#[cfg(test)]
mod testing;

// Re-exports
pub use container::{Relationship, Relationships, WorkbookArchive};
pub use detect::{ensure_spreadsheet, ensure_spreadsheet_path, is_zip_file};
pub use error::{Error, Result};
pub use fund::{
    aggregate_table, extract_movements, match_lots, FifoOutcome, Lot, LotMatcher, Movement,
    MovementKind, Report, Simulator, SimulatorConfig, TableTotals,
};
pub use number::normalize_number;
pub use xlsx::{CellMatrix, Workbook};

use std::path::Path;

/// Run the simulation over an XLSX file with the default sheet names.
///
/// # Example
///
/// ```no_run
/// let report = fcisim::simulate_file("FCI Abril 2025.xlsx")?;
/// println!("{:.2}", report.valued_balance);
/// # Ok::<(), fcisim::Error>(())
/// ```
pub fn simulate_file(path: impl AsRef<Path>) -> Result<Report> {
    simulate_file_with_config(path, &SimulatorConfig::default())
}

/// Run the simulation over an XLSX file with explicit sheet names.
pub fn simulate_file_with_config(
    path: impl AsRef<Path>,
    config: &SimulatorConfig,
) -> Result<Report> {
    let workbook = Workbook::open(path)?;
    Simulator::new(&workbook, config.clone()).run()
}

/// Run the simulation over XLSX bytes, e.g. an uploaded file.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("FCI Abril 2025.xlsx")?;
/// let report = fcisim::simulate_bytes(&data)?;
/// # Ok::<(), fcisim::Error>(())
/// ```
pub fn simulate_bytes(data: &[u8]) -> Result<Report> {
    simulate_bytes_with_config(data, &SimulatorConfig::default())
}

/// Run the simulation over XLSX bytes with explicit sheet names.
pub fn simulate_bytes_with_config(data: &[u8], config: &SimulatorConfig) -> Result<Report> {
    let workbook = Workbook::from_bytes(data.to_vec())?;
    Simulator::new(&workbook, config.clone()).run()
}

/// Read the file with Tokio, then run the synchronous simulation.
#[cfg(feature = "async")]
pub async fn simulate_file_async(
    path: impl AsRef<Path>,
    config: &SimulatorConfig,
) -> Result<Report> {
    let path = path.as_ref();
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    let workbook = Workbook::from_bytes(data)?;
    Simulator::new(&workbook, config.clone()).run()
}
