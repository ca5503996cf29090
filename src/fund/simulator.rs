//! Orchestration of one simulation run.

use crate::error::Result;
use crate::xlsx::Workbook;
use serde::{Deserialize, Serialize};

use super::lots::{match_lots, FifoOutcome};
use super::movement::{extract_movements, Movement};
use super::report::Report;
use super::table::{aggregate_table, TableTotals};

/// Unit-class ledger sheet read by default.
pub const DEFAULT_LEDGER_SHEET: &str = "SBSAhorroPesosClaseD";
/// Tax/accounting valuation table read by default.
pub const DEFAULT_VALUATION_SHEET: &str = "FCI Ganancias";
/// IIBB withholding table read by default.
pub const DEFAULT_WITHHOLDING_SHEET: &str = "Rescates IIBB";

/// Valuation-table column summed into the tax valuation total.
pub const TAX_VALUATION_COLUMN: &str = "Valuación Impositiva";
/// Valuation-table column summed into the accounting valuation total.
pub const ACCOUNTING_VALUATION_COLUMN: &str = "Valuación Contable";
/// Withholding-table column summed into the Argentine-source income total.
pub const SOURCE_INCOME_COLUMN: &str = "Rdo Imp X VTA";

/// Which sheets a run reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub ledger_sheet: String,
    pub valuation_sheet: String,
    pub withholding_sheet: String,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            ledger_sheet: DEFAULT_LEDGER_SHEET.to_string(),
            valuation_sheet: DEFAULT_VALUATION_SHEET.to_string(),
            withholding_sheet: DEFAULT_WITHHOLDING_SHEET.to_string(),
        }
    }
}

impl SimulatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger_sheet(mut self, name: impl Into<String>) -> Self {
        self.ledger_sheet = name.into();
        self
    }

    pub fn with_valuation_sheet(mut self, name: impl Into<String>) -> Self {
        self.valuation_sheet = name.into();
        self
    }

    pub fn with_withholding_sheet(mut self, name: impl Into<String>) -> Self {
        self.withholding_sheet = name.into();
        self
    }
}

/// Runs the FIFO simulation and table aggregation over one workbook.
///
/// Every call to [`Simulator::run`] recomputes the report from scratch.
///
/// # Example
///
/// ```no_run
/// use fcisim::{Simulator, SimulatorConfig, Workbook};
///
/// let workbook = Workbook::open("FCI Abril 2025.xlsx")?;
/// let report = Simulator::new(&workbook, SimulatorConfig::default()).run()?;
/// println!("{:.2}", report.valued_balance);
/// # Ok::<(), fcisim::Error>(())
/// ```
#[derive(Debug)]
pub struct Simulator<'a> {
    workbook: &'a Workbook,
    config: SimulatorConfig,
}

impl<'a> Simulator<'a> {
    pub fn new(workbook: &'a Workbook, config: SimulatorConfig) -> Self {
        Self { workbook, config }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Build the full report. Any missing sheet aborts the run.
    pub fn run(&self) -> Result<Report> {
        let fifo = self.fifo()?;
        let valuation = self.sum_table(&self.config.valuation_sheet)?;
        let withholding = self.sum_table(&self.config.withholding_sheet)?;

        Ok(Report {
            remaining_units: fifo.balance_units,
            valued_balance: fifo.balance_value,
            tax_valuation_total: valuation.get(TAX_VALUATION_COLUMN),
            accounting_valuation_total: valuation.get(ACCOUNTING_VALUATION_COLUMN),
            argentine_source_income_total: withholding.get(SOURCE_INCOME_COLUMN),
        })
    }

    /// Movements of the ledger sheet, in sheet order.
    pub fn movements(&self) -> Result<Vec<Movement>> {
        let rows = self.workbook.read_sheet(&self.config.ledger_sheet)?;
        Ok(extract_movements(&rows))
    }

    /// FIFO outcome of the ledger sheet, including the open lots.
    pub fn fifo(&self) -> Result<FifoOutcome> {
        let movements = self.movements()?;
        Ok(match_lots(&movements))
    }

    /// Column totals of a report table.
    pub fn sum_table(&self, sheet: &str) -> Result<TableTotals> {
        let rows = self.workbook.read_sheet(sheet)?;
        Ok(aggregate_table(&rows))
    }
}
