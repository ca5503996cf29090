//! Fund position estimation.
//!
//! Movements are extracted from the unit-class ledger, folded through a
//! FIFO lot matcher, and combined with the column totals of the valuation
//! and withholding tables into a [`Report`].

mod lots;
mod movement;
mod report;
mod simulator;
mod table;

pub use lots::{match_lots, FifoOutcome, Lot, LotMatcher, UNIT_EPSILON};
pub use movement::{extract_movements, Movement, MovementKind, MIN_LEDGER_COLUMNS};
pub use report::{
    Report, ACCOUNTING_VALUATION_TOTAL, ARGENTINE_SOURCE_INCOME_TOTAL, METRIC_NAMES,
    REMAINING_UNITS, TAX_VALUATION_TOTAL, VALUED_BALANCE,
};
pub use simulator::{
    Simulator, SimulatorConfig, ACCOUNTING_VALUATION_COLUMN, DEFAULT_LEDGER_SHEET,
    DEFAULT_VALUATION_SHEET, DEFAULT_WITHHOLDING_SHEET, SOURCE_INCOME_COLUMN,
    TAX_VALUATION_COLUMN,
};
pub use table::{aggregate_table, TableTotals};
