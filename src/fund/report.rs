//! The simulation report.

use serde::{Deserialize, Serialize};

pub const REMAINING_UNITS: &str = "saldo_cuotapartes";
pub const VALUED_BALANCE: &str = "saldo_valorizado";
pub const TAX_VALUATION_TOTAL: &str = "total_valuacion_impositiva";
pub const ACCOUNTING_VALUATION_TOTAL: &str = "total_valuacion_contable";
pub const ARGENTINE_SOURCE_INCOME_TOTAL: &str = "total_rentas_fuente_arg";

/// Metric names in report order.
pub const METRIC_NAMES: [&str; 5] = [
    REMAINING_UNITS,
    VALUED_BALANCE,
    TAX_VALUATION_TOTAL,
    ACCOUNTING_VALUATION_TOTAL,
    ARGENTINE_SOURCE_INCOME_TOTAL,
];

/// Balances and totals produced by one simulation run.
///
/// Serializes as a flat object with exactly the five metric names above.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "saldo_cuotapartes")]
    pub remaining_units: f64,
    #[serde(rename = "saldo_valorizado")]
    pub valued_balance: f64,
    #[serde(rename = "total_valuacion_impositiva")]
    pub tax_valuation_total: f64,
    #[serde(rename = "total_valuacion_contable")]
    pub accounting_valuation_total: f64,
    #[serde(rename = "total_rentas_fuente_arg")]
    pub argentine_source_income_total: f64,
}

impl Report {
    /// Look up a metric by its serialized name.
    pub fn get(&self, metric: &str) -> Option<f64> {
        match metric {
            REMAINING_UNITS => Some(self.remaining_units),
            VALUED_BALANCE => Some(self.valued_balance),
            TAX_VALUATION_TOTAL => Some(self.tax_valuation_total),
            ACCOUNTING_VALUATION_TOTAL => Some(self.accounting_valuation_total),
            ARGENTINE_SOURCE_INCOME_TOTAL => Some(self.argentine_source_income_total),
            _ => None,
        }
    }

    /// `(metric name, value)` pairs in report order.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            (REMAINING_UNITS, self.remaining_units),
            (VALUED_BALANCE, self.valued_balance),
            (TAX_VALUATION_TOTAL, self.tax_valuation_total),
            (ACCOUNTING_VALUATION_TOTAL, self.accounting_valuation_total),
            (ARGENTINE_SOURCE_INCOME_TOTAL, self.argentine_source_income_total),
        ]
    }
}
