//! Column totals of auxiliary report tables.

use crate::number::normalize_number;
use crate::xlsx::CellMatrix;
use std::collections::BTreeMap;
use unicode_normalization::UnicodeNormalization;

/// Column header text mapped to the sum of its numeric cells.
///
/// Keys are stored NFC-normalized, and lookups normalize the same way, so a
/// header typed with combining accents still matches `"Valuación Contable"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableTotals {
    totals: BTreeMap<String, f64>,
}

impl TableTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` to the total of `column`, creating it at zero first.
    pub fn add(&mut self, column: &str, value: f64) {
        *self.totals.entry(nfc(column)).or_insert(0.0) += value;
    }

    /// Total of `column`, `0.0` when the column never had a numeric cell.
    pub fn get(&self, column: &str) -> f64 {
        self.totals.get(&nfc(column)).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.totals.contains_key(&nfc(column))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

fn nfc(text: &str) -> String {
    text.nfc().collect()
}

enum HeaderState<'a> {
    Searching,
    Active { header: &'a [String] },
}

/// Sum every numeric column of a report table.
///
/// The first row with at least two non-empty cells is the header; rows
/// above it are preamble. After that, only rows with exactly as many cells
/// as the header contribute. Non-numeric cells add nothing.
///
/// Headers are keyed in NFC form, so `"Valuacio\u{301}n"` and `"Valuación"`
/// share one total. A plain string-keyed lookup would miss the decomposed
/// spelling and read `0.0` for it.
pub fn aggregate_table(rows: &CellMatrix) -> TableTotals {
    let mut state = HeaderState::Searching;
    let mut totals = TableTotals::new();
    let mut skipped = 0usize;

    for row in rows.iter().filter(|row| !row.is_empty()) {
        match state {
            HeaderState::Searching => {
                if row.iter().filter(|cell| !cell.is_empty()).count() >= 2 {
                    state = HeaderState::Active { header: row };
                }
            }
            HeaderState::Active { header } if row.len() == header.len() => {
                for (column, cell) in header.iter().zip(row) {
                    if let Some(value) = normalize_number(cell) {
                        totals.add(column, value);
                    }
                }
            }
            HeaderState::Active { header } => {
                skipped += 1;
                tracing::debug!(
                    expected = header.len(),
                    found = row.len(),
                    "table row width differs from header; skipped"
                );
            }
        }
    }

    tracing::debug!(columns = totals.len(), skipped, "table aggregated");
    totals
}
