//! Movement records extracted from the unit-class ledger sheet.

use crate::number::normalize_number;
use crate::xlsx::CellMatrix;
use serde::{Deserialize, Serialize};

/// Minimum number of cells a ledger row needs (date, concept, units, price).
pub const MIN_LEDGER_COLUMNS: usize = 4;

/// One subscription, redemption or informational row of the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub date: String,
    pub concept: String,
    /// Units moved. Non-numeric cells count as zero.
    pub units: f64,
    /// Price per unit, `None` when the row states none.
    pub unit_value: Option<f64>,
    pub amount: Option<f64>,
}

/// What a movement does to the open lots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    Subscription,
    Redemption,
    /// Fees, distributions and any other row; never touches lots.
    Other,
}

impl Movement {
    /// Classify by concept prefix, ignoring case.
    pub fn kind(&self) -> MovementKind {
        let concept = self.concept.to_uppercase();
        if concept.starts_with("SUSCRIPCION") {
            MovementKind::Subscription
        } else if concept.starts_with("RESCATE") {
            MovementKind::Redemption
        } else {
            MovementKind::Other
        }
    }
}

enum HeaderState {
    Searching,
    Active,
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.is_empty())
}

/// Extract movements from the ledger sheet, preserving row order.
///
/// Blank rows are skipped. The first non-blank row with at least
/// [`MIN_LEDGER_COLUMNS`] cells is the header; every later row is a
/// candidate, dropped when it is too short or its concept starts with
/// "total".
pub fn extract_movements(rows: &CellMatrix) -> Vec<Movement> {
    let mut state = HeaderState::Searching;
    let mut movements = Vec::new();

    for row in rows.iter().filter(|row| !is_blank(row)) {
        match state {
            HeaderState::Searching => {
                if row.len() >= MIN_LEDGER_COLUMNS {
                    state = HeaderState::Active;
                }
            }
            HeaderState::Active => {
                if let Some(movement) = movement_from_row(row) {
                    movements.push(movement);
                }
            }
        }
    }

    tracing::debug!(movements = movements.len(), "ledger extracted");
    movements
}

fn movement_from_row(row: &[String]) -> Option<Movement> {
    let [date, concept, units, unit_value, rest @ ..] = row else {
        return None;
    };
    if concept.to_lowercase().starts_with("total") {
        return None;
    }

    Some(Movement {
        date: date.clone(),
        concept: concept.clone(),
        units: normalize_number(units).unwrap_or(0.0),
        unit_value: normalize_number(unit_value),
        amount: rest.first().and_then(|cell| normalize_number(cell)),
    })
}
