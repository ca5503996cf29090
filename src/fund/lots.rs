//! FIFO lot matching over ledger movements.

use serde::Serialize;
use std::collections::VecDeque;

use super::movement::{Movement, MovementKind};

/// Quantities at or below this are treated as zero.
pub const UNIT_EPSILON: f64 = 1e-9;

/// An open subscription tranche.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lot {
    pub units: f64,
    pub unit_value: f64,
}

/// Result of folding a movement sequence through [`LotMatcher`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FifoOutcome {
    /// Units left across all open lots.
    pub balance_units: f64,
    /// `balance_units` valued at the last known unit price.
    pub balance_value: f64,
    pub last_unit_value: f64,
    /// Units requested by redemptions beyond what the open lots held.
    /// Informational only; it never alters the balances.
    pub unmatched_units: f64,
    /// Open lots, oldest first.
    pub open_lots: Vec<Lot>,
}

/// FIFO simulation state: open lots (front is oldest) and the last unit
/// price seen.
#[derive(Debug, Clone, Default)]
pub struct LotMatcher {
    lots: VecDeque<Lot>,
    last_unit_value: f64,
    unmatched_units: f64,
}

impl LotMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one movement.
    pub fn apply(&mut self, movement: &Movement) {
        if let Some(value) = movement.unit_value {
            self.last_unit_value = value;
        }

        match movement.kind() {
            MovementKind::Subscription => self.lots.push_back(Lot {
                units: movement.units,
                unit_value: movement.unit_value.unwrap_or(self.last_unit_value),
            }),
            MovementKind::Redemption => {
                let shortfall = self.redeem(movement.units.abs());
                if shortfall > UNIT_EPSILON {
                    self.unmatched_units += shortfall;
                    tracing::warn!(
                        date = %movement.date,
                        concept = %movement.concept,
                        requested = movement.units.abs(),
                        shortfall,
                        "redemption exceeds open lots; truncated to available units"
                    );
                }
            }
            MovementKind::Other => {}
        }
    }

    /// Consume `units` from the oldest lots. Returns what could not be matched.
    fn redeem(&mut self, units: f64) -> f64 {
        let mut remaining = units;
        while remaining > UNIT_EPSILON {
            let Some(lot) = self.lots.front_mut() else {
                break;
            };
            let taken = lot.units.min(remaining);
            lot.units -= taken;
            remaining -= taken;
            if lot.units <= UNIT_EPSILON {
                self.lots.pop_front();
            }
        }
        remaining
    }

    /// Open lots, oldest first.
    pub fn open_lots(&self) -> impl Iterator<Item = &Lot> {
        self.lots.iter()
    }

    pub fn balance_units(&self) -> f64 {
        self.lots.iter().fold(0.0, |total, lot| total + lot.units)
    }

    pub fn finish(self) -> FifoOutcome {
        let balance_units = self.balance_units();
        FifoOutcome {
            balance_units,
            balance_value: balance_units * self.last_unit_value,
            last_unit_value: self.last_unit_value,
            unmatched_units: self.unmatched_units,
            open_lots: self.lots.into_iter().collect(),
        }
    }
}

/// Run the FIFO fold over movements in the order given.
pub fn match_lots<'a, I>(movements: I) -> FifoOutcome
where
    I: IntoIterator<Item = &'a Movement>,
{
    let mut matcher = LotMatcher::new();
    for movement in movements {
        matcher.apply(movement);
    }
    matcher.finish()
}
