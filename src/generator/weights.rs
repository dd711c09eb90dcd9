//! Weighted event-kind selection.
//!
//! [`EventWeights`] is an immutable table of `(kind, weight)` pairs backed
//! by a [`WeightedIndex`]. Weights are relative; they do not need to sum
//! to one.

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::domain::EventKind;
use crate::error::TelemetryError;

/// Named weight tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum WeightProfile {
    /// Position-heavy mix whose tail kind is `LogVehicleRide`.
    #[default]
    Standard,
    /// Same mix with `LogPlayerAttack` in place of `LogVehicleRide`.
    Combat,
}

impl WeightProfile {
    /// Returns the weight table for this profile.
    ///
    /// # Errors
    ///
    /// Propagates [`EventWeights::new`] validation errors.
    pub fn weights(&self) -> Result<EventWeights, TelemetryError> {
        match self {
            Self::Standard => EventWeights::standard(),
            Self::Combat => EventWeights::combat(),
        }
    }
}

/// Immutable weighted table of event kinds.
#[derive(Debug, Clone)]
pub struct EventWeights {
    entries: Vec<(EventKind, f64)>,
    index: WeightedIndex<f64>,
}

impl PartialEq for EventWeights {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

const SHARED: [(EventKind, f64); 7] = [
    (EventKind::LogPlayerPosition, 0.30),
    (EventKind::LogItemPickup, 0.20),
    (EventKind::LogPlayerTakeDamage, 0.15),
    (EventKind::LogPlayerKillV2, 0.05),
    (EventKind::LogItemDrop, 0.10),
    (EventKind::LogItemEquip, 0.10),
    (EventKind::LogHeal, 0.05),
];

impl EventWeights {
    /// Builds a table from `(kind, weight)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::InvalidWeights`] if the table is empty,
    /// lists a kind twice, contains a negative or non-finite weight, or
    /// sums to zero. `LogMatchStart` is rejected as well: it is emitted
    /// once per match, never drawn.
    pub fn new(entries: Vec<(EventKind, f64)>) -> Result<Self, TelemetryError> {
        if entries.is_empty() {
            return Err(TelemetryError::InvalidWeights("table is empty".to_string()));
        }
        for (i, (kind, weight)) in entries.iter().enumerate() {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(TelemetryError::InvalidWeights(format!(
                    "{} has weight {weight}",
                    kind.as_str()
                )));
            }
            if *kind == EventKind::LogMatchStart {
                return Err(TelemetryError::InvalidWeights(
                    "LogMatchStart cannot be drawn".to_string(),
                ));
            }
            if entries.iter().skip(i + 1).any(|(other, _)| other == kind) {
                return Err(TelemetryError::InvalidWeights(format!(
                    "{} listed twice",
                    kind.as_str()
                )));
            }
        }
        let index = WeightedIndex::new(entries.iter().map(|(_, w)| *w))
            .map_err(|e| TelemetryError::InvalidWeights(e.to_string()))?;
        Ok(Self { entries, index })
    }

    /// Canonical table: position 0.30, pickup 0.20, take-damage 0.15,
    /// kill 0.05, drop 0.10, equip 0.10, heal 0.05, vehicle-ride 0.05.
    ///
    /// # Errors
    ///
    /// Same as [`EventWeights::new`]; the built-in table passes.
    pub fn standard() -> Result<Self, TelemetryError> {
        Self::with_tail(EventKind::LogVehicleRide)
    }

    /// Canonical table with `LogPlayerAttack` as the 0.05 tail.
    ///
    /// # Errors
    ///
    /// Same as [`EventWeights::new`]; the built-in table passes.
    pub fn combat() -> Result<Self, TelemetryError> {
        Self::with_tail(EventKind::LogPlayerAttack)
    }

    fn with_tail(tail: EventKind) -> Result<Self, TelemetryError> {
        Self::new(SHARED.iter().copied().chain([(tail, 0.05)]).collect())
    }

    /// The `(kind, weight)` pairs in table order.
    #[must_use]
    pub fn entries(&self) -> &[(EventKind, f64)] {
        &self.entries
    }

    /// Probability of drawing `kind`, or `0.0` if it is not in the table.
    #[must_use]
    pub fn probability(&self, kind: EventKind) -> f64 {
        let total: f64 = self.entries.iter().map(|(_, w)| w).sum();
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0.0, |(_, w)| w / total)
    }

    /// Draws one kind according to the weights.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> EventKind {
        let i = self.index.sample(rng);
        self.entries
            .get(i)
            .map_or(EventKind::LogPlayerPosition, |(kind, _)| *kind)
    }
}
