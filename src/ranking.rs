//! Fist-hold records and the session ranking of the longest holds.

use crate::constants::{
    CHARGE_SECONDS_PER_STRENGTH, MAX_PULSE_STRENGTH, MIN_PULSE_STRENGTH, RANKING_CAPACITY,
};
use std::fmt;

/// Named tier of a pulse, derived from its strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChargeLevel {
    Spark,
    RisingStar,
    SolarFlare,
    Nova,
    Supernova,
}

impl ChargeLevel {
    /// Thresholds are checked from the top tier down
    #[must_use]
    pub fn from_strength(strength: f64) -> Self {
        if strength >= 2.8 {
            Self::Supernova
        } else if strength >= 2.2 {
            Self::Nova
        } else if strength >= 1.5 {
            Self::SolarFlare
        } else if strength >= 1.0 {
            Self::RisingStar
        } else {
            Self::Spark
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Spark => "Spark",
            Self::RisingStar => "Rising Star",
            Self::SolarFlare => "Solar Flare",
            Self::Nova => "Nova",
            Self::Supernova => "Supernova",
        }
    }
}

impl fmt::Display for ChargeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How hold duration maps to pulse strength
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthCurve {
    pub seconds_per_strength: f64,
    pub min_strength: f64,
    pub max_strength: f64,
}

impl Default for StrengthCurve {
    fn default() -> Self {
        Self {
            seconds_per_strength: CHARGE_SECONDS_PER_STRENGTH,
            min_strength: MIN_PULSE_STRENGTH,
            max_strength: MAX_PULSE_STRENGTH,
        }
    }
}

impl StrengthCurve {
    /// `clamp(seconds / seconds_per_strength, min, max)`
    #[must_use]
    pub fn strength(&self, seconds: f64) -> f64 {
        (seconds / self.seconds_per_strength).clamp(self.min_strength, self.max_strength)
    }
}

/// One completed fist hold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldRecord {
    /// Hold duration in seconds
    pub duration: f64,
    pub strength: f64,
    pub level: ChargeLevel,
    /// Release time in milliseconds
    pub timestamp: u64,
}

/// Top holds of the session, longest first, never more than five
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingBuffer {
    records: Vec<HoldRecord>,
}

impl RankingBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::with_capacity(RANKING_CAPACITY + 1),
        }
    }

    /// Insert keeping duration descending order, truncate to capacity
    ///
    /// Returns the 0-based rank of the new record, or `None` if it fell off.
    pub fn insert(&mut self, record: HoldRecord) -> Option<usize> {
        // Equal durations rank after the holds already recorded
        let rank = self
            .records
            .partition_point(|r| r.duration.total_cmp(&record.duration).is_ge());
        if rank >= RANKING_CAPACITY {
            return None;
        }
        self.records.insert(rank, record);
        self.records.truncate(RANKING_CAPACITY);
        Some(rank)
    }

    #[must_use]
    pub fn records(&self) -> &[HoldRecord] {
        &self.records
    }

    #[must_use]
    pub fn best(&self) -> Option<&HoldRecord> {
        self.records.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn reset(&mut self) {
        self.records.clear();
    }
}
