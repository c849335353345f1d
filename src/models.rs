use serde::{Deserialize, Serialize};
use std::fmt;

/// Values below this threshold (same physical units as the series) are
/// treated as absent when a series is masked for conditional rendering.
pub const MASK_EPSILON: f64 = 1e-3;

/// The energy-mix breakdown renders at most this many scenarios.
pub const MAX_PIE_SCENARIOS: usize = 6;

/// The seven physical quantities produced by the plant simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    Pv,
    Wind,
    Demand,
    H2Demand,
    BessDischarge,
    BessCharge,
    Soc,
}

impl Quantity {
    pub const ALL: [Quantity; 7] = [
        Quantity::Pv,
        Quantity::Wind,
        Quantity::Demand,
        Quantity::H2Demand,
        Quantity::BessDischarge,
        Quantity::BessCharge,
        Quantity::Soc,
    ];

    /// Fixed result-file name for this quantity, as written by the simulation.
    pub fn file_name(&self) -> &'static str {
        match self {
            Quantity::Pv => "fPV.csv",
            Quantity::Wind => "fWT.csv",
            Quantity::Demand => "PD.csv",
            Quantity::H2Demand => "PEL_master.csv",
            Quantity::BessDischarge => "PBESSd_master.csv",
            Quantity::BessCharge => "PBESSc_master.csv",
            Quantity::Soc => "EBESS_master.csv",
        }
    }

    /// Short label used in chart legends.
    pub fn label(&self) -> &'static str {
        match self {
            Quantity::Pv => "PV",
            Quantity::Wind => "WT",
            Quantity::Demand => "PD",
            Quantity::H2Demand => "PEL",
            Quantity::BessDischarge => "Pdc",
            Quantity::BessCharge => "Pch",
            Quantity::Soc => "SOC",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Quantity::Pv => "PV output",
            Quantity::Wind => "wind output",
            Quantity::Demand => "base demand",
            Quantity::H2Demand => "electrolyzer demand",
            Quantity::BessDischarge => "BESS discharge",
            Quantity::BessCharge => "BESS charge",
            Quantity::Soc => "state of charge",
        })
    }
}

/// One long-format result row: a value for one (hour, scenario) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub hour: i64,
    pub scenario: String,
    pub value: f64,
}

impl Observation {
    pub fn new(hour: i64, scenario: impl Into<String>, value: f64) -> Self {
        Self {
            hour,
            scenario: scenario.into(),
            value,
        }
    }
}
