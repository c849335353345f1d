//! Reshaping of long-format observations into hour-indexed, scenario-columned
//! tables, and alignment of all tables to their common hour index.

use crate::error::{DashboardError, Result};
use crate::models::{Observation, Quantity};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Hour-indexed, scenario-columned table for one physical quantity.
///
/// Rows are kept in a `BTreeMap`, so the hour index is always strictly
/// increasing. After `pivot` succeeds, every scenario column has a value at
/// every hour of the table.
#[derive(Debug, Clone)]
pub struct SeriesTable {
    quantity: Quantity,
    /// Column order: first appearance in the source.
    scenarios: Vec<String>,
    rows: BTreeMap<i64, HashMap<String, f64>>,
}

impl SeriesTable {
    /// Reshape long-format observations into a pivoted table.
    ///
    /// A repeated (hour, scenario) pair is rejected with `DuplicateKey`
    /// rather than silently keeping one of the values. A scenario missing a
    /// value at some hour of the table is rejected with `MissingValue`.
    pub fn pivot(quantity: Quantity, observations: &[Observation]) -> Result<Self> {
        let mut scenarios: Vec<String> = Vec::new();
        let mut rows: BTreeMap<i64, HashMap<String, f64>> = BTreeMap::new();

        for obs in observations {
            if !scenarios.iter().any(|s| s == &obs.scenario) {
                scenarios.push(obs.scenario.clone());
            }
            let row = rows.entry(obs.hour).or_default();
            if row.insert(obs.scenario.clone(), obs.value).is_some() {
                return Err(DashboardError::DuplicateKey {
                    quantity,
                    hour: obs.hour,
                    scenario: obs.scenario.clone(),
                });
            }
        }

        let table = Self {
            quantity,
            scenarios,
            rows,
        };
        table.check_complete()?;
        Ok(table)
    }

    // Ragged columns are a data-quality problem; surface them now instead of
    // filling silently.
    fn check_complete(&self) -> Result<()> {
        for (&hour, row) in &self.rows {
            for scenario in &self.scenarios {
                if !row.contains_key(scenario) {
                    return Err(DashboardError::MissingValue {
                        quantity: self.quantity,
                        hour,
                        scenario: scenario.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Hour index, strictly increasing.
    pub fn hours(&self) -> Vec<i64> {
        self.rows.keys().copied().collect()
    }

    pub fn scenarios(&self) -> &[String] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn value(&self, hour: i64, scenario: &str) -> Option<f64> {
        self.rows.get(&hour).and_then(|row| row.get(scenario)).copied()
    }

    /// One scenario's column over the table's hour index.
    pub fn series(&self, scenario: &str) -> Result<Vec<f64>> {
        if !self.scenarios.iter().any(|s| s == scenario) {
            return Err(DashboardError::UnknownScenario {
                quantity: self.quantity,
                scenario: scenario.to_string(),
            });
        }
        Ok(self.rows.values().map(|row| row[scenario]).collect())
    }

    /// Inverse of `pivot`: the long-format observations, ordered by hour and
    /// then by column order.
    pub fn to_observations(&self) -> Vec<Observation> {
        let mut observations = Vec::with_capacity(self.rows.len() * self.scenarios.len());
        for (&hour, row) in &self.rows {
            for scenario in &self.scenarios {
                if let Some(&value) = row.get(scenario) {
                    observations.push(Observation::new(hour, scenario.clone(), value));
                }
            }
        }
        observations
    }

    fn retain_hours(&mut self, keep: &BTreeSet<i64>) {
        self.rows.retain(|hour, _| keep.contains(hour));
    }
}

/// Restrict every table to the hours present in all of them.
///
/// After this returns, the hour indices of all tables are identical and
/// strictly increasing. The intersection is global: every table is narrowed,
/// not just the first one paired against the rest.
pub fn align_all(tables: &mut [SeriesTable]) -> Result<()> {
    let mut common: Option<BTreeSet<i64>> = None;
    for table in tables.iter() {
        let hours: BTreeSet<i64> = table.rows.keys().copied().collect();
        common = Some(match common {
            None => hours,
            Some(set) => set.intersection(&hours).copied().collect(),
        });
    }

    let Some(common) = common else {
        return Ok(());
    };
    if common.is_empty() {
        return Err(DashboardError::EmptyIntersection);
    }
    for table in tables.iter_mut() {
        table.retain_hours(&common);
    }
    Ok(())
}

/// The seven aligned tables plus the scenario catalog (PV columns).
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub pv: SeriesTable,
    pub wind: SeriesTable,
    pub demand: SeriesTable,
    pub h2_demand: SeriesTable,
    pub bess_discharge: SeriesTable,
    pub bess_charge: SeriesTable,
    pub soc: SeriesTable,
    scenarios: Vec<String>,
}

impl DashboardData {
    /// Align seven pivoted tables into the immutable dashboard bundle.
    pub fn align(
        pv: SeriesTable,
        wind: SeriesTable,
        demand: SeriesTable,
        h2_demand: SeriesTable,
        bess_discharge: SeriesTable,
        bess_charge: SeriesTable,
        soc: SeriesTable,
    ) -> Result<Self> {
        let mut tables = [pv, wind, demand, h2_demand, bess_discharge, bess_charge, soc];
        align_all(&mut tables)?;
        let [pv, wind, demand, h2_demand, bess_discharge, bess_charge, soc] = tables;
        let scenarios = pv.scenarios().to_vec();
        Ok(Self {
            pv,
            wind,
            demand,
            h2_demand,
            bess_discharge,
            bess_charge,
            soc,
            scenarios,
        })
    }

    /// Scenario catalog, in source column order.
    pub fn scenarios(&self) -> &[String] {
        &self.scenarios
    }

    /// Common hour index shared by all seven tables.
    pub fn hours(&self) -> Vec<i64> {
        self.pv.hours()
    }
}
