//! Per-selection derived series feeding the charts. Everything here is a pure
//! function of the aligned tables and the user's selection; no state is
//! retained between calls.

use crate::error::Result;
use crate::models::{MASK_EPSILON, MAX_PIE_SCENARIOS};
use crate::pivot::DashboardData;
use log::warn;
use serde::Serialize;

/// Mask values below `epsilon`. Masked entries become `None`; already-masked
/// entries stay `None`, so masking is idempotent.
pub fn mask(values: &[Option<f64>], epsilon: f64) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|&v| v.filter(|&x| x >= epsilon))
        .collect()
}

/// Mask a dense series, turning near-zero noise into absent entries.
pub fn mask_series(values: &[f64], epsilon: f64) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|&v| (v >= epsilon).then_some(v))
        .collect()
}

/// Everything the stacked power-balance chart needs for one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct PowerBalance {
    pub scenario: String,
    pub hours: Vec<i64>,
    pub pv: Vec<f64>,
    pub wind: Vec<f64>,
    pub bess_discharge: Vec<f64>,
    pub base_demand: Vec<f64>,
    pub h2_demand: Vec<f64>,
    pub bess_charge: Vec<f64>,
    /// Electrolyzer demand with near-zero hours masked out, for hatched bars.
    pub h2_demand_masked: Vec<Option<f64>>,
    /// Charging power with near-zero hours masked out, for hatched bars.
    pub bess_charge_masked: Vec<Option<f64>>,
}

impl PowerBalance {
    pub fn compute(data: &DashboardData, scenario: &str) -> Result<Self> {
        let h2_demand = data.h2_demand.series(scenario)?;
        let bess_charge = data.bess_charge.series(scenario)?;
        let h2_demand_masked = mask_series(&h2_demand, MASK_EPSILON);
        let bess_charge_masked = mask_series(&bess_charge, MASK_EPSILON);
        Ok(Self {
            scenario: scenario.to_string(),
            hours: data.hours(),
            pv: data.pv.series(scenario)?,
            wind: data.wind.series(scenario)?,
            bess_discharge: data.bess_discharge.series(scenario)?,
            base_demand: data.demand.series(scenario)?,
            h2_demand,
            bess_charge,
            h2_demand_masked,
            bess_charge_masked,
        })
    }

    /// Cumulative supply stack: pv, pv+wt, pv+wt+discharge.
    pub fn supply_levels(&self) -> [Vec<f64>; 3] {
        cumulative_levels(&self.pv, &self.wind, &self.bess_discharge)
    }

    /// Cumulative demand stack: base, base+electrolyzer, base+electrolyzer+charge.
    pub fn demand_levels(&self) -> [Vec<f64>; 3] {
        cumulative_levels(&self.base_demand, &self.h2_demand, &self.bess_charge)
    }

    /// Chart upper bound: 10% headroom over the taller of the two stacks.
    pub fn y_max(&self) -> f64 {
        let [_, _, supply_total] = self.supply_levels();
        let [_, _, demand_total] = self.demand_levels();
        let peak = supply_total
            .iter()
            .chain(demand_total.iter())
            .fold(0.0_f64, |acc, &v| acc.max(v));
        peak * 1.1
    }
}

fn cumulative_levels(first: &[f64], second: &[f64], third: &[f64]) -> [Vec<f64>; 3] {
    let level1 = first.to_vec();
    let level2: Vec<f64> = level1.iter().zip(second).map(|(a, b)| a + b).collect();
    let level3: Vec<f64> = level2.iter().zip(third).map(|(a, b)| a + b).collect();
    [level1, level2, level3]
}

/// Supply-side energy totals for one scenario's pie share.
#[derive(Debug, Clone, Serialize)]
pub struct EnergyMixSlice {
    pub scenario: String,
    pub pv_mwh: f64,
    pub wind_mwh: f64,
}

impl EnergyMixSlice {
    pub fn total_mwh(&self) -> f64 {
        self.pv_mwh + self.wind_mwh
    }

    pub fn pv_share(&self) -> f64 {
        let total = self.total_mwh();
        if total > 0.0 {
            self.pv_mwh / total
        } else {
            0.0
        }
    }

    pub fn wind_share(&self) -> f64 {
        let total = self.total_mwh();
        if total > 0.0 {
            self.wind_mwh / total
        } else {
            0.0
        }
    }
}

/// Energy-mix breakdown for a multi-scenario selection, clamped to
/// `MAX_PIE_SCENARIOS` entries.
#[derive(Debug, Clone, Serialize)]
pub struct EnergyMix {
    pub slices: Vec<EnergyMixSlice>,
}

impl EnergyMix {
    pub fn compute(data: &DashboardData, selected: &[String]) -> Result<Self> {
        let mut slices = Vec::new();
        for scenario in selected.iter().take(MAX_PIE_SCENARIOS) {
            slices.push(EnergyMixSlice {
                scenario: scenario.clone(),
                pv_mwh: data.pv.series(scenario)?.iter().sum(),
                wind_mwh: data.wind.series(scenario)?.iter().sum(),
            });
        }
        Ok(Self { slices })
    }
}

/// One scenario's SOC column over the aligned hours.
#[derive(Debug, Clone, Serialize)]
pub struct SocTrace {
    pub scenario: String,
    pub values: Vec<f64>,
}

/// SOC chart input for a multi-scenario selection.
#[derive(Debug, Clone, Serialize)]
pub struct SocTraces {
    pub hours: Vec<i64>,
    pub traces: Vec<SocTrace>,
}

impl SocTraces {
    /// Scenarios absent from the SOC table are skipped with a warning so one
    /// bad selection does not blank the whole chart.
    pub fn compute(data: &DashboardData, selected: &[String]) -> Self {
        let mut traces = Vec::new();
        for scenario in selected {
            match data.soc.series(scenario) {
                Ok(values) => traces.push(SocTrace {
                    scenario: scenario.clone(),
                    values,
                }),
                Err(err) => warn!("skipping SOC trace: {err}"),
            }
        }
        Self {
            hours: data.hours(),
            traces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Observation, Quantity};
    use crate::pivot::SeriesTable;

    fn table(quantity: Quantity, rows: &[(i64, &str, f64)]) -> SeriesTable {
        let observations: Vec<_> = rows
            .iter()
            .map(|&(hour, scenario, value)| Observation::new(hour, scenario, value))
            .collect();
        SeriesTable::pivot(quantity, &observations).unwrap()
    }

    fn sample_data() -> DashboardData {
        let rows = |values: [f64; 2]| {
            vec![
                (1, "A", values[0]),
                (2, "A", values[1]),
                (1, "B", values[0] * 2.0),
                (2, "B", values[1] * 2.0),
            ]
        };
        DashboardData::align(
            table(Quantity::Pv, &rows([10.0, 12.0])),
            table(Quantity::Wind, &rows([5.0, 4.0])),
            table(Quantity::Demand, &rows([8.0, 9.0])),
            table(Quantity::H2Demand, &rows([3.0, 0.0])),
            table(Quantity::BessDischarge, &rows([0.0, 1.0])),
            table(Quantity::BessCharge, &rows([2.0, 0.0005])),
            table(Quantity::Soc, &rows([0.5, 0.6])),
        )
        .unwrap()
    }

    #[test]
    fn test_mask_example() {
        let masked = mask_series(&[0.0, 0.0005, 0.002, 5.0], 1e-3);
        assert_eq!(masked, vec![None, None, Some(0.002), Some(5.0)]);
    }

    #[test]
    fn test_mask_idempotent() {
        let once = mask_series(&[0.0, 0.0005, 0.002, 5.0], 1e-3);
        let twice = mask(&once, 1e-3);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_supply_levels_are_cumulative() {
        let data = sample_data();
        let balance = PowerBalance::compute(&data, "A").unwrap();
        let [pv, pv_wt, total] = balance.supply_levels();
        assert_eq!(pv, vec![10.0, 12.0]);
        assert_eq!(pv_wt, vec![15.0, 16.0]);
        assert_eq!(total, vec![15.0, 17.0]);
    }

    #[test]
    fn test_demand_levels_are_cumulative() {
        let data = sample_data();
        let balance = PowerBalance::compute(&data, "A").unwrap();
        let [base, with_h2, total] = balance.demand_levels();
        assert_eq!(base, vec![8.0, 9.0]);
        assert_eq!(with_h2, vec![11.0, 9.0]);
        for (got, want) in total.iter().zip([13.0, 9.0005]) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn test_near_zero_charge_is_masked() {
        let data = sample_data();
        let balance = PowerBalance::compute(&data, "A").unwrap();
        assert_eq!(balance.bess_charge_masked, vec![Some(2.0), None]);
        assert_eq!(balance.h2_demand_masked, vec![Some(3.0), None]);
    }

    #[test]
    fn test_y_max_bounds_every_stack_total() {
        let data = sample_data();
        for scenario in ["A", "B"] {
            let balance = PowerBalance::compute(&data, scenario).unwrap();
            let y_max = balance.y_max();
            let [_, _, supply] = balance.supply_levels();
            let [_, _, demand] = balance.demand_levels();
            for v in supply.iter().chain(demand.iter()) {
                assert!(y_max >= *v);
            }
        }
        // 10% headroom over the B stack peak: supply 34, demand 26
        let balance = PowerBalance::compute(&data, "B").unwrap();
        assert!((balance.y_max() - 34.0 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_energy_mix_totals_and_shares() {
        let data = sample_data();
        let mix = EnergyMix::compute(&data, &["A".to_string()]).unwrap();
        assert_eq!(mix.slices.len(), 1);
        let slice = &mix.slices[0];
        assert_eq!(slice.pv_mwh, 22.0);
        assert_eq!(slice.wind_mwh, 9.0);
        assert!((slice.pv_share() - 22.0 / 31.0).abs() < 1e-12);
        assert!((slice.pv_share() + slice.wind_share() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_energy_mix_clamps_to_six_scenarios() {
        // A catalog of 7 scenarios, all selected; only the first 6 survive
        let rows: Vec<(i64, &str, f64)> = ["A", "B", "C", "D", "E", "F", "G"]
            .iter()
            .map(|s| (1, *s, 1.0))
            .collect();
        let data = DashboardData::align(
            table(Quantity::Pv, &rows),
            table(Quantity::Wind, &rows),
            table(Quantity::Demand, &rows),
            table(Quantity::H2Demand, &rows),
            table(Quantity::BessDischarge, &rows),
            table(Quantity::BessCharge, &rows),
            table(Quantity::Soc, &rows),
        )
        .unwrap();

        let selected: Vec<String> = data.scenarios().to_vec();
        assert_eq!(selected.len(), 7);
        let mix = EnergyMix::compute(&data, &selected).unwrap();
        let rendered: Vec<&str> = mix.slices.iter().map(|s| s.scenario.as_str()).collect();
        assert_eq!(rendered, vec!["A", "B", "C", "D", "E", "F"]);
    }

    #[test]
    fn test_soc_traces_skip_unknown_scenario() {
        let data = sample_data();
        let selected = vec!["A".to_string(), "Z".to_string(), "B".to_string()];
        let soc = SocTraces::compute(&data, &selected);
        assert_eq!(soc.traces.len(), 2);
        assert_eq!(soc.traces[0].scenario, "A");
        assert_eq!(soc.traces[0].values, vec![0.5, 0.6]);
        assert_eq!(soc.traces[1].scenario, "B");
    }
}
