//! CSV loading for the seven fixed-name simulation result files.

use crate::error::{DashboardError, Result};
use crate::models::{Observation, Quantity};
use crate::pivot::{DashboardData, SeriesTable};
use log::info;
use polars::prelude::*;
use std::path::Path;
use std::sync::OnceLock;

const REQUIRED_COLUMNS: [&str; 3] = ["hour", "scenario", "value"];

/// Read one quantity's long-format CSV (`hour,scenario,value`) from `dir`.
///
/// Numeric columns are cast to the target dtype, so an all-integer `value`
/// column still loads as floats. Rows with a null in any column are skipped;
/// the pivot step reports the resulting gap as a `MissingValue`.
pub fn load_observations(dir: &Path, quantity: Quantity) -> Result<Vec<Observation>> {
    let path = dir.join(quantity.file_name());
    if !path.exists() {
        return Err(DashboardError::MissingFile { path });
    }

    let df = CsvReader::from_path(&path)?.has_header(true).finish()?;

    for column in REQUIRED_COLUMNS {
        if !df.get_column_names().contains(&column) {
            return Err(DashboardError::Schema {
                quantity,
                file: quantity.file_name(),
                column,
            });
        }
    }

    let hours = df.column("hour")?.cast(&DataType::Int64)?;
    let hours = hours.i64()?;
    let scenarios = df.column("scenario")?.cast(&DataType::Utf8)?;
    let scenarios = scenarios.utf8()?;
    let values = df.column("value")?.cast(&DataType::Float64)?;
    let values = values.f64()?;

    let mut observations = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        if let (Some(hour), Some(scenario), Some(value)) =
            (hours.get(idx), scenarios.get(idx), values.get(idx))
        {
            observations.push(Observation::new(hour, scenario, value));
        }
    }

    info!(
        "{}: loaded {} observations from {}",
        quantity,
        observations.len(),
        path.display()
    );
    Ok(observations)
}

impl DashboardData {
    /// Load, pivot, and align all seven result files from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let pivoted = |quantity: Quantity| -> Result<SeriesTable> {
            let observations = load_observations(dir, quantity)?;
            SeriesTable::pivot(quantity, &observations)
        };
        let data = Self::align(
            pivoted(Quantity::Pv)?,
            pivoted(Quantity::Wind)?,
            pivoted(Quantity::Demand)?,
            pivoted(Quantity::H2Demand)?,
            pivoted(Quantity::BessDischarge)?,
            pivoted(Quantity::BessCharge)?,
            pivoted(Quantity::Soc)?,
        )?;
        info!(
            "aligned {} common hours, {} scenarios",
            data.hours().len(),
            data.scenarios().len()
        );
        Ok(data)
    }
}

static CACHE: OnceLock<DashboardData> = OnceLock::new();

/// Process-wide load-once handle to the dashboard data.
///
/// The first call loads from `dir` and pins the result for the lifetime of
/// the process; later calls return the same data and ignore `dir`. Written
/// exactly once, never invalidated. Multi-instance deployments should prefer
/// an explicit `DashboardData::load` and pass the handle down instead.
pub fn cached(dir: &Path) -> Result<&'static DashboardData> {
    if let Some(data) = CACHE.get() {
        return Ok(data);
    }
    let data = DashboardData::load(dir)?;
    Ok(CACHE.get_or_init(|| data))
}
