//! Load- and reshape-time errors. All are fatal and surfaced to the user at
//! the point of occurrence; nothing here is retried.

use crate::models::Quantity;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("{quantity} ({file}): required column '{column}' is missing")]
    Schema {
        quantity: Quantity,
        file: &'static str,
        column: &'static str,
    },

    #[error("{quantity}: duplicate value for hour {hour}, scenario '{scenario}'")]
    DuplicateKey {
        quantity: Quantity,
        hour: i64,
        scenario: String,
    },

    #[error("{quantity}: no value for hour {hour}, scenario '{scenario}'")]
    MissingValue {
        quantity: Quantity,
        hour: i64,
        scenario: String,
    },

    #[error("no common hours across input tables")]
    EmptyIntersection,

    #[error("unknown scenario '{scenario}' in {quantity} table")]
    UnknownScenario { quantity: Quantity, scenario: String },

    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),
}
