pub mod chart;
pub mod derived;
pub mod error;
pub mod loader;
pub mod models;
pub mod pivot;

pub use derived::{mask, mask_series, EnergyMix, EnergyMixSlice, PowerBalance, SocTrace, SocTraces};
pub use error::{DashboardError, Result};
pub use loader::{cached, load_observations};
pub use models::{Observation, Quantity, MASK_EPSILON, MAX_PIE_SCENARIOS};
pub use pivot::{align_all, DashboardData, SeriesTable};
