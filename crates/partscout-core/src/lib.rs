//! Canonical data model and configuration shared by every `partscout` crate.
//!
//! Distributor clients normalize their wire formats into
//! [`ComponentAvailability`]; the matcher consumes those records together with
//! a caller-supplied [`ComponentRequirements`] policy.

pub mod app_config;
pub mod component;
pub mod config;
pub mod filters;
pub mod requirements;

use thiserror::Error;

pub use app_config::AppConfig;
pub use component::{
    AlternativeComponent, ComponentAvailability, ComponentComparison, ComponentGrade, Distributor,
    GradeComparison, ManufacturerComparison, PriceBreak, PriceComparison, StockComparison,
    TemperatureComparison,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use filters::SearchFilters;
pub use requirements::{ComponentRequirements, TempRange};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown distributor: {0}")]
    UnknownDistributor(String),

    #[error("unknown component grade: {0}")]
    UnknownGrade(String),

    #[error("invalid temperature range: min {min} exceeds max {max}")]
    InvalidTempRange { min: f64, max: f64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
