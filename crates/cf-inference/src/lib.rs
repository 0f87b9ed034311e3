//! # cf-inference
//!
//! Simulation and estimation for confound.
//!
//! This crate provides:
//! - A seeded sampler for treatment and latent trait
//! - Linear structural equations for mediator and outcome, plus the
//!   population moments they imply
//! - QR-based ordinary least squares with standard errors
//! - The three-model experiment comparing naive, mediator-adjusted and fully
//!   adjusted estimates of the treatment effect
//!
//! Every random draw goes through one explicitly passed generator; nothing in
//! this crate keeps global state.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Predictor subsets compared by the experiment.
pub mod adjustment;
/// JSON run configuration.
pub mod config;
/// Sample → generate → fit pipeline.
pub mod experiment;
/// OLS regression.
pub mod regression;
/// Treatment and latent-trait draws.
pub mod sampler;
/// Structural equations and implied population fits.
pub mod structural;
/// Immutable simulated table.
pub mod table;

pub use adjustment::AdjustmentSet;
pub use config::{DEFAULT_ROWS, DEFAULT_SEED, SimulationConfig};
pub use experiment::{
    ColumnReport, ExperimentReport, ModelReport, fit_adjustment_sets, run_experiment, simulate,
};
pub use regression::{LinearRegressionModel, ols_fit};
pub use sampler::{ExogenousDraws, parse_seed, sample_exogenous};
pub use structural::{StructuralCoefficients, generate};
pub use table::{ColumnSummary, SimulatedTable, Variable};
