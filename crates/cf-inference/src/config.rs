//! Run configuration.
//!
//! Loaded from JSON; every field is optional and falls back to the default
//! run (10 000 rows, seed 42, ground-truth coefficients):
//!
//! ```json
//! { "n_rows": 5000, "seed": 7, "coefficients": { "outcome_on_treatment": -0.5 } }
//! ```
//!
//! `n_rows` and `seed` are read as raw JSON values so that out-of-range or
//! mistyped inputs surface as [`Error::InvalidParameter`]
//! rather than a generic parse failure.

use std::path::Path;

use cf_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::sampler::{row_count, rows_from_json, seed_from_json};
use crate::structural::StructuralCoefficients;

/// Default number of simulated rows.
pub const DEFAULT_ROWS: usize = 10_000;
/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

/// Parameters of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationConfig {
    /// Number of rows to simulate (> 0).
    pub n_rows: usize,
    /// Seed for the single `StdRng` used by the whole run.
    pub seed: u64,
    /// Structural coefficients.
    pub coefficients: StructuralCoefficients,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_rows: DEFAULT_ROWS,
            seed: DEFAULT_SEED,
            coefficients: StructuralCoefficients::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    n_rows: Option<serde_json::Value>,
    seed: Option<serde_json::Value>,
    coefficients: Option<StructuralCoefficients>,
}

impl SimulationConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;
        let mut cfg = Self::default();
        if let Some(n) = &raw.n_rows {
            cfg.n_rows = rows_from_json(n)?;
        }
        if let Some(seed) = &raw.seed {
            cfg.seed = seed_from_json(seed)?;
        }
        if let Some(coefficients) = raw.coefficients {
            cfg.coefficients = coefficients;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Override the row count.
    pub fn with_rows(mut self, n: i64) -> Result<Self> {
        self.n_rows = row_count(n)?;
        Ok(self)
    }

    /// Override the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check row count and coefficients.
    pub fn validate(&self) -> Result<()> {
        if self.n_rows == 0 {
            return Err(Error::InvalidParameter("n_rows must be > 0".to_string()));
        }
        self.coefficients.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(SimulationConfig::from_json_str("{}").unwrap(), SimulationConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let cfg = SimulationConfig::from_json_str(
            r#"{"n_rows": 500, "seed": "7", "coefficients": {"outcome_on_latent": 0.0}}"#,
        )
        .unwrap();
        assert_eq!(cfg.n_rows, 500);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.coefficients.outcome_on_latent, 0.0);
        assert_eq!(cfg.coefficients.mediator_on_latent, 2.0);
    }

    #[test]
    fn test_invalid_values() {
        for doc in [
            r#"{"n_rows": 0}"#,
            r#"{"n_rows": -10}"#,
            r#"{"n_rows": 1.5}"#,
            r#"{"n_rows": "100"}"#,
            r#"{"n_rows": 1e30}"#,
            r#"{"seed": -1}"#,
            r#"{"seed": 3.5}"#,
            r#"{"seed": true}"#,
            r#"{"coefficients": {"mediator_noise_sd": -2.0}}"#,
        ] {
            let err = SimulationConfig::from_json_str(doc).unwrap_err();
            assert!(matches!(err, Error::InvalidParameter(_)), "{doc}: {err}");
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(SimulationConfig::from_json_str("{"), Err(Error::Json(_))));
        assert!(matches!(
            SimulationConfig::from_json_str(r#"{"rows": 10}"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_builders() {
        let cfg = SimulationConfig::default().with_rows(123).unwrap().with_seed(9);
        assert_eq!((cfg.n_rows, cfg.seed), (123, 9));
        assert!(SimulationConfig::default().with_rows(0).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = SimulationConfig::from_path(Path::new("/nonexistent/confound.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
