//! Immutable simulated dataset.
//!
//! A [`SimulatedTable`] is built once by the structural-equation generator and
//! then only borrowed. Columns are never exposed mutably.

use std::fmt;
use std::str::FromStr;

use cf_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Column of the simulated dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    /// Binary treatment indicator (0.0 / 1.0).
    Treatment,
    /// Standard-normal latent trait, a confounder of mediator and outcome.
    LatentTrait,
    /// Mediator on the treatment → outcome path.
    Mediator,
    /// Outcome.
    Outcome,
}

impl Variable {
    /// All columns in table order.
    pub const ALL: [Variable; 4] =
        [Variable::Treatment, Variable::LatentTrait, Variable::Mediator, Variable::Outcome];

    /// Column name used in reports and coefficient tables.
    pub fn name(self) -> &'static str {
        match self {
            Variable::Treatment => "treatment",
            Variable::LatentTrait => "latent_trait",
            Variable::Mediator => "mediator",
            Variable::Outcome => "outcome",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Variable::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| Error::InvalidParameter(format!("unknown variable '{s}'")))
    }
}

/// Location/scale summary of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Sample mean.
    pub mean: f64,
    /// Unbiased sample variance (NaN for fewer than two rows).
    pub variance: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl ColumnSummary {
    /// Summarise a slice. Empty input gives NaN everywhere.
    pub fn of(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self { mean: f64::NAN, variance: f64::NAN, min: f64::NAN, max: f64::NAN };
        }
        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            f64::NAN
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self { mean, variance, min, max }
    }
}

/// Simulated rows, stored column-wise.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedTable {
    treatment: Vec<f64>,
    latent_trait: Vec<f64>,
    mediator: Vec<f64>,
    outcome: Vec<f64>,
}

impl SimulatedTable {
    /// Assemble a table from four equal-length columns.
    pub fn from_columns(
        treatment: Vec<f64>,
        latent_trait: Vec<f64>,
        mediator: Vec<f64>,
        outcome: Vec<f64>,
    ) -> Result<Self> {
        let n = treatment.len();
        for (what, len) in [
            ("latent_trait", latent_trait.len()),
            ("mediator", mediator.len()),
            ("outcome", outcome.len()),
        ] {
            if len != n {
                return Err(Error::shape(what, n, len));
            }
        }
        Ok(Self { treatment, latent_trait, mediator, outcome })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.treatment.len()
    }

    /// `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.treatment.is_empty()
    }

    /// Borrow a column.
    pub fn column(&self, var: Variable) -> &[f64] {
        match var {
            Variable::Treatment => &self.treatment,
            Variable::LatentTrait => &self.latent_trait,
            Variable::Mediator => &self.mediator,
            Variable::Outcome => &self.outcome,
        }
    }

    /// Treatment column.
    pub fn treatment(&self) -> &[f64] {
        &self.treatment
    }

    /// Latent-trait column.
    pub fn latent_trait(&self) -> &[f64] {
        &self.latent_trait
    }

    /// Mediator column.
    pub fn mediator(&self) -> &[f64] {
        &self.mediator
    }

    /// Outcome column.
    pub fn outcome(&self) -> &[f64] {
        &self.outcome
    }

    /// Summary of one column.
    pub fn summary(&self, var: Variable) -> ColumnSummary {
        ColumnSummary::of(self.column(var))
    }

    /// Summaries of every column in table order.
    pub fn summaries(&self) -> Vec<(Variable, ColumnSummary)> {
        Variable::ALL.into_iter().map(|v| (v, self.summary(v))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_columns_rejects_ragged() {
        let err = SimulatedTable::from_columns(
            vec![0.0, 1.0],
            vec![0.1, 0.2],
            vec![1.0],
            vec![2.0, 3.0],
        )
        .unwrap_err();
        match err {
            Error::ShapeMismatch { what, expected, got } => {
                assert_eq!(what, "mediator");
                assert_eq!(expected, 2);
                assert_eq!(got, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_column_access_matches_named_accessors() {
        let t = SimulatedTable::from_columns(
            vec![0.0, 1.0],
            vec![0.5, -0.5],
            vec![2.0, -1.0],
            vec![3.0, 0.0],
        )
        .unwrap();
        assert_eq!(t.len(), 2);
        assert!(!t.is_empty());
        assert_eq!(t.column(Variable::Treatment), t.treatment());
        assert_eq!(t.column(Variable::LatentTrait), t.latent_trait());
        assert_eq!(t.column(Variable::Mediator), t.mediator());
        assert_eq!(t.column(Variable::Outcome), t.outcome());
    }

    #[test]
    fn test_summary() {
        let s = ColumnSummary::of(&[1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(s.mean, 2.5);
        assert_relative_eq!(s.variance, 5.0 / 3.0, epsilon = 1e-12);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);

        let one = ColumnSummary::of(&[7.0]);
        assert_eq!(one.mean, 7.0);
        assert!(one.variance.is_nan());
        assert!(ColumnSummary::of(&[]).mean.is_nan());
    }

    #[test]
    fn test_variable_names_round_trip() {
        for v in Variable::ALL {
            assert_eq!(v.name().parse::<Variable>().unwrap(), v);
        }
        assert!(matches!("age".parse::<Variable>(), Err(Error::InvalidParameter(_))));
    }
}
