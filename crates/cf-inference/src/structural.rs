//! Linear structural equations for the mediator and the outcome.
//!
//! ```text
//! mediator = m0 + m_latent * latent_trait + m_treatment * treatment + e1
//! outcome  = y0 + y_treatment * treatment + y_mediator * mediator + y_latent * latent_trait + e2
//! ```
//!
//! `e1 ~ N(0, mediator_noise_sd²)` and `e2 ~ N(0, outcome_noise_sd²)` are drawn
//! fresh per row: all mediator noise first, then all outcome noise.
//!
//! Besides generating data, the coefficients determine the population moments
//! of every column, which gives the exact least-squares target for any fixed
//! predictor list (see [`StructuralCoefficients::implied_fit`]).

use cf_core::{Error, Result};
use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::sampler::{ExogenousDraws, TREATMENT_PROBABILITY};
use crate::table::{SimulatedTable, Variable};

/// Fixed coefficients of the ground-truth model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StructuralCoefficients {
    /// Mediator intercept.
    pub mediator_intercept: f64,
    /// Effect of the latent trait on the mediator.
    pub mediator_on_latent: f64,
    /// Effect of treatment on the mediator.
    pub mediator_on_treatment: f64,
    /// Standard deviation of the mediator noise.
    pub mediator_noise_sd: f64,
    /// Outcome intercept.
    pub outcome_intercept: f64,
    /// Direct effect of treatment on the outcome.
    pub outcome_on_treatment: f64,
    /// Effect of the mediator on the outcome.
    pub outcome_on_mediator: f64,
    /// Direct effect of the latent trait on the outcome.
    pub outcome_on_latent: f64,
    /// Standard deviation of the outcome noise.
    pub outcome_noise_sd: f64,
}

impl Default for StructuralCoefficients {
    fn default() -> Self {
        Self {
            mediator_intercept: 1.0,
            mediator_on_latent: 2.0,
            mediator_on_treatment: -2.0,
            mediator_noise_sd: 1.0,
            outcome_intercept: 1.0,
            outcome_on_treatment: -1.0,
            outcome_on_mediator: 1.0,
            outcome_on_latent: 2.0,
            outcome_noise_sd: 1.0,
        }
    }
}

/// Independent sources every column is a linear combination of:
/// treatment, latent trait, mediator noise, outcome noise.
const N_SOURCES: usize = 4;

impl StructuralCoefficients {
    /// Reject non-finite coefficients and negative noise scales.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("mediator_intercept", self.mediator_intercept),
            ("mediator_on_latent", self.mediator_on_latent),
            ("mediator_on_treatment", self.mediator_on_treatment),
            ("mediator_noise_sd", self.mediator_noise_sd),
            ("outcome_intercept", self.outcome_intercept),
            ("outcome_on_treatment", self.outcome_on_treatment),
            ("outcome_on_mediator", self.outcome_on_mediator),
            ("outcome_on_latent", self.outcome_on_latent),
            ("outcome_noise_sd", self.outcome_noise_sd),
        ];
        for (name, v) in named {
            if !v.is_finite() {
                return Err(Error::InvalidParameter(format!("{name} must be finite, got {v}")));
            }
        }
        for (name, sd) in [
            ("mediator_noise_sd", self.mediator_noise_sd),
            ("outcome_noise_sd", self.outcome_noise_sd),
        ] {
            if sd < 0.0 {
                return Err(Error::InvalidParameter(format!("{name} must be >= 0, got {sd}")));
            }
        }
        Ok(())
    }

    /// Total effect of treatment on the outcome: direct path plus the path
    /// through the mediator.
    pub fn total_treatment_effect(&self) -> f64 {
        self.outcome_on_treatment + self.outcome_on_mediator * self.mediator_on_treatment
    }

    /// Population mean of a column.
    pub fn mean(&self, var: Variable) -> f64 {
        let p = TREATMENT_PROBABILITY;
        let mediator = self.mediator_intercept + self.mediator_on_treatment * p;
        match var {
            Variable::Treatment => p,
            Variable::LatentTrait => 0.0,
            Variable::Mediator => mediator,
            Variable::Outcome => {
                self.outcome_intercept
                    + self.outcome_on_treatment * p
                    + self.outcome_on_mediator * mediator
            }
        }
    }

    /// Loadings of a column on the independent sources.
    fn loadings(&self, var: Variable) -> [f64; N_SOURCES] {
        match var {
            Variable::Treatment => [1.0, 0.0, 0.0, 0.0],
            Variable::LatentTrait => [0.0, 1.0, 0.0, 0.0],
            Variable::Mediator => [self.mediator_on_treatment, self.mediator_on_latent, 1.0, 0.0],
            Variable::Outcome => [
                self.outcome_on_treatment + self.outcome_on_mediator * self.mediator_on_treatment,
                self.outcome_on_latent + self.outcome_on_mediator * self.mediator_on_latent,
                self.outcome_on_mediator,
                1.0,
            ],
        }
    }

    fn source_variances(&self) -> [f64; N_SOURCES] {
        let p = TREATMENT_PROBABILITY;
        [p * (1.0 - p), 1.0, self.mediator_noise_sd.powi(2), self.outcome_noise_sd.powi(2)]
    }

    /// Population covariance of two columns.
    pub fn covariance(&self, a: Variable, b: Variable) -> f64 {
        let la = self.loadings(a);
        let lb = self.loadings(b);
        let d = self.source_variances();
        (0..N_SOURCES).map(|k| la[k] * lb[k] * d[k]).sum()
    }

    /// Population least-squares coefficients of `outcome` on `predictors`
    /// with an intercept: `[intercept, beta_1, ..., beta_k]`.
    ///
    /// Solves `Σ_XX β = Σ_XY` on the model-implied covariance matrix, then
    /// `intercept = E[Y] - Σ β_j E[X_j]`.
    pub fn implied_fit(&self, predictors: &[Variable]) -> Result<Vec<f64>> {
        if predictors.is_empty() {
            return Ok(vec![self.mean(Variable::Outcome)]);
        }
        if predictors.contains(&Variable::Outcome) {
            return Err(Error::InvalidParameter("outcome cannot be its own predictor".to_string()));
        }

        let k = predictors.len();
        let sxx = DMatrix::from_fn(k, k, |i, j| self.covariance(predictors[i], predictors[j]));
        let sxy = DVector::from_fn(k, |i, _| self.covariance(predictors[i], Variable::Outcome));

        let chol = sxx.cholesky().ok_or_else(|| {
            Error::SingularDesign(format!(
                "population covariance of [{}] is not positive definite",
                predictors.iter().map(|v| v.name()).collect::<Vec<_>>().join(", ")
            ))
        })?;
        let beta = chol.solve(&sxy);

        let intercept = self.mean(Variable::Outcome)
            - predictors.iter().zip(beta.iter()).map(|(&v, &b)| b * self.mean(v)).sum::<f64>();

        let mut out = Vec::with_capacity(k + 1);
        out.push(intercept);
        out.extend(beta.iter().copied());
        Ok(out)
    }
}

/// Compute mediator and outcome for every row of `draws`.
///
/// Consumes the draws so the resulting table owns its columns without copying.
pub fn generate<R: Rng + ?Sized>(
    draws: ExogenousDraws,
    coefficients: &StructuralCoefficients,
    rng: &mut R,
) -> Result<SimulatedTable> {
    let n = draws.treatment.len();
    if draws.latent_trait.len() != n {
        return Err(Error::shape("latent_trait", n, draws.latent_trait.len()));
    }
    coefficients.validate()?;
    let c = coefficients;

    let mediator_noise = Normal::new(0.0, c.mediator_noise_sd)
        .map_err(|e| Error::InvalidParameter(format!("mediator_noise_sd: {e}")))?;
    let outcome_noise = Normal::new(0.0, c.outcome_noise_sd)
        .map_err(|e| Error::InvalidParameter(format!("outcome_noise_sd: {e}")))?;

    let mut mediator = Vec::with_capacity(n);
    for i in 0..n {
        let e1 = mediator_noise.sample(rng);
        mediator.push(
            c.mediator_intercept
                + c.mediator_on_latent * draws.latent_trait[i]
                + c.mediator_on_treatment * draws.treatment[i]
                + e1,
        );
    }

    let mut outcome = Vec::with_capacity(n);
    for i in 0..n {
        let e2 = outcome_noise.sample(rng);
        outcome.push(
            c.outcome_intercept
                + c.outcome_on_treatment * draws.treatment[i]
                + c.outcome_on_mediator * mediator[i]
                + c.outcome_on_latent * draws.latent_trait[i]
                + e2,
        );
    }

    tracing::debug!(rows = n, "structural equations evaluated");
    SimulatedTable::from_columns(draws.treatment, draws.latent_trait, mediator, outcome)
}
