//! The three predictor subsets compared by the experiment.

use serde::{Deserialize, Serialize};

use crate::table::Variable;

/// Which columns the outcome is regressed on (always with an intercept).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentSet {
    /// `outcome ~ treatment`: estimates the total effect.
    TreatmentOnly,
    /// `outcome ~ treatment + mediator`: blocks the mediated path but leaves
    /// the latent trait omitted, so the mediator acts as a collider.
    WithMediator,
    /// `outcome ~ treatment + mediator + latent_trait`: recovers the direct
    /// structural coefficients.
    Full,
}

impl AdjustmentSet {
    /// All sets in reporting order.
    pub const ALL: [AdjustmentSet; 3] =
        [AdjustmentSet::TreatmentOnly, AdjustmentSet::WithMediator, AdjustmentSet::Full];

    /// Predictor columns, in coefficient order.
    pub fn predictors(self) -> &'static [Variable] {
        match self {
            AdjustmentSet::TreatmentOnly => &[Variable::Treatment],
            AdjustmentSet::WithMediator => &[Variable::Treatment, Variable::Mediator],
            AdjustmentSet::Full => &[Variable::Treatment, Variable::Mediator, Variable::LatentTrait],
        }
    }

    /// Model formula, e.g. `outcome ~ treatment + mediator`.
    pub fn formula(self) -> String {
        let rhs: Vec<&str> = self.predictors().iter().map(|v| v.name()).collect();
        format!("{} ~ {}", Variable::Outcome.name(), rhs.join(" + "))
    }
}
