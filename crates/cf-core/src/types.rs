//! Common result types for confound

use serde::{Deserialize, Serialize};

/// One row of a coefficient table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    /// Parameter name (`intercept` or a predictor column name)
    pub name: String,

    /// Point estimate
    pub estimate: f64,

    /// Standard error (NaN when residual degrees of freedom are zero)
    pub std_error: f64,

    /// `estimate / std_error`
    pub t_value: f64,

    /// Two-sided p-value under Student t with `df_resid` degrees of freedom
    pub p_value: f64,
}

/// Ordinary-least-squares fit summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OlsFit {
    /// Intercept first, then predictors in the order they were requested
    pub coefficients: Vec<Coefficient>,

    /// Coefficient of determination
    pub r_squared: f64,

    /// `sqrt(rss / df_resid)`
    pub residual_std_error: f64,

    /// Residual sum of squares
    pub rss: f64,

    /// Number of observations
    pub n_obs: usize,

    /// Residual degrees of freedom (`n_obs - n_parameters`)
    pub df_resid: usize,
}

impl OlsFit {
    /// Look up a coefficient by name.
    pub fn coefficient(&self, name: &str) -> Option<&Coefficient> {
        self.coefficients.iter().find(|c| c.name == name)
    }

    /// Point estimate for `name`, if present.
    pub fn estimate(&self, name: &str) -> Option<f64> {
        self.coefficient(name).map(|c| c.estimate)
    }

    /// Intercept estimate.
    pub fn intercept(&self) -> Option<f64> {
        self.estimate("intercept")
    }

    /// Point estimates in parameter order.
    pub fn estimates(&self) -> Vec<f64> {
        self.coefficients.iter().map(|c| c.estimate).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coef(name: &str, estimate: f64) -> Coefficient {
        Coefficient {
            name: name.to_string(),
            estimate,
            std_error: 0.1,
            t_value: estimate / 0.1,
            p_value: 0.0,
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let fit = OlsFit {
            coefficients: vec![coef("intercept", 1.0), coef("treatment", -3.0)],
            r_squared: 0.5,
            residual_std_error: 1.0,
            rss: 10.0,
            n_obs: 12,
            df_resid: 10,
        };
        assert_eq!(fit.intercept(), Some(1.0));
        assert_eq!(fit.estimate("treatment"), Some(-3.0));
        assert!(fit.coefficient("mediator").is_none());
        assert_eq!(fit.estimates(), vec![1.0, -3.0]);
    }
}
