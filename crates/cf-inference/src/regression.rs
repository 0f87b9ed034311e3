//! Ordinary least squares with an intercept.
//!
//! The fit factorises the design matrix `X = QR` (thin Householder QR) and
//! back-substitutes `R β = Qᵀy`, which avoids squaring the condition number
//! the way the normal equations `XᵀX β = Xᵀy` do. A design is rejected as
//! rank deficient when any `|R_jj|` falls below [`RANK_RTOL`] times the
//! largest diagonal entry.

use cf_core::traits::Model;
use cf_core::{Coefficient, Error, OlsFit, Result};
use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::table::{SimulatedTable, Variable};

/// Relative tolerance on the diagonal of `R` below which a column is treated
/// as linearly dependent on the preceding ones.
pub const RANK_RTOL: f64 = 1e-10;

#[inline]
fn validate_xy_dims(n: usize, p: usize, x_len: usize, y_len: usize) -> Result<()> {
    if n == 0 {
        return Err(Error::InvalidParameter("X/y must be non-empty".to_string()));
    }
    if x_len != n * p {
        return Err(Error::shape("X", n * p, x_len));
    }
    if y_len != n {
        return Err(Error::shape("y", n, y_len));
    }
    Ok(())
}

#[inline]
fn row_dot(x_row: &[f64], beta: &[f64]) -> f64 {
    debug_assert_eq!(x_row.len(), beta.len());
    x_row.iter().zip(beta).map(|(&x, &b)| x * b).sum()
}

/// Dense row-major predictor matrix (no intercept column).
#[derive(Debug, Clone)]
struct DenseX {
    n: usize,
    p: usize,
    data: Vec<f64>, // length n*p, row-major
}

impl DenseX {
    fn from_columns(n: usize, columns: &[&[f64]]) -> Result<Self> {
        let p = columns.len();
        for (j, col) in columns.iter().enumerate() {
            if col.len() != n {
                return Err(Error::shape(format!("X column {j}"), n, col.len()));
            }
        }
        let mut data = Vec::with_capacity(n * p);
        for i in 0..n {
            for col in columns {
                data.push(col[i]);
            }
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidParameter("X must contain only finite values".to_string()));
        }
        Ok(Self { n, p, data })
    }

    #[inline]
    fn row(&self, i: usize) -> &[f64] {
        let start = i * self.p;
        &self.data[start..start + self.p]
    }
}

/// Gaussian linear regression `y_i = intercept + X_i β + ε_i`.
#[derive(Debug, Clone)]
pub struct LinearRegressionModel {
    x: DenseX,
    y: Vec<f64>,
    names: Vec<String>,
}

impl LinearRegressionModel {
    /// Regress one table column on others, with an intercept. The table is
    /// only read.
    pub fn from_table(
        table: &SimulatedTable,
        response: Variable,
        predictors: &[Variable],
    ) -> Result<Self> {
        if predictors.contains(&response) {
            return Err(Error::InvalidParameter(format!(
                "{response} cannot be both response and predictor"
            )));
        }
        let columns: Vec<&[f64]> = predictors.iter().map(|&v| table.column(v)).collect();
        let x = DenseX::from_columns(table.len(), &columns)?;
        let y = table.column(response).to_vec();
        validate_xy_dims(x.n, x.p, x.data.len(), y.len())?;
        if y.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidParameter("y must contain only finite values".to_string()));
        }
        let names = predictors.iter().map(|v| v.name().to_string()).collect();
        Ok(Self { x, y, names })
    }

    #[inline]
    fn dim_internal(&self) -> usize {
        self.x.p + 1
    }

    #[inline]
    fn eta(&self, i: usize, params: &[f64]) -> f64 {
        params[0] + row_dot(self.x.row(i), &params[1..])
    }

    /// Number of observations.
    pub fn n_obs(&self) -> usize {
        self.x.n
    }

    /// Residual sum of squares at `[intercept, beta_1, ..., beta_p]`.
    pub fn rss(&self, params: &[f64]) -> Result<f64> {
        if params.len() != self.dim_internal() {
            return Err(Error::shape("params", self.dim_internal(), params.len()));
        }
        if params.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidParameter("params must contain only finite values".to_string()));
        }
        let mut sse = 0.0;
        for i in 0..self.x.n {
            let r = self.y[i] - self.eta(i, params);
            sse += r * r;
        }
        Ok(sse)
    }

    /// Design matrix with the leading intercept column.
    fn design(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.x.n, self.dim_internal(), |i, j| {
            if j == 0 { 1.0 } else { self.x.row(i)[j - 1] }
        })
    }

    /// Least-squares fit with standard errors, t statistics and p-values.
    pub fn fit(&self) -> Result<OlsFit> {
        let n = self.x.n;
        let d = self.dim_internal();
        let names = self.parameter_names();
        if n < d {
            return Err(Error::SingularDesign(format!(
                "{n} observations cannot identify {d} parameters"
            )));
        }

        let x = self.design();
        let y = DVector::from_column_slice(&self.y);

        let qr = x.clone().qr();
        let r = qr.r();
        let q = qr.q();

        let max_diag = r.diagonal().iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        for j in 0..d {
            let rjj = r[(j, j)].abs();
            if rjj.is_nan() || rjj <= RANK_RTOL * max_diag {
                return Err(Error::SingularDesign(format!(
                    "column '{}' is linearly dependent on earlier columns",
                    names[j]
                )));
            }
        }

        let qty = q.transpose() * &y;
        let beta = r
            .solve_upper_triangular(&qty)
            .ok_or_else(|| Error::SingularDesign("triangular solve failed".to_string()))?;

        let resid = &y - &x * &beta;
        let rss = resid.norm_squared();
        let mean_y = self.y.iter().sum::<f64>() / n as f64;
        let tss: f64 = self.y.iter().map(|&v| (v - mean_y).powi(2)).sum();
        let r_squared = if tss > 0.0 { 1.0 - rss / tss } else { 0.0 };

        let df_resid = n - d;
        let (sigma2, t_dist) = if df_resid > 0 {
            let dist = StudentsT::new(0.0, 1.0, df_resid as f64)
                .map_err(|e| Error::InvalidParameter(format!("Student t: {e}")))?;
            (rss / df_resid as f64, Some(dist))
        } else {
            (f64::NAN, None)
        };

        // (XᵀX)⁻¹ = R⁻¹ R⁻ᵀ
        let r_inv = r
            .solve_upper_triangular(&DMatrix::identity(d, d))
            .ok_or_else(|| Error::SingularDesign("R is not invertible".to_string()))?;
        let xtx_inv = &r_inv * r_inv.transpose();

        let coefficients = names
            .into_iter()
            .enumerate()
            .map(|(j, name)| {
                let estimate = beta[j];
                let std_error = (sigma2 * xtx_inv[(j, j)]).sqrt();
                let t_value = estimate / std_error;
                let p_value = match &t_dist {
                    Some(dist) if t_value.is_finite() => 2.0 * dist.sf(t_value.abs()),
                    Some(_) if t_value.is_infinite() => 0.0,
                    _ => f64::NAN,
                };
                Coefficient { name, estimate, std_error, t_value, p_value }
            })
            .collect();

        Ok(OlsFit {
            coefficients,
            r_squared,
            residual_std_error: sigma2.sqrt(),
            rss,
            n_obs: n,
            df_resid,
        })
    }
}

impl Model for LinearRegressionModel {
    fn n_parameters(&self) -> usize {
        self.dim_internal()
    }

    fn parameter_names(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.dim_internal());
        out.push("intercept".to_string());
        out.extend(self.names.iter().cloned());
        out
    }
}

/// Fit `response ~ 1 + predictors` on a simulated table.
pub fn ols_fit(
    table: &SimulatedTable,
    response: Variable,
    predictors: &[Variable],
) -> Result<OlsFit> {
    LinearRegressionModel::from_table(table, response, predictors)?.fit()
}
