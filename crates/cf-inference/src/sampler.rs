//! Exogenous draws: treatment assignment and latent trait.
//!
//! Draw order is fixed: every treatment draw first, then every latent-trait
//! draw. Any change here changes the stream seen by the structural-equation
//! noise and therefore every downstream number for a given seed.

use cf_core::{Error, Result};
use rand::Rng;
use rand_distr::{Bernoulli, Distribution, StandardNormal};

/// Probability of receiving treatment.
pub const TREATMENT_PROBABILITY: f64 = 0.5;

/// Independent inputs of the structural model, one entry per row.
#[derive(Debug, Clone, PartialEq)]
pub struct ExogenousDraws {
    /// Treatment indicator, 0.0 or 1.0.
    pub treatment: Vec<f64>,
    /// Latent trait, standard normal.
    pub latent_trait: Vec<f64>,
}

impl ExogenousDraws {
    /// Number of rows (length of the treatment vector).
    pub fn len(&self) -> usize {
        self.treatment.len()
    }

    /// `true` if no rows were drawn.
    pub fn is_empty(&self) -> bool {
        self.treatment.is_empty()
    }
}

/// Draw `n_rows` i.i.d. treatment indicators and latent traits.
pub fn sample_exogenous<R: Rng + ?Sized>(n_rows: usize, rng: &mut R) -> Result<ExogenousDraws> {
    if n_rows == 0 {
        return Err(Error::InvalidParameter("row count must be > 0".to_string()));
    }

    let coin = Bernoulli::new(TREATMENT_PROBABILITY)
        .map_err(|e| Error::InvalidParameter(format!("treatment probability: {e}")))?;

    let mut treatment = Vec::with_capacity(n_rows);
    for _ in 0..n_rows {
        treatment.push(if coin.sample(rng) { 1.0 } else { 0.0 });
    }

    let mut latent_trait = Vec::with_capacity(n_rows);
    for _ in 0..n_rows {
        let z: f64 = StandardNormal.sample(rng);
        latent_trait.push(z);
    }

    Ok(ExogenousDraws { treatment, latent_trait })
}

/// Validate a signed row count as supplied on the command line or in config.
pub fn row_count(n: i64) -> Result<usize> {
    if n <= 0 {
        return Err(Error::InvalidParameter(format!("row count must be > 0, got {n}")));
    }
    usize::try_from(n)
        .map_err(|_| Error::InvalidParameter(format!("row count {n} does not fit in usize")))
}

/// Interpret a JSON value as a row count. Only integers are accepted; floats,
/// numeric strings and values beyond `i64` are rejected.
pub fn rows_from_json(value: &serde_json::Value) -> Result<usize> {
    match value {
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(v) => row_count(v),
            None => Err(Error::InvalidParameter(format!("row count must be an integer, got {n}"))),
        },
        other => Err(Error::InvalidParameter(format!("unsupported row count type: {other}"))),
    }
}

/// Parse a textual seed. Only non-negative integers that fit in 64 bits are accepted.
pub fn parse_seed(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    trimmed.parse::<u64>().map_err(|_| {
        Error::InvalidParameter(format!(
            "seed must be a non-negative 64-bit integer, got '{trimmed}'"
        ))
    })
}

/// Interpret a JSON value as a seed: an unsigned integer or a string holding one.
pub fn seed_from_json(value: &serde_json::Value) -> Result<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().ok_or_else(|| {
            Error::InvalidParameter(format!("seed must be a non-negative 64-bit integer, got {n}"))
        }),
        serde_json::Value::String(s) => parse_seed(s),
        other => Err(Error::InvalidParameter(format!("unsupported seed type: {other}"))),
    }
}
