//! Core traits for confound

/// A statistical model with a fixed, named parameter vector.
///
/// Regressors implement this so reports can label estimates without knowing
/// which concrete model produced them.
pub trait Model: Send + Sync {
    /// Number of parameters
    fn n_parameters(&self) -> usize;

    /// Parameter names, in estimation order
    fn parameter_names(&self) -> Vec<String>;
}
