// Rotor state estimation for sensorless ACIM field-oriented control
// Flux observer and the angle helpers it relies on

pub mod acim_estimator;
pub mod transforms;

// Re-export main types for easier access
pub use acim_estimator::{AcimEstimator, AcimOutputs, DqCurrent, EstimatorMode};
pub use transforms::{normalize_angle, wrap_pm_pi};
