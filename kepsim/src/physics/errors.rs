//! Error type for non-physical inputs and domain violations
//!
//! Every variant names the parameter that made the computation invalid,
//! so the plot window and the terminal report can show it directly.

use thiserror::Error;

pub type PhysicsResult<T> = Result<T, PhysicsError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("mass {body} must be non-negative, got {value}")]
    NegativeMass { body: &'static str, value: f64 },

    #[error("total mass m1 + m2 is zero; reduced mass is undefined")]
    ZeroTotalMass,

    #[error("reduced mass must be positive, got {0}")]
    NonPositiveReducedMass(f64),

    #[error("potential strength alpha is zero; orbit equations divide by alpha")]
    ZeroPotentialStrength,

    #[error("potential strength alpha = {0} is repulsive; no bound or conic orbit around the origin")]
    RepulsivePotential(f64),

    #[error("angular momentum L_z is zero; the trajectory is a radial line")]
    ZeroAngularMomentum,

    #[error("eccentricity would be complex (1 + 2 E L_z^2 / (mu alpha^2) = {radicand}); raise E or lower L_z")]
    ComplexEccentricity { radicand: f64 },

    #[error("eccentricity must be non-negative, got {0}")]
    NegativeEccentricity(f64),

    #[error("radius must be positive, got r = {0}")]
    NonPositiveRadius(f64),

    #[error("radius r = {0} is outside the allowed region (E < V(r)); no real speed")]
    ForbiddenRadius(f64),

    #[error("radius is undefined at theta = {theta} (beyond the asymptote)")]
    Asymptote { theta: f64 },

    #[error("parameter {name} is not a finite number ({value})")]
    NonFinite { name: &'static str, value: f64 },

    #[error("Kepler equation did not converge after {iterations} iterations (mean anomaly {mean_anomaly})")]
    KeplerNotConverged { iterations: usize, mean_anomaly: f64 },
}

/// Reject NaN and infinities before they leak into a curve
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> PhysicsResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PhysicsError::NonFinite { name, value })
    }
}
