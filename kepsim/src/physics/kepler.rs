//! Closed-form two-body relations for an inverse-square central potential
//!
//! All functions here are pure and stateless. They work on the reduced
//! one-body problem: a particle of mass `mu` with angular momentum `lz`
//! in the potential `V(r) = -alpha / r`.
//!
//! Every function validates its inputs and returns a [`PhysicsError`]
//! naming the offending parameter instead of producing NaN.

use std::f64::consts::PI;
use std::fmt;

use super::errors::{ensure_finite, PhysicsError, PhysicsResult};

/// Radicands of the eccentricity formula within this distance below zero
/// are rounding noise at the bottom of the potential well and clamp to 0
pub const RADICAND_TOLERANCE: f64 = 1e-12;

/// Conic-section family of an orbit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitKind {
    Circle,
    Ellipse,
    Parabola,
    Hyperbola,
}

impl OrbitKind {
    /// Classify an eccentricity. `tolerance` widens the circle and
    /// parabola bands; with `tolerance = 0` the split is exact
    pub fn classify(eccentricity: f64, tolerance: f64) -> Self {
        if eccentricity <= tolerance {
            OrbitKind::Circle
        } else if (eccentricity - 1.0).abs() <= tolerance {
            OrbitKind::Parabola
        } else if eccentricity < 1.0 {
            OrbitKind::Ellipse
        } else {
            OrbitKind::Hyperbola
        }
    }

    /// Bound orbit (ε < 1)
    pub fn is_closed(self) -> bool {
        matches!(self, OrbitKind::Circle | OrbitKind::Ellipse)
    }
}

impl fmt::Display for OrbitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrbitKind::Circle => "Circle",
            OrbitKind::Ellipse => "Ellipse",
            OrbitKind::Parabola => "Parabola",
            OrbitKind::Hyperbola => "Hyperbola",
        };
        f.write_str(name)
    }
}

/// Radii where the radial velocity vanishes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurningPoints {
    pub r_min: f64, // periapsis
    pub r_max: f64, // apoapsis, +inf for unbound orbits
}

impl TurningPoints {
    pub fn is_bounded(&self) -> bool {
        self.r_max.is_finite()
    }
}

// =========================================================================================
// Input checks shared by the relations below
// =========================================================================================

fn check_reduced_mass(mu: f64) -> PhysicsResult<f64> {
    let mu = ensure_finite("mu", mu)?;
    if mu <= 0.0 {
        return Err(PhysicsError::NonPositiveReducedMass(mu));
    }
    Ok(mu)
}

fn check_alpha_nonzero(alpha: f64) -> PhysicsResult<f64> {
    let alpha = ensure_finite("alpha", alpha)?;
    if alpha == 0.0 {
        return Err(PhysicsError::ZeroPotentialStrength);
    }
    Ok(alpha)
}

fn check_attractive(alpha: f64) -> PhysicsResult<f64> {
    let alpha = check_alpha_nonzero(alpha)?;
    if alpha < 0.0 {
        return Err(PhysicsError::RepulsivePotential(alpha));
    }
    Ok(alpha)
}

fn check_angular_momentum(lz: f64) -> PhysicsResult<f64> {
    let lz = ensure_finite("lz", lz)?;
    if lz == 0.0 {
        return Err(PhysicsError::ZeroAngularMomentum);
    }
    Ok(lz)
}

fn check_radius(r: f64) -> PhysicsResult<f64> {
    let r = ensure_finite("r", r)?;
    if r <= 0.0 {
        return Err(PhysicsError::NonPositiveRadius(r));
    }
    Ok(r)
}

// =========================================================================================
// Core relations
// =========================================================================================

/// Reduced mass `mu = m1 m2 / (m1 + m2)`
///
/// Negative masses are rejected. A zero mass on one side is allowed
/// here (it yields `mu = 0`); relations that need `mu > 0` reject it.
pub fn reduced_mass(m1: f64, m2: f64) -> PhysicsResult<f64> {
    let m1 = ensure_finite("m1", m1)?;
    let m2 = ensure_finite("m2", m2)?;
    if m1 < 0.0 {
        return Err(PhysicsError::NegativeMass { body: "m1", value: m1 });
    }
    if m2 < 0.0 {
        return Err(PhysicsError::NegativeMass { body: "m2", value: m2 });
    }

    let total = m1 + m2;
    if total == 0.0 {
        return Err(PhysicsError::ZeroTotalMass);
    }
    Ok(m1 * m2 / total)
}

/// Central potential `V(r) = -alpha / r`
pub fn central_potential(r: f64, alpha: f64) -> PhysicsResult<f64> {
    let r = check_radius(r)?;
    let alpha = ensure_finite("alpha", alpha)?;
    Ok(-alpha / r)
}

/// Effective potential `V_eff(r) = -alpha / r + lz^2 / (2 mu r^2)`
///
/// Diverges as r -> 0+, so `r <= 0` is an error rather than a sample.
pub fn effective_potential(r: f64, mu: f64, lz: f64, alpha: f64) -> PhysicsResult<f64> {
    let r = check_radius(r)?;
    let mu = check_reduced_mass(mu)?;
    let lz = ensure_finite("lz", lz)?;
    let alpha = ensure_finite("alpha", alpha)?;

    let centrifugal = lz * lz / (2.0 * mu * r * r);
    Ok(-alpha / r + centrifugal)
}

/// Eccentricity `sqrt(1 + 2 E lz^2 / (mu alpha^2))`
///
/// A negative radicand means the energy lies below the bottom of the
/// effective potential well: there is no real orbit, and the error
/// carries the radicand for the message.
pub fn eccentricity(energy: f64, lz: f64, mu: f64, alpha: f64) -> PhysicsResult<f64> {
    let energy = ensure_finite("energy", energy)?;
    let lz = ensure_finite("lz", lz)?;
    let alpha = check_alpha_nonzero(alpha)?;
    let mu = check_reduced_mass(mu)?;

    let radicand = 1.0 + 2.0 * energy * lz * lz / (mu * alpha * alpha);
    if radicand < -RADICAND_TOLERANCE {
        return Err(PhysicsError::ComplexEccentricity { radicand });
    }
    Ok(radicand.max(0.0).sqrt())
}

/// Semi-latus rectum `p = lz^2 / (mu alpha)`, the conic's scale length
pub fn semi_latus_rectum(mu: f64, lz: f64, alpha: f64) -> PhysicsResult<f64> {
    let mu = check_reduced_mass(mu)?;
    let lz = check_angular_momentum(lz)?;
    let alpha = check_attractive(alpha)?;
    Ok(lz * lz / (mu * alpha))
}

/// Semi-major axis `a = -alpha / (2 E)`
///
/// Positive for bound orbits, negative for hyperbolas (the usual sign
/// convention) and `+inf` for the parabolic case `E = 0`.
pub fn semi_major_axis(energy: f64, alpha: f64) -> PhysicsResult<f64> {
    let energy = ensure_finite("energy", energy)?;
    let alpha = check_alpha_nonzero(alpha)?;
    if energy == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(-alpha / (2.0 * energy))
}

/// Bottom of the effective potential well, `(r_c, V_eff(r_c))`
///
/// `r_c = p` is the radius of the circular orbit and `V_eff(r_c) = -alpha / (2 p)`
/// is the lowest energy that still has a real eccentricity.
pub fn potential_minimum(mu: f64, lz: f64, alpha: f64) -> PhysicsResult<(f64, f64)> {
    let p = semi_latus_rectum(mu, lz, alpha)?;
    Ok((p, -alpha / (2.0 * p)))
}

/// Roots of `E = V_eff(r)`
///
/// Multiplying through by r^2 gives `E r^2 + alpha r - lz^2 / (2 mu) = 0`,
/// whose discriminant is `alpha^2 eps^2`. The roots then reduce to
/// `p / (1 + eps)` and `p / (1 - eps)`; the second one is only a positive
/// root for eps < 1, otherwise the orbit is unbounded.
pub fn turning_points(energy: f64, mu: f64, lz: f64, alpha: f64) -> PhysicsResult<TurningPoints> {
    let p = semi_latus_rectum(mu, lz, alpha)?;
    let eps = eccentricity(energy, lz, mu, alpha)?;

    let r_min = p / (1.0 + eps);
    let r_max = if eps < 1.0 { p / (1.0 - eps) } else { f64::INFINITY };
    Ok(TurningPoints { r_min, r_max })
}

/// Conic radius `r(theta) = p / (1 + eps cos theta)`
///
/// The angle is measured from periapsis. Where the denominator is not
/// positive (open orbits past the asymptote) the radius is undefined
/// and [`PhysicsError::Asymptote`] is returned.
pub fn radius_at_angle(theta: f64, eps: f64, mu: f64, lz: f64, alpha: f64) -> PhysicsResult<f64> {
    let theta = ensure_finite("theta", theta)?;
    let eps = ensure_finite("eccentricity", eps)?;
    if eps < 0.0 {
        return Err(PhysicsError::NegativeEccentricity(eps));
    }
    let p = semi_latus_rectum(mu, lz, alpha)?;

    let denom = 1.0 + eps * theta.cos();
    if denom <= 0.0 {
        return Err(PhysicsError::Asymptote { theta });
    }
    Ok(p / denom)
}

/// True anomaly of the asymptotes, `acos(-1 / eps)`, for open orbits
pub fn asymptote_angle(eps: f64) -> Option<f64> {
    if eps < 1.0 {
        return None;
    }
    Some((-1.0 / eps).clamp(-1.0, 1.0).acos())
}

/// Wrap an angle into (-pi, pi]
pub fn wrap_angle(theta: f64) -> f64 {
    let wrapped = (theta + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI { PI } else { wrapped }
}
