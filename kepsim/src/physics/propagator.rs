//! Time propagation along a fixed Keplerian orbit
//!
//! Solvers for the three forms of Kepler's equation, plus
//! `OrbitPropagator`, the per-frame state the animation advances.
//! - elliptic:   M = E - e sin(E)       (Newton)
//! - hyperbolic: M = e sinh(H) - H      (Newton)
//! - parabolic:  D + D^3 / 3 = B        (Barker, closed form)

use std::f64::consts::PI;

use bevy::prelude::Resource;
use tracing::{debug, trace};

use super::errors::{PhysicsError, PhysicsResult};
use super::orbit::{Orbit, Regime};
use super::states::BodyState;

/// Eccentricities within this band of 1 are propagated with Barker's equation
pub const NEAR_PARABOLIC: f64 = 1e-6;

const KEPLER_TOLERANCE: f64 = 1e-12;
const KEPLER_MAX_ITERATIONS: usize = 100;

/// Fraction of the asymptote angle the open-orbit window may reach when
/// the view radius is larger than the orbit's useful extent
const ASYMPTOTE_FRACTION: f64 = 0.95;

/// Eccentric anomaly E from mean anomaly M (in (-pi, pi]) for e < 1
///
/// Starting from +/-pi for high eccentricities keeps Newton on the convex
/// side of the root, so the iteration cannot overshoot.
pub fn solve_elliptic_anomaly(mean_anomaly: f64, e: f64) -> PhysicsResult<f64> {
    if mean_anomaly == 0.0 {
        return Ok(0.0);
    }

    let mut ecc = if e < 0.8 { mean_anomaly } else { PI.copysign(mean_anomaly) };
    for _ in 0..KEPLER_MAX_ITERATIONS {
        // f(E) = E - e sin(E) - M, f'(E) = 1 - e cos(E)
        let f = ecc - e * ecc.sin() - mean_anomaly;
        let df = 1.0 - e * ecc.cos();
        let step = f / df;
        ecc -= step;
        if step.abs() < KEPLER_TOLERANCE {
            return Ok(ecc);
        }
    }

    Err(PhysicsError::KeplerNotConverged {
        iterations: KEPLER_MAX_ITERATIONS,
        mean_anomaly,
    })
}

/// Hyperbolic anomaly H from mean anomaly M for e > 1
///
/// The guess `asinh(M / (e - 1))` always has f(H0) on the same side as M,
/// and f is convex there, so Newton converges monotonically.
pub fn solve_hyperbolic_anomaly(mean_anomaly: f64, e: f64) -> PhysicsResult<f64> {
    if mean_anomaly == 0.0 {
        return Ok(0.0);
    }

    let mut hyp = (mean_anomaly / (e - 1.0)).asinh();
    for _ in 0..KEPLER_MAX_ITERATIONS {
        // f(H) = e sinh(H) - H - M, f'(H) = e cosh(H) - 1
        let f = e * hyp.sinh() - hyp - mean_anomaly;
        let df = e * hyp.cosh() - 1.0;
        let step = f / df;
        hyp -= step;
        if step.abs() < KEPLER_TOLERANCE * hyp.abs().max(1.0) {
            return Ok(hyp);
        }
    }

    Err(PhysicsError::KeplerNotConverged {
        iterations: KEPLER_MAX_ITERATIONS,
        mean_anomaly,
    })
}

/// D = tan(nu / 2) from Barker's equation `D + D^3 / 3 = B`
///
/// Cardano's root of the depressed cubic; the two cube roots multiply to
/// -1, so the second one is written as `-1 / s`. The root is odd in `b`,
/// so it is solved for `|b|` and the sign restored.
pub fn solve_barker(b: f64) -> f64 {
    let s = (1.5 * b.abs() + (2.25 * b * b + 1.0).sqrt()).cbrt();
    (s - 1.0 / s).copysign(b)
}

/// Bevy resource holding the animated body
///
/// Closed orbits wrap their time modulo the period. Open orbits run over
/// the window `[-t_limit, t_limit]`, the time needed to cross the view
/// radius, and restart from `-t_limit` once they leave it.
#[derive(Resource, Debug, Clone)]
pub struct OrbitPropagator {
    pub orbit: Orbit,
    pub state: BodyState,
    t_limit: f64,
}

impl OrbitPropagator {
    pub fn new(orbit: Orbit, view_radius: f64) -> PhysicsResult<Self> {
        let t_limit = match orbit.period() {
            Some(period) => 0.5 * period,
            None => open_time_limit(&orbit, view_radius)?,
        };
        let t_start = if orbit.period().is_some() { 0.0 } else { -t_limit };
        let state = orbit.state_at_time(t_start)?;

        debug!(t_limit, regime = ?orbit.regime(), "propagator ready");
        Ok(Self { orbit, state, t_limit })
    }

    /// Current time since periapsis
    pub fn time(&self) -> f64 {
        self.state.t
    }

    /// Half-width of the time window (half a period for closed orbits)
    pub fn time_limit(&self) -> f64 {
        self.t_limit
    }

    /// Move the body `dt` forward in time
    ///
    /// Returns `true` when an open orbit restarted from the start of its
    /// window, so callers can drop the trail.
    pub fn advance(&mut self, dt: f64) -> PhysicsResult<bool> {
        let mut t = self.state.t + dt;
        let mut restarted = false;

        match self.orbit.period() {
            Some(period) => {
                // keep t in [-T/2, T/2) so it never grows without bound
                t = (t + 0.5 * period).rem_euclid(period) - 0.5 * period;
            }
            None => {
                if t > self.t_limit {
                    t = -self.t_limit;
                    restarted = true;
                    trace!("open orbit left the view, restarting");
                }
            }
        }

        self.state = self.orbit.state_at_time(t)?;
        Ok(restarted)
    }
}

/// Time to travel from periapsis out to `view_radius` on an open orbit
fn open_time_limit(orbit: &Orbit, view_radius: f64) -> PhysicsResult<f64> {
    let eps = orbit.eccentricity;
    let p = orbit.semi_latus_rectum;
    let max_anomaly = match orbit.regime() {
        Regime::Parabolic => PI,
        _ => orbit.asymptote_angle().unwrap_or(PI),
    } * ASYMPTOTE_FRACTION;

    // r = p / (1 + eps cos(nu))  =>  cos(nu) = (p / r - 1) / eps
    let anomaly = if view_radius > orbit.turning_points.r_min {
        ((p / view_radius - 1.0) / eps).clamp(-1.0, 1.0).acos().min(max_anomaly)
    } else {
        0.5 * max_anomaly
    };

    orbit.time_since_periapsis(anomaly)
}
