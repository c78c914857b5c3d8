//! A validated two-body orbit
//!
//! `Orbit` runs every domain check once, from [`OrbitalParameters`], and
//! caches the derived quantities:
//! - reduced mass `mu` and eccentricity,
//! - semi-latus rectum and semi-major axis,
//! - turning points and conic family.
//!
//! Everything downstream (sampling, the propagator, the windows) works
//! from an `Orbit`, so an invalid parameter set is reported exactly once.

use std::f64::consts::PI;
use std::fmt;

use tracing::debug;

use super::errors::{PhysicsError, PhysicsResult};
use super::kepler::{
    self, asymptote_angle, eccentricity, reduced_mass, semi_latus_rectum, semi_major_axis,
    turning_points, OrbitKind, TurningPoints,
};
use super::params::OrbitalParameters;
use super::propagator::{
    solve_barker, solve_elliptic_anomaly, solve_hyperbolic_anomaly, NEAR_PARABOLIC,
};
use super::states::{BodyState, NVec2};

#[derive(Debug, Clone, PartialEq)]
pub struct Orbit {
    pub params: OrbitalParameters,
    pub mu: f64, // reduced mass
    pub eccentricity: f64,
    pub semi_latus_rectum: f64, // p
    pub semi_major_axis: f64, // a, negative for hyperbolas, +inf for parabolas
    pub turning_points: TurningPoints,
    pub kind: OrbitKind, // exact classification (tolerance 0)
}

/// How time maps to anomaly: which form of Kepler's equation applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Elliptic,
    Parabolic,
    Hyperbolic,
}

impl Orbit {
    pub fn from_parameters(params: &OrbitalParameters) -> PhysicsResult<Self> {
        let mu = reduced_mass(params.m1, params.m2)?;
        let eps = eccentricity(params.energy, params.lz, mu, params.alpha)?;
        let p = semi_latus_rectum(mu, params.lz, params.alpha)?;
        let a = semi_major_axis(params.energy, params.alpha)?;
        let turning_points = turning_points(params.energy, mu, params.lz, params.alpha)?;
        let kind = OrbitKind::classify(eps, 0.0);

        debug!(mu, eps, p, a, ?kind, "orbit built");

        Ok(Self {
            params: *params,
            mu,
            eccentricity: eps,
            semi_latus_rectum: p,
            semi_major_axis: a,
            turning_points,
            kind,
        })
    }

    /// `k = alpha / mu`, the equivalent of G·M for the reduced problem
    pub fn gravitational_parameter(&self) -> f64 {
        self.params.alpha / self.mu
    }

    /// +1 for counter-clockwise travel, -1 for clockwise
    pub fn direction(&self) -> f64 {
        self.params.lz.signum()
    }

    pub fn regime(&self) -> Regime {
        let eps = self.eccentricity;
        if (eps - 1.0).abs() <= NEAR_PARABOLIC {
            Regime::Parabolic
        } else if eps < 1.0 {
            Regime::Elliptic
        } else {
            Regime::Hyperbolic
        }
    }

    /// Conic radius at true anomaly `theta`
    pub fn radius_at(&self, theta: f64) -> PhysicsResult<f64> {
        let p = &self.params;
        kepler::radius_at_angle(theta, self.eccentricity, self.mu, p.lz, p.alpha)
    }

    /// Speed from the energy relation `v = sqrt(2 (E + alpha / r) / mu)`
    pub fn speed_at_radius(&self, r: f64) -> PhysicsResult<f64> {
        let potential = kepler::central_potential(r, self.params.alpha)?;
        let v2 = 2.0 * (self.params.energy - potential) / self.mu;
        if v2 < -kepler::RADICAND_TOLERANCE {
            return Err(PhysicsError::ForbiddenRadius(r));
        }
        Ok(v2.max(0.0).sqrt())
    }

    /// True anomaly of the asymptotes, `None` for closed orbits
    pub fn asymptote_angle(&self) -> Option<f64> {
        asymptote_angle(self.eccentricity)
    }

    /// Mean motion `n = sqrt(k / |a|^3)`; `None` in the parabolic regime
    pub fn mean_motion(&self) -> Option<f64> {
        match self.regime() {
            Regime::Parabolic => None,
            _ => Some(self.kepler_mean_motion()),
        }
    }

    /// Orbital period for bound orbits
    pub fn period(&self) -> Option<f64> {
        match self.regime() {
            Regime::Elliptic => self.mean_motion().map(|n| 2.0 * PI / n),
            _ => None,
        }
    }

    /// Position and velocity at true anomaly `anomaly`
    ///
    /// Radial and transverse speeds are `(alpha / |lz|) eps sin(nu)` and
    /// `(alpha / |lz|) (1 + eps cos(nu))`.
    pub fn state_at_anomaly(&self, anomaly: f64) -> PhysicsResult<BodyState> {
        let r = self.radius_at(anomaly)?;
        let t = self.time_since_periapsis(anomaly)?;

        let dir = self.direction();
        let theta = dir * anomaly;
        let (sin_t, cos_t) = theta.sin_cos();
        let radial = NVec2::new(cos_t, sin_t);
        let transverse = NVec2::new(-sin_t, cos_t);

        let k_over_h = self.params.alpha / self.params.lz.abs();
        let eps = self.eccentricity;
        let v_r = k_over_h * eps * anomaly.sin();
        let v_t = dir * k_over_h * (1.0 + eps * anomaly.cos());

        Ok(BodyState {
            t,
            anomaly,
            theta,
            r,
            x: r * radial,
            v: v_r * radial + v_t * transverse,
        })
    }

    /// Time from periapsis to true anomaly `anomaly` (negative before periapsis)
    ///
    /// Closed orbits wrap the anomaly into (-pi, pi], so the result lies
    /// within half a period of periapsis.
    pub fn time_since_periapsis(&self, anomaly: f64) -> PhysicsResult<f64> {
        let eps = self.eccentricity;
        let k = self.gravitational_parameter();

        match self.regime() {
            Regime::Elliptic => {
                let nu = kepler::wrap_angle(anomaly);
                let half = 0.5 * nu;
                let ecc_anomaly = 2.0 * f64::atan2((1.0 - eps).sqrt() * half.sin(), (1.0 + eps).sqrt() * half.cos());
                let mean_anomaly = ecc_anomaly - eps * ecc_anomaly.sin();
                Ok(mean_anomaly / self.kepler_mean_motion())
            }
            Regime::Parabolic => {
                if anomaly.abs() >= PI {
                    return Err(PhysicsError::Asymptote { theta: anomaly });
                }
                let d = (0.5 * anomaly).tan();
                let p = self.semi_latus_rectum;
                Ok(0.5 * (p.powi(3) / k).sqrt() * (d + d.powi(3) / 3.0))
            }
            Regime::Hyperbolic => {
                let limit = self.asymptote_angle().unwrap_or(PI);
                if anomaly.abs() >= limit {
                    return Err(PhysicsError::Asymptote { theta: anomaly });
                }
                let scale = ((eps - 1.0) / (eps + 1.0)).sqrt();
                let hyp_anomaly = 2.0 * (scale * (0.5 * anomaly).tan()).atanh();
                let mean_anomaly = eps * hyp_anomaly.sinh() - hyp_anomaly;
                Ok(mean_anomaly / self.kepler_mean_motion())
            }
        }
    }

    /// True anomaly reached `t` after periapsis, by Kepler's equation
    pub fn anomaly_at_time(&self, t: f64) -> PhysicsResult<f64> {
        let eps = self.eccentricity;

        match self.regime() {
            Regime::Elliptic => {
                let mean_anomaly = kepler::wrap_angle(self.kepler_mean_motion() * t);
                let e = solve_elliptic_anomaly(mean_anomaly, eps)?;
                let half = 0.5 * e;
                Ok(2.0 * f64::atan2((1.0 + eps).sqrt() * half.sin(), (1.0 - eps).sqrt() * half.cos()))
            }
            Regime::Parabolic => {
                let p = self.semi_latus_rectum;
                let barker = 2.0 * t * (self.gravitational_parameter() / p.powi(3)).sqrt();
                Ok(2.0 * solve_barker(barker).atan())
            }
            Regime::Hyperbolic => {
                let mean_anomaly = self.kepler_mean_motion() * t;
                let h = solve_hyperbolic_anomaly(mean_anomaly, eps)?;
                let scale = ((eps + 1.0) / (eps - 1.0)).sqrt();
                Ok(2.0 * (scale * (0.5 * h).tanh()).atan())
            }
        }
    }

    pub fn state_at_time(&self, t: f64) -> PhysicsResult<BodyState> {
        let anomaly = self.anomaly_at_time(t)?;
        let mut state = self.state_at_anomaly(anomaly)?;
        state.t = t;
        Ok(state)
    }

    // n from |a|; meaningless in the parabolic regime where |a| blows up
    fn kepler_mean_motion(&self) -> f64 {
        (self.gravitational_parameter() / self.semi_major_axis.abs().powi(3)).sqrt()
    }
}

impl fmt::Display for Orbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (eps = {:.4}, p = {:.4}, r_min = {:.4}, r_max = {:.4})",
            self.kind,
            self.eccentricity,
            self.semi_latus_rectum,
            self.turning_points.r_min,
            self.turning_points.r_max
        )
    }
}
