//! Sampling the orbit relations onto fixed grids for plotting
//!
//! Each redraw rebuilds an [`OrbitFigure`] from scratch: the orbit shape
//! over an angle grid, the effective potential over a radial grid, and
//! the kinetic/potential energy split along the orbit. Points where a
//! relation is undefined (asymptotes, r <= 0) are dropped individually
//! so one bad sample never fails the whole figure.

use std::f64::consts::PI;

use tracing::debug;

use super::errors::PhysicsResult;
use super::kepler::{central_potential, effective_potential, OrbitKind};
use super::orbit::Orbit;
use super::params::OrbitalParameters;
use super::states::NVec2;

/// Grid sizes and tolerances for one figure
#[derive(Debug, Clone, PartialEq)]
pub struct Sampling {
    pub angle_samples: usize, // points over [0, 2pi]
    pub radial_samples: usize, // points over [r_start, r_end]
    pub r_start: f64, // first radius of the potential grid, > 0
    pub r_end: f64, // last radius of the potential grid
    pub denominator_tolerance: f64, // drop angles with 1 + eps cos(theta) below this
    pub parabola_tolerance: f64, // |eps - 1| band labelled as a parabola
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            angle_samples: 1000,
            radial_samples: 1000,
            r_start: 0.01,
            r_end: 30.0,
            denominator_tolerance: 1e-3,
            parabola_tolerance: 1e-2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSample {
    pub theta: f64, // angle from periapsis
    pub r: f64,
    pub position: NVec2,
    pub speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotentialSample {
    pub r: f64,
    pub effective: f64, // V_eff(r)
    pub central: f64, // -alpha / r
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergySample {
    pub theta: f64,
    pub kinetic: f64, // T
    pub potential: f64, // U = -alpha / r
    pub total: f64, // T + U
}

/// `n` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n > 1 { (end - start) / (n - 1) as f64 } else { 0.0 };
    (0..n).map(move |i| if i + 1 == n && n > 1 { end } else { start + step * i as f64 })
}

/// Orbit shape as a list of continuous branches
///
/// Closed orbits give one branch over the full circle. Open orbits lose
/// the angles around the asymptote; the piece after it is joined onto the
/// piece before periapsis so the curve reads as one arc.
pub fn sample_orbit(orbit: &Orbit, sampling: &Sampling) -> Vec<Vec<OrbitSample>> {
    let eps = orbit.eccentricity;
    let mut branches: Vec<Vec<OrbitSample>> = Vec::new();
    let mut current: Vec<OrbitSample> = Vec::new();

    for theta in linspace(0.0, 2.0 * PI, sampling.angle_samples) {
        let denom = 1.0 + eps * theta.cos();
        let sample = if denom > sampling.denominator_tolerance {
            orbit.radius_at(theta).ok().and_then(|r| {
                let speed = orbit.speed_at_radius(r).ok()?;
                Some(OrbitSample {
                    theta,
                    r,
                    position: NVec2::new(r * theta.cos(), r * theta.sin()),
                    speed,
                })
            })
        } else {
            None
        };

        match sample {
            Some(s) => current.push(s),
            None if !current.is_empty() => branches.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        branches.push(current);
    }

    // theta = 2pi and theta = 0 are the same point: stitch the last branch
    // in front of the first one
    if branches.len() > 1 {
        let starts_at_zero = branches[0].first().map_or(false, |s| s.theta == 0.0);
        let ends_at_full_turn = branches
            .last()
            .and_then(|b| b.last())
            .map_or(false, |s| s.theta == 2.0 * PI);
        if starts_at_zero && ends_at_full_turn {
            let mut tail = branches.pop().unwrap_or_default();
            tail.pop(); // duplicate of theta = 0
            tail.extend(branches.remove(0));
            branches.insert(0, tail);
        }
    }

    branches
}

/// Effective and central potential over the radial grid, skipping r <= 0
pub fn sample_potential(params: &OrbitalParameters, mu: f64, sampling: &Sampling) -> Vec<PotentialSample> {
    linspace(sampling.r_start, sampling.r_end, sampling.radial_samples)
        .filter_map(|r| {
            let effective = effective_potential(r, mu, params.lz, params.alpha).ok()?;
            let central = central_potential(r, params.alpha).ok()?;
            Some(PotentialSample { r, effective, central })
        })
        .collect()
}

/// Kinetic and potential energy at each orbit sample
///
/// Uses `theta_dot = lz / (mu r^2)` and `r_dot = dr/dtheta * theta_dot`
/// with `dr/dtheta = p eps sin(theta) / (1 + eps cos(theta))^2`.
pub fn sample_energy(orbit: &Orbit, branches: &[Vec<OrbitSample>]) -> Vec<EnergySample> {
    let mu = orbit.mu;
    let lz = orbit.params.lz;
    let alpha = orbit.params.alpha;
    let eps = orbit.eccentricity;
    let p = orbit.semi_latus_rectum;

    let mut samples: Vec<EnergySample> = branches
        .iter()
        .flatten()
        .map(|s| {
            let denom = 1.0 + eps * s.theta.cos();
            let dr_dtheta = p * eps * s.theta.sin() / (denom * denom);
            let theta_dot = lz / (mu * s.r * s.r);
            let r_dot = dr_dtheta * theta_dot;

            let kinetic = 0.5 * mu * (r_dot * r_dot + s.r * s.r * theta_dot * theta_dot);
            let potential = -alpha / s.r;
            EnergySample {
                theta: s.theta,
                kinetic,
                potential,
                total: kinetic + potential,
            }
        })
        .collect();

    samples.sort_by(|a, b| a.theta.total_cmp(&b.theta));
    samples
}

/// Everything one redraw needs, recomputed from the current parameters
#[derive(Debug, Clone)]
pub struct OrbitFigure {
    pub orbit: Orbit,
    pub label: OrbitKind, // classification with the display tolerance
    pub orbit_curve: Vec<Vec<OrbitSample>>,
    pub potential_curve: Vec<PotentialSample>,
    pub energy_curve: Vec<EnergySample>,
    pub energy_level: f64, // horizontal line on the potential chart
    pub turning_markers: Vec<f64>, // finite turning radii
    pub speed_range: (f64, f64),
}

impl OrbitFigure {
    pub fn build(params: &OrbitalParameters, sampling: &Sampling) -> PhysicsResult<Self> {
        let orbit = Orbit::from_parameters(params)?;
        let label = OrbitKind::classify(orbit.eccentricity, sampling.parabola_tolerance);

        let orbit_curve = sample_orbit(&orbit, sampling);
        let potential_curve = sample_potential(params, orbit.mu, sampling);
        let energy_curve = sample_energy(&orbit, &orbit_curve);

        let tp = orbit.turning_points;
        let turning_markers: Vec<f64> = [tp.r_min, tp.r_max]
            .into_iter()
            .filter(|r| r.is_finite())
            .collect();

        let speed_range = orbit_curve
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| (lo.min(s.speed), hi.max(s.speed)));

        debug!(
            orbit_points = orbit_curve.iter().map(Vec::len).sum::<usize>(),
            potential_points = potential_curve.len(),
            "figure rebuilt"
        );

        Ok(Self {
            energy_level: params.energy,
            orbit,
            label,
            orbit_curve,
            potential_curve,
            energy_curve,
            turning_markers,
            speed_range,
        })
    }
}
