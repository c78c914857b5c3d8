//! Data-space to screen-space mapping for the gizmo charts
//!
//! A [`ChartFrame`] pairs the data window ([`ChartBounds`]) with a screen
//! rectangle. Curves are projected through it and split into runs
//! wherever a point falls outside the window, so clipped pieces are not
//! joined by stray lines.

use bevy::color::Color;
use bevy::math::Vec2;

use crate::physics::sampling::{EnergySample, OrbitSample, PotentialSample};

const ORBIT_PADDING: f64 = 1.1; // closed-orbit window is 10% wider than the orbit
const POTENTIAL_FLOOR_MARGIN: f64 = 1.0; // chart bottom sits this far below min V_eff
const POTENTIAL_CEILING: f64 = 2.0; // chart top, unless E is higher

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ChartBounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self { x_min, x_max, y_min, y_max }
    }

    /// Square window `[-half, half]^2` around the origin
    pub fn square(half: f64) -> Self {
        Self::new(-half, half, -half, half)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    /// Orbit window: fit closed orbits with some padding, use the fixed
    /// view window for open ones (they extend to infinity)
    pub fn for_orbit(branches: &[Vec<OrbitSample>], closed: bool, view_radius: f64) -> Self {
        if !closed {
            return Self::square(view_radius);
        }
        let extent = branches
            .iter()
            .flatten()
            .map(|s| s.position.x.abs().max(s.position.y.abs()))
            .fold(0.0_f64, f64::max);

        if extent > 0.0 {
            Self::square(extent * ORBIT_PADDING)
        } else {
            Self::square(view_radius)
        }
    }

    /// Potential window: `[0, r_end]` by `[min V_eff - 1, max(2, E + 1)]`
    pub fn for_potential(curve: &[PotentialSample], energy: f64, r_end: f64) -> Self {
        let v_min = curve.iter().map(|s| s.effective).fold(f64::INFINITY, f64::min);
        let floor = if v_min.is_finite() { v_min.min(energy) } else { energy };
        let ceiling = POTENTIAL_CEILING.max(energy + 1.0);
        Self::new(0.0, r_end, floor - POTENTIAL_FLOOR_MARGIN, ceiling)
    }

    /// Energy-breakdown window over the sampled angles
    pub fn for_energy(curve: &[EnergySample]) -> Self {
        let (lo, hi) = curve
            .iter()
            .flat_map(|s| [s.kinetic, s.potential, s.total])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let (lo, hi) = if lo.is_finite() && hi.is_finite() { (lo, hi) } else { (-1.0, 1.0) };
        let pad = ((hi - lo) * 0.05).max(1e-3);
        Self::new(0.0, 2.0 * std::f64::consts::PI, lo - pad, hi + pad)
    }
}

/// A chart placed on screen: `origin` is the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub bounds: ChartBounds,
    pub origin: Vec2,
    pub size: Vec2,
}

impl ChartFrame {
    pub fn new(bounds: ChartBounds, origin: Vec2, size: Vec2) -> Self {
        Self { bounds, origin, size }
    }

    /// Linear map from data space to screen space, without clipping
    pub fn to_screen(&self, x: f64, y: f64) -> Vec2 {
        let b = &self.bounds;
        let u = (x - b.x_min) / (b.x_max - b.x_min);
        let v = (y - b.y_min) / (b.y_max - b.y_min);
        self.origin + Vec2::new(u as f32 * self.size.x, v as f32 * self.size.y)
    }

    /// Screen position of a data point, `None` outside the window
    pub fn project(&self, x: f64, y: f64) -> Option<Vec2> {
        if self.bounds.contains(x, y) {
            Some(self.to_screen(x, y))
        } else {
            None
        }
    }

    /// Project a tagged curve and split it into runs of visible points
    pub fn project_runs<T, I>(&self, points: I) -> Vec<Vec<(Vec2, T)>>
    where
        I: IntoIterator<Item = ((f64, f64), T)>,
    {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for ((x, y), tag) in points {
            match self.project(x, y) {
                Some(p) => current.push((p, tag)),
                None => {
                    if current.len() > 1 {
                        runs.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                }
            }
        }
        if current.len() > 1 {
            runs.push(current);
        }
        runs
    }

    /// Untagged version of [`ChartFrame::project_runs`]
    pub fn polylines<I>(&self, points: I) -> Vec<Vec<Vec2>>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        self.project_runs(points.into_iter().map(|p| (p, ())))
            .into_iter()
            .map(|run| run.into_iter().map(|(p, _)| p).collect())
            .collect()
    }

    /// Closed outline of the screen rectangle
    pub fn border(&self) -> [Vec2; 5] {
        let o = self.origin;
        let s = self.size;
        [o, o + Vec2::new(s.x, 0.0), o + s, o + Vec2::new(0.0, s.y), o]
    }
}

/// Blue (slow) to red (fast) gradient
pub fn speed_to_color(speed: f64, min_speed: f64, max_speed: f64) -> Color {
    let span = max_speed - min_speed;
    if span.is_nan() || span <= 0.0 {
        return Color::srgb(1.0, 0.0, 0.0);
    }

    let t = ((speed - min_speed) / span).clamp(0.0, 1.0) as f32;
    Color::srgb(t, 0.0, 1.0 - t)
}
