//! State of the orbiting body at one instant
//!
//! Positions and velocities are relative to the fixed mass at the origin,
//! stored as `nalgebra` 2D vectors.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub t: f64, // time since periapsis
    pub anomaly: f64, // true anomaly, angle from periapsis along the direction of travel
    pub theta: f64, // polar angle of the position vector
    pub r: f64, // distance from the origin
    pub x: NVec2, // position
    pub v: NVec2, // velocity
}

impl BodyState {
    pub fn speed(&self) -> f64 {
        self.v.norm()
    }

    /// Radial velocity component, dr/dt
    pub fn radial_velocity(&self) -> f64 {
        self.x.dot(&self.v) / self.r
    }
}
