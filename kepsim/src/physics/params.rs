//! Orbital input parameters
//!
//! `OrbitalParameters` is the full set of slider-driven inputs:
//! - the two masses `m1` (fixed at the origin) and `m2` (orbiting),
//! - the angular momentum `lz`,
//! - the potential strength `alpha` (G·m1·m2 for gravity),
//! - the total energy `energy`

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct OrbitalParameters {
    pub m1: f64, // mass of the central body
    pub m2: f64, // mass of the orbiting body
    pub lz: f64, // angular momentum, sign sets the direction of travel
    pub alpha: f64, // potential strength, V(r) = -alpha / r
    #[serde(alias = "E")]
    pub energy: f64, // total energy
}

impl OrbitalParameters {
    pub fn new(m1: f64, m2: f64, lz: f64, alpha: f64, energy: f64) -> Self {
        Self { m1, m2, lz, alpha, energy }
    }

    /// Same parameters with a different total energy
    pub fn with_energy(self, energy: f64) -> Self {
        Self { energy, ..self }
    }
}

impl Default for OrbitalParameters {
    // a mildly eccentric ellipse
    fn default() -> Self {
        Self::new(1.0, 6.0, 2.0, 2.0, -0.4)
    }
}

/// One adjustable entry of [`OrbitalParameters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    M1,
    M2,
    Lz,
    Alpha,
    Energy,
}

impl ParameterKind {
    pub const ALL: [ParameterKind; 5] = [
        ParameterKind::M1,
        ParameterKind::M2,
        ParameterKind::Lz,
        ParameterKind::Alpha,
        ParameterKind::Energy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ParameterKind::M1 => "Mass 1",
            ParameterKind::M2 => "Mass 2",
            ParameterKind::Lz => "Lz",
            ParameterKind::Alpha => "alpha / k",
            ParameterKind::Energy => "E",
        }
    }
}

impl OrbitalParameters {
    pub fn get(&self, kind: ParameterKind) -> f64 {
        match kind {
            ParameterKind::M1 => self.m1,
            ParameterKind::M2 => self.m2,
            ParameterKind::Lz => self.lz,
            ParameterKind::Alpha => self.alpha,
            ParameterKind::Energy => self.energy,
        }
    }

    pub fn set(&mut self, kind: ParameterKind, value: f64) {
        match kind {
            ParameterKind::M1 => self.m1 = value,
            ParameterKind::M2 => self.m2 = value,
            ParameterKind::Lz => self.lz = value,
            ParameterKind::Alpha => self.alpha = value,
            ParameterKind::Energy => self.energy = value,
        }
    }
}

/// Range and step of one parameter slider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub kind: ParameterKind,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Slider {
    /// Move `value` by `steps` increments, snapped to the step grid from
    /// `min` and clamped to the range
    pub fn nudge(&self, value: f64, steps: i32) -> f64 {
        let raw = value + self.step * steps as f64;
        let snapped = self.min + ((raw - self.min) / self.step).round() * self.step;
        snapped.clamp(self.min, self.max)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}
