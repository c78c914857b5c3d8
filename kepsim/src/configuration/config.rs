//! Configuration types for loading orbit scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`DisplayConfig`]   – which front-end to run and the open-orbit view window
//! - [`OrbitalParameters`] – the starting slider values (m1, m2, Lz, alpha, E)
//! - [`SlidersConfig`]   – range and step of every slider
//! - [`SamplingConfig`]  – angle/radial grid sizes and plotting tolerances
//! - [`AnimationConfig`] – time scale, trail length and velocity arrow scale
//! - `presets`           – named parameter sets to switch between
//!
//! # YAML format
//! Only `parameters` is required; every other section falls back to the
//! defaults shown here:
//!
//! ```yaml
//! display:
//!   mode: "plot"            # plot | animate | report | bench
//!   view_radius: 20.0       # half-width of the window for open orbits
//!
//! parameters:
//!   m1: 1.0
//!   m2: 6.0
//!   lz: 2.0
//!   alpha: 2.0
//!   energy: -0.4
//!
//! sliders:
//!   m1:     { min: 0.1,  max: 350000.0, step: 0.1 }
//!   m2:     { min: 0.1,  max: 10.0,     step: 0.1 }
//!   lz:     { min: 0.1,  max: 50.0,     step: 0.1 }
//!   alpha:  { min: 0.1,  max: 100.0,    step: 0.1 }
//!   energy: { min: -5.0, max: 5.0,      step: 0.1 }
//!
//! sampling:
//!   angle_samples: 1000
//!   radial_samples: 1000
//!   r_start: 0.01
//!   r_end: 30.0
//!   denominator_tolerance: 1.0e-3
//!   parabola_tolerance: 1.0e-2
//!
//! animation:
//!   time_scale: 1.0         # simulated time per real second
//!   trail_length: 400
//!   velocity_scale: 1.0
//!
//! presets:
//!   custom: { m1: 1.0, m2: 6.0, lz: 2.0, alpha: 2.0, energy: -0.4 }
//! ```
//!
//! [`crate::physics::scenario::Scenario::build_scenario`] maps this into
//! the runtime scenario.

use std::collections::BTreeMap;

use anyhow::{ensure, Result};
use clap::ValueEnum;
use serde::Deserialize;

use crate::physics::params::OrbitalParameters;

/// Which front-end the binary runs
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModeConfig {
    #[default]
    Plot, // orbit, potential and energy charts with keyboard sliders
    Animate, // the body moving along its orbit
    Report, // text summary on stdout
    Bench, // timing of the sampling and propagation loops
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: ModeConfig,
    pub view_radius: f64, // open orbits are drawn in [-view_radius, view_radius]^2
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: ModeConfig::Plot,
            view_radius: 20.0,
        }
    }
}

/// Range and step of one slider
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderConfig {
    const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }
}

/// One slider per orbital parameter
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SlidersConfig {
    pub m1: SliderConfig,
    pub m2: SliderConfig,
    pub lz: SliderConfig,
    pub alpha: SliderConfig,
    pub energy: SliderConfig,
}

impl Default for SlidersConfig {
    fn default() -> Self {
        Self {
            m1: SliderConfig::new(0.1, 350000.0, 0.1),
            m2: SliderConfig::new(0.1, 10.0, 0.1),
            lz: SliderConfig::new(0.1, 50.0, 0.1),
            alpha: SliderConfig::new(0.1, 100.0, 0.1),
            energy: SliderConfig::new(-5.0, 5.0, 0.1),
        }
    }
}

/// Grid sizes and plotting tolerances
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SamplingConfig {
    pub angle_samples: usize,
    pub radial_samples: usize,
    pub r_start: f64,
    pub r_end: f64,
    pub denominator_tolerance: f64,
    pub parabola_tolerance: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            angle_samples: 1000,
            radial_samples: 1000,
            r_start: 0.01,
            r_end: 30.0,
            denominator_tolerance: 1.0e-3,
            parabola_tolerance: 1.0e-2,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AnimationConfig {
    pub time_scale: f64, // simulated time units per real second
    pub trail_length: usize, // positions kept behind the body
    pub velocity_scale: f64, // arrow length per unit speed
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            trail_length: 400,
            velocity_scale: 1.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    pub parameters: OrbitalParameters, // starting slider values
    #[serde(default)]
    pub sliders: SlidersConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub presets: BTreeMap<String, OrbitalParameters>,
}

impl ScenarioConfig {
    /// Reject configurations no grid or slider can work with. Physical
    /// validity of the parameters is checked later, by the orbit itself.
    pub fn validate(&self) -> Result<()> {
        let s = &self.sampling;
        ensure!(s.angle_samples >= 2, "sampling.angle_samples must be at least 2, got {}", s.angle_samples);
        ensure!(s.radial_samples >= 2, "sampling.radial_samples must be at least 2, got {}", s.radial_samples);
        ensure!(s.r_start > 0.0, "sampling.r_start must be positive (V_eff diverges at r = 0), got {}", s.r_start);
        ensure!(s.r_end > s.r_start, "sampling.r_end ({}) must exceed r_start ({})", s.r_end, s.r_start);
        ensure!(s.denominator_tolerance >= 0.0, "sampling.denominator_tolerance must be non-negative");
        ensure!(s.parabola_tolerance >= 0.0, "sampling.parabola_tolerance must be non-negative");

        let sliders = [
            ("m1", self.sliders.m1),
            ("m2", self.sliders.m2),
            ("lz", self.sliders.lz),
            ("alpha", self.sliders.alpha),
            ("energy", self.sliders.energy),
        ];
        for (name, slider) in sliders {
            ensure!(slider.min < slider.max, "slider {name}: min ({}) must be below max ({})", slider.min, slider.max);
            ensure!(slider.step > 0.0, "slider {name}: step must be positive, got {}", slider.step);
        }

        ensure!(self.display.view_radius > 0.0, "display.view_radius must be positive");
        ensure!(self.animation.time_scale > 0.0, "animation.time_scale must be positive");
        Ok(())
    }
}
