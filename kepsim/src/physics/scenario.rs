//! Build a runtime scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario`
//! holding:
//! - the current orbital parameters (the slider values)
//! - slider ranges and steps
//! - sampling grid and tolerances (`Sampling`)
//! - animation settings
//! - named presets
//!
//! The scenario is inserted into Bevy as a `Resource`; the plot window
//! mutates `parameters` and rebuilds its figure whenever they change.

use bevy::prelude::Resource;
use tracing::info;

use crate::configuration::config::{ModeConfig, ScenarioConfig, SliderConfig};
use crate::physics::params::{OrbitalParameters, ParameterKind, Slider};
use crate::physics::sampling::Sampling;

/// Runtime animation settings
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSettings {
    pub time_scale: f64,
    pub trail_length: usize,
    pub velocity_scale: f64,
}

#[derive(Resource, Debug, Clone)]
pub struct Scenario {
    pub mode: ModeConfig,
    pub view_radius: f64,
    pub parameters: OrbitalParameters,
    pub sliders: Vec<Slider>, // one per ParameterKind, in ParameterKind::ALL order
    pub sampling: Sampling,
    pub animation: AnimationSettings,
    pub presets: Vec<(String, OrbitalParameters)>, // sorted by name
}

fn slider(kind: ParameterKind, cfg: SliderConfig) -> Slider {
    Slider {
        kind,
        min: cfg.min,
        max: cfg.max,
        step: cfg.step,
    }
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        let s_cfg = cfg.sliders;
        let sliders = vec![
            slider(ParameterKind::M1, s_cfg.m1),
            slider(ParameterKind::M2, s_cfg.m2),
            slider(ParameterKind::Lz, s_cfg.lz),
            slider(ParameterKind::Alpha, s_cfg.alpha),
            slider(ParameterKind::Energy, s_cfg.energy),
        ];

        let g_cfg = cfg.sampling;
        let sampling = Sampling {
            angle_samples: g_cfg.angle_samples,
            radial_samples: g_cfg.radial_samples,
            r_start: g_cfg.r_start,
            r_end: g_cfg.r_end,
            denominator_tolerance: g_cfg.denominator_tolerance,
            parabola_tolerance: g_cfg.parabola_tolerance,
        };

        let a_cfg = cfg.animation;
        let animation = AnimationSettings {
            time_scale: a_cfg.time_scale,
            trail_length: a_cfg.trail_length,
            velocity_scale: a_cfg.velocity_scale,
        };

        // BTreeMap iteration is already sorted by name
        let presets: Vec<(String, OrbitalParameters)> = cfg.presets.into_iter().collect();

        Self {
            mode: cfg.display.mode,
            view_radius: cfg.display.view_radius,
            parameters: cfg.parameters,
            sliders,
            sampling,
            animation,
            presets,
        }
    }

    pub fn slider(&self, kind: ParameterKind) -> Option<&Slider> {
        self.sliders.iter().find(|s| s.kind == kind)
    }

    pub fn preset(&self, name: &str) -> Option<&OrbitalParameters> {
        self.presets.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    /// Replace the parameters with a named preset; `false` if no such preset
    pub fn apply_preset(&mut self, name: &str) -> bool {
        match self.preset(name).copied() {
            Some(params) => {
                info!(preset = name, "applying preset");
                self.parameters = params;
                true
            }
            None => false,
        }
    }

    /// Move one parameter by `steps` slider increments; `true` if it changed
    pub fn nudge(&mut self, kind: ParameterKind, steps: i32) -> bool {
        let Some(slider) = self.slider(kind).copied() else {
            return false;
        };
        let old = self.parameters.get(kind);
        let new = slider.nudge(old, steps);
        if new == old {
            return false;
        }
        self.parameters.set(kind, new);
        true
    }
}
