//! Keyboard sliders for the plot window
//!
//! `SliderPanel` only tracks which slider is selected and which preset
//! comes next; the values themselves live in the `Scenario`.
//!
//! Keys:
//! - `Tab` / `Shift+Tab`: next / previous slider
//! - arrows: one step up or down, with `Shift` ten steps
//! - `P`: next preset

use bevy::prelude::Resource;

use crate::physics::params::ParameterKind;
use crate::physics::scenario::Scenario;

const COARSE_STEPS: i32 = 10;

#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct SliderPanel {
    pub selected: usize, // index into ParameterKind::ALL
    pub next_preset: usize,
}

impl SliderPanel {
    pub fn selected_kind(&self) -> ParameterKind {
        ParameterKind::ALL[self.selected % ParameterKind::ALL.len()]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % ParameterKind::ALL.len();
    }

    pub fn select_previous(&mut self) {
        let n = ParameterKind::ALL.len();
        self.selected = (self.selected + n - 1) % n;
    }

    /// Step the selected parameter; `true` if the scenario changed
    pub fn step_selected(&self, scenario: &mut Scenario, direction: i32, coarse: bool) -> bool {
        let steps = if coarse { direction * COARSE_STEPS } else { direction };
        scenario.nudge(self.selected_kind(), steps)
    }

    /// Apply the next preset in name order, returning its name
    pub fn cycle_preset(&mut self, scenario: &mut Scenario) -> Option<String> {
        if scenario.presets.is_empty() {
            return None;
        }
        let index = self.next_preset % scenario.presets.len();
        self.next_preset = index + 1;

        let name = scenario.presets[index].0.clone();
        scenario.apply_preset(&name);
        Some(name)
    }

    /// One line per slider, the selected one marked with `>`
    pub fn lines(&self, scenario: &Scenario) -> Vec<String> {
        ParameterKind::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                let marker = if i == self.selected { '>' } else { ' ' };
                let value = scenario.parameters.get(*kind);
                match scenario.slider(*kind) {
                    Some(s) => format!("{marker} {:<10} {value:>10.3}   [{} .. {}, step {}]", kind.label(), s.min, s.max, s.step),
                    None => format!("{marker} {:<10} {value:>10.3}", kind.label()),
                }
            })
            .collect()
    }
}
