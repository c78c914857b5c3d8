use approx::assert_relative_eq;
use bevy::color::Color;
use bevy::math::Vec2;

use kepsim::configuration::config::ScenarioConfig;
use kepsim::physics::sampling::{linspace, sample_energy, sample_orbit, sample_potential};
use kepsim::visualization::chart::{speed_to_color, ChartBounds, ChartFrame};
use kepsim::visualization::sliders::SliderPanel;
use kepsim::{
    orbit_report, ModeConfig, Orbit, OrbitFigure, OrbitKind, OrbitalParameters, ParameterKind,
    PhysicsError, Sampling, Scenario, Slider,
};

use std::f64::consts::PI;

const SCENARIO_YAML: &str = r#"
display:
  mode: "animate"
  view_radius: 12.0

parameters: { m1: 1.0, m2: 1.0, lz: 1.0, alpha: 1.0, E: -0.1 }

sampling:
  angle_samples: 400

presets:
  hyperbola: { m1: 1.0, m2: 1.0, lz: 1.0, alpha: 1.0, energy: 0.5 }
  circular:  { m1: 1.0, m2: 1.0, lz: 1.0, alpha: 1.0, energy: -0.25 }
  ellipse:   { m1: 1.0, m2: 1.0, lz: 1.0, alpha: 1.0, energy: -0.1 }
"#;

pub fn unit_params(energy: f64) -> OrbitalParameters {
    OrbitalParameters::new(1.0, 1.0, 1.0, 1.0, energy)
}

pub fn unit_orbit(energy: f64) -> Orbit {
    Orbit::from_parameters(&unit_params(energy)).expect("valid orbit parameters")
}

pub fn test_scenario() -> Scenario {
    let cfg: ScenarioConfig = serde_yaml::from_str(SCENARIO_YAML).expect("scenario yaml parses");
    cfg.validate().expect("scenario yaml is valid");
    Scenario::build_scenario(cfg)
}

// ==================================================================================
// Sampling
// ==================================================================================

#[test]
fn linspace_hits_both_ends() {
    let xs: Vec<f64> = linspace(0.01, 30.0, 1000).collect();
    assert_eq!(xs.len(), 1000);
    assert_eq!(xs[0], 0.01);
    assert_eq!(xs[999], 30.0);
    assert!(xs.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn closed_orbit_is_one_branch_inside_turning_points() {
    let o = unit_orbit(-0.1);
    let sampling = Sampling::default();
    let branches = sample_orbit(&o, &sampling);

    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0].len(), sampling.angle_samples);

    let tp = o.turning_points;
    for s in &branches[0] {
        assert!(s.r >= tp.r_min - 1e-12 && s.r <= tp.r_max + 1e-12, "r = {} outside turning points", s.r);
        assert_relative_eq!(s.position.norm(), s.r, epsilon = 1e-12);
    }
}

#[test]
fn open_orbit_skips_asymptote_and_stitches_branches() {
    let sampling = Sampling::default();
    for energy in [0.0, 0.5, 2.0] {
        let o = unit_orbit(energy);
        let branches = sample_orbit(&o, &sampling);
        assert_eq!(branches.len(), 1, "E = {energy}: expected one continuous arc");

        let arc = &branches[0];
        assert!(arc.len() < sampling.angle_samples);
        for s in arc {
            let denom = 1.0 + o.eccentricity * s.theta.cos();
            assert!(denom > sampling.denominator_tolerance, "E = {energy}: sample at theta = {}", s.theta);
            assert!(s.r > 0.0 && s.r.is_finite());
        }
        // the arc starts past the asymptote and runs through periapsis
        assert!(arc[0].theta > PI, "E = {energy}: arc starts at {}", arc[0].theta);
        assert!(arc[arc.len() - 1].theta < PI);
        assert_eq!(arc.iter().filter(|s| s.theta == 0.0).count(), 1);
    }
}

#[test]
fn potential_grid_never_samples_the_origin() {
    let params = unit_params(-0.1);
    let sampling = Sampling {
        r_start: 0.0,
        radial_samples: 301,
        ..Sampling::default()
    };
    let curve = sample_potential(&params, 0.5, &sampling);

    assert_eq!(curve.len(), 300, "r = 0 must be dropped");
    assert!(curve.iter().all(|s| s.r > 0.0));
    for s in &curve {
        assert_relative_eq!(s.central, -1.0 / s.r, epsilon = 1e-12);
        assert!(s.effective >= -0.25 - 1e-12, "V_eff below its minimum at r = {}", s.r);
    }
}

#[test]
fn energy_breakdown_sums_to_total_energy() {
    let sampling = Sampling::default();
    for energy in [-0.2, -0.1, 0.0, 0.5] {
        let o = unit_orbit(energy);
        let branches = sample_orbit(&o, &sampling);
        let curve = sample_energy(&o, &branches);

        assert!(!curve.is_empty());
        assert!(curve.windows(2).all(|w| w[0].theta <= w[1].theta), "not sorted by angle");
        for s in &curve {
            assert!(s.kinetic >= 0.0);
            assert_relative_eq!(s.total, energy, epsilon = 1e-9);
            assert_relative_eq!(s.kinetic + s.potential, s.total, epsilon = 1e-15);
        }
    }
}

// ==================================================================================
// Figure
// ==================================================================================

#[test]
fn figure_marks_finite_turning_points() {
    let sampling = Sampling::default();

    let ellipse = OrbitFigure::build(&unit_params(-0.1), &sampling).unwrap();
    assert_eq!(ellipse.turning_markers.len(), 2);
    assert_relative_eq!(ellipse.turning_markers[0], 5.0 - 15.0_f64.sqrt(), epsilon = 1e-12);
    assert_eq!(ellipse.energy_level, -0.1);
    assert!(ellipse.speed_range.0 <= ellipse.speed_range.1);

    let hyperbola = OrbitFigure::build(&unit_params(0.5), &sampling).unwrap();
    assert_eq!(hyperbola.turning_markers.len(), 1);
    assert_eq!(hyperbola.label, OrbitKind::Hyperbola);
}

#[test]
fn figure_label_uses_parabola_tolerance() {
    // eps = sqrt(0.9996), just under one
    let figure = OrbitFigure::build(&unit_params(-1e-4), &Sampling::default()).unwrap();
    assert_eq!(figure.orbit.kind, OrbitKind::Ellipse);
    assert_eq!(figure.label, OrbitKind::Parabola);

    let strict = Sampling {
        parabola_tolerance: 0.0,
        ..Sampling::default()
    };
    let figure = OrbitFigure::build(&unit_params(-1e-4), &strict).unwrap();
    assert_eq!(figure.label, OrbitKind::Ellipse);
}

#[test]
fn figure_reports_invalid_parameters() {
    let sampling = Sampling::default();
    assert!(matches!(
        OrbitFigure::build(&unit_params(-1.0), &sampling),
        Err(PhysicsError::ComplexEccentricity { .. })
    ));

    let no_spin = OrbitalParameters::new(1.0, 1.0, 0.0, 1.0, -0.1);
    assert!(matches!(
        OrbitFigure::build(&no_spin, &sampling),
        Err(PhysicsError::ZeroAngularMomentum)
    ));
}

#[test]
fn figure_rebuild_is_deterministic() {
    let sampling = Sampling::default();
    let params = OrbitalParameters::default();
    let a = OrbitFigure::build(&params, &sampling).unwrap();
    let b = OrbitFigure::build(&params, &sampling).unwrap();
    assert_eq!(a.orbit_curve, b.orbit_curve);
    assert_eq!(a.potential_curve, b.potential_curve);
    assert_eq!(a.energy_curve, b.energy_curve);
}

// ==================================================================================
// Charts
// ==================================================================================

#[test]
fn frame_maps_bounds_to_rectangle() {
    let frame = ChartFrame::new(
        ChartBounds::new(0.0, 10.0, -1.0, 1.0),
        Vec2::new(100.0, 50.0),
        Vec2::new(200.0, 100.0),
    );
    assert!(frame.to_screen(0.0, -1.0).abs_diff_eq(Vec2::new(100.0, 50.0), 1e-4));
    assert!(frame.to_screen(10.0, 1.0).abs_diff_eq(Vec2::new(300.0, 150.0), 1e-4));
    assert!(frame.to_screen(5.0, 0.0).abs_diff_eq(Vec2::new(200.0, 100.0), 1e-4));
    assert_eq!(frame.project(11.0, 0.0), None);
    assert_eq!(frame.border()[0], frame.border()[4]);
}

#[test]
fn polylines_split_at_clipped_points() {
    let frame = ChartFrame::new(ChartBounds::new(0.0, 10.0, -1.0, 1.0), Vec2::ZERO, Vec2::new(100.0, 100.0));

    let runs = frame.polylines([(1.0, 0.0), (2.0, 0.0), (20.0, 0.0), (3.0, 0.0), (4.0, 0.0), (5.0, 0.0)]);
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].len(), 2);
    assert_eq!(runs[1].len(), 3);

    // a lone visible point cannot form a line
    let runs = frame.polylines([(1.0, 0.0), (1.0, 5.0), (3.0, 0.0), (4.0, 0.0)]);
    assert_eq!(runs.len(), 1);
}

#[test]
fn potential_window_sits_below_the_well() {
    let sampling = Sampling::default();
    let curve = sample_potential(&unit_params(-0.1), 0.5, &sampling);
    let bounds = ChartBounds::for_potential(&curve, -0.1, sampling.r_end);

    assert_eq!(bounds.x_min, 0.0);
    assert_eq!(bounds.x_max, 30.0);
    assert_eq!(bounds.y_max, 2.0);
    assert_relative_eq!(bounds.y_min, -1.25, epsilon = 1e-3);

    // a high energy level stays visible
    let high = ChartBounds::for_potential(&curve, 4.0, sampling.r_end);
    assert_eq!(high.y_max, 5.0);
}

#[test]
fn orbit_window_fits_closed_and_fixes_open() {
    let sampling = Sampling::default();
    let ellipse = unit_orbit(-0.1);
    let branches = sample_orbit(&ellipse, &sampling);
    let bounds = ChartBounds::for_orbit(&branches, true, 20.0);
    assert!(bounds.x_max > ellipse.turning_points.r_max);
    assert!(bounds.x_max < 20.0);

    let open = ChartBounds::for_orbit(&branches, false, 20.0);
    assert_eq!(open, ChartBounds::square(20.0));
}

#[test]
fn speed_colors_run_blue_to_red() {
    assert_eq!(speed_to_color(1.0, 1.0, 3.0), Color::srgb(0.0, 0.0, 1.0));
    assert_eq!(speed_to_color(3.0, 1.0, 3.0), Color::srgb(1.0, 0.0, 0.0));
    assert_eq!(speed_to_color(9.0, 1.0, 3.0), Color::srgb(1.0, 0.0, 0.0));
    assert_eq!(speed_to_color(2.0, 2.0, 2.0), Color::srgb(1.0, 0.0, 0.0));
}

// ==================================================================================
// Sliders and scenario
// ==================================================================================

#[test]
fn slider_snaps_and_clamps() {
    let slider = Slider { kind: ParameterKind::Energy, min: -5.0, max: 5.0, step: 0.1 };
    assert_relative_eq!(slider.nudge(-0.4, 1), -0.3, epsilon = 1e-12);
    assert_relative_eq!(slider.nudge(-0.4, -10), -1.4, epsilon = 1e-12);
    assert_eq!(slider.nudge(4.95, 10), 5.0);
    assert_eq!(slider.nudge(-5.0, -1), -5.0);
    assert_eq!(slider.clamp(42.0), 5.0);
}

#[test]
fn scenario_reads_yaml_with_defaults() {
    let scenario = test_scenario();
    assert_eq!(scenario.mode, ModeConfig::Animate);
    assert_eq!(scenario.view_radius, 12.0);
    assert_eq!(scenario.parameters, unit_params(-0.1));

    // unspecified sections fall back to defaults
    assert_eq!(scenario.sampling.angle_samples, 400);
    assert_eq!(scenario.sampling.radial_samples, 1000);
    assert_eq!(scenario.animation.trail_length, 400);
    assert_eq!(scenario.sliders.len(), ParameterKind::ALL.len());
    let m1 = scenario.slider(ParameterKind::M1).unwrap();
    assert_eq!((m1.min, m1.max), (0.1, 350000.0));

    let names: Vec<&str> = scenario.presets.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["circular", "ellipse", "hyperbola"]);
}

#[test]
fn shipped_scenarios_load_and_build() {
    for file_name in ["default.yaml", "animate.yaml", "flyby.yaml"] {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
        let text = std::fs::read_to_string(&path).expect("scenario file readable");
        let cfg: ScenarioConfig = serde_yaml::from_str(&text).expect("scenario file parses");
        cfg.validate().expect("scenario file is valid");

        let scenario = Scenario::build_scenario(cfg);
        assert!(
            Orbit::from_parameters(&scenario.parameters).is_ok(),
            "{file_name}: starting parameters are not a real orbit"
        );
        for (name, params) in &scenario.presets {
            assert!(Orbit::from_parameters(params).is_ok(), "{file_name}: preset {name} is invalid");
        }
    }
}

#[test]
fn scenario_requires_parameters() {
    let result: Result<ScenarioConfig, _> = serde_yaml::from_str("display: { mode: plot }\n");
    assert!(result.is_err());
}

#[test]
fn validate_rejects_unusable_grids_and_sliders() {
    let mut cfg: ScenarioConfig = serde_yaml::from_str(SCENARIO_YAML).unwrap();
    cfg.sampling.r_start = 0.0;
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("r_start"), "unexpected message: {err}");

    let mut cfg: ScenarioConfig = serde_yaml::from_str(SCENARIO_YAML).unwrap();
    cfg.sliders.lz.min = 60.0;
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("lz"), "unexpected message: {err}");
}

#[test]
fn scenario_nudge_stops_at_range_end() {
    let mut scenario = test_scenario();
    assert!(scenario.nudge(ParameterKind::Energy, 1));
    assert_relative_eq!(scenario.parameters.energy, 0.0, epsilon = 1e-12);

    scenario.parameters.energy = 5.0;
    assert!(!scenario.nudge(ParameterKind::Energy, 1), "already at max");
}

#[test]
fn presets_apply_by_name() {
    let mut scenario = test_scenario();
    assert!(scenario.apply_preset("circular"));
    assert_eq!(scenario.parameters.energy, -0.25);
    assert!(!scenario.apply_preset("missing"));
    assert_eq!(scenario.parameters.energy, -0.25);
}

#[test]
fn panel_selection_wraps() {
    let mut panel = SliderPanel::default();
    assert_eq!(panel.selected_kind(), ParameterKind::M1);
    panel.select_previous();
    assert_eq!(panel.selected_kind(), ParameterKind::Energy);
    panel.select_next();
    assert_eq!(panel.selected_kind(), ParameterKind::M1);
}

#[test]
fn panel_steps_selected_parameter() {
    let mut scenario = test_scenario();
    let mut panel = SliderPanel::default();
    panel.select_previous(); // energy

    assert!(panel.step_selected(&mut scenario, 1, true));
    assert_relative_eq!(scenario.parameters.energy, 0.9, epsilon = 1e-12);
    assert!(panel.step_selected(&mut scenario, -1, false));
    assert_relative_eq!(scenario.parameters.energy, 0.8, epsilon = 1e-12);
    assert_eq!(scenario.parameters.m1, 1.0, "other sliders untouched");

    let lines = panel.lines(&scenario);
    assert_eq!(lines.len(), 5);
    assert!(lines[4].starts_with('>'));
    assert!(lines[0].starts_with(' '));
}

#[test]
fn panel_cycles_presets_in_name_order() {
    let mut scenario = test_scenario();
    let mut panel = SliderPanel::default();

    let order: Vec<String> = (0..4).filter_map(|_| panel.cycle_preset(&mut scenario)).collect();
    assert_eq!(order, ["circular", "ellipse", "hyperbola", "circular"]);
    assert_eq!(scenario.parameters.energy, -0.25);

    scenario.presets.clear();
    assert_eq!(panel.cycle_preset(&mut scenario), None);
}

// ==================================================================================
// Report
// ==================================================================================

#[test]
fn report_lists_orbit_quantities() {
    let report = orbit_report(&unit_params(-0.1), 1e-2).unwrap();
    assert!(report.contains("Ellipse"));
    assert!(report.contains("r_max (apoapsis)      8.872983"), "{report}");
    assert!(report.contains("reduced mass mu       0.500000"));
    assert!(!report.contains("undefined"));
}

#[test]
fn report_handles_open_orbits() {
    let parabola = orbit_report(&unit_params(0.0), 1e-2).unwrap();
    assert!(parabola.contains("Parabola"));
    assert!(parabola.contains("r_max (apoapsis)      inf"));
    assert!(parabola.contains("unbound"));

    let hyperbola = orbit_report(&unit_params(0.5), 1e-2).unwrap();
    assert!(hyperbola.contains("asymptote angle"));
    assert!(hyperbola.contains("undefined"), "theta = pi lies past the asymptote");
}

#[test]
fn report_fails_on_invalid_parameters() {
    assert!(matches!(
        orbit_report(&unit_params(-1.0), 1e-2),
        Err(PhysicsError::ComplexEccentricity { .. })
    ));
}
