//! Interactive chart window
//!
//! Three gizmo charts side by side (orbit shape, effective potential,
//! energy breakdown) driven by the keyboard sliders. Any change to the
//! scenario rebuilds the whole figure.

use bevy::prelude::*;

use crate::physics::sampling::{EnergySample, OrbitFigure};
use crate::physics::scenario::Scenario;
use crate::visualization::chart::{speed_to_color, ChartBounds, ChartFrame};
use crate::visualization::report::orbit_summary;
use crate::visualization::sliders::SliderPanel;

const CHART_SIZE: f32 = 440.0;
const CHART_GAP: f32 = 60.0;
const CHART_BOTTOM: f32 = -370.0;
const TITLE_OFFSET: f32 = 18.0;

const ORBIT_CHART: usize = 0;
const POTENTIAL_CHART: usize = 1;
const ENERGY_CHART: usize = 2;

/// Latest figure; on an invalid parameter set the error is shown and the
/// last valid figure stays on screen
#[derive(Resource, Default)]
struct PlotState {
    figure: Option<OrbitFigure>,
    error: Option<String>,
}

#[derive(Component)]
struct PanelText;

/// Bottom-left corner of chart `i` (0 = orbit, 1 = potential, 2 = energy)
fn chart_origin(i: usize) -> Vec2 {
    let total = 3.0 * CHART_SIZE + 2.0 * CHART_GAP;
    Vec2::new(-0.5 * total + i as f32 * (CHART_SIZE + CHART_GAP), CHART_BOTTOM)
}

fn chart_frame(i: usize, bounds: ChartBounds) -> ChartFrame {
    ChartFrame::new(bounds, chart_origin(i), Vec2::splat(CHART_SIZE))
}

pub fn run_plots(scenario: Scenario) {
    info!("run_plots: starting Bevy chart viewer with {:?}", scenario.parameters);

    App::new()
        .insert_resource(scenario)
        .insert_resource(SliderPanel::default())
        .insert_resource(PlotState::default())
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Kepler Orbit Simulator".into(),
                resolution: (1600.0, 900.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_systems(Startup, setup_plot_system)
        .add_systems(
            Update,
            (slider_input_system, rebuild_figure_system, draw_charts_system, panel_text_system).chain(),
        )
        .run();
}

fn setup_plot_system(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());

    let style = TextStyle {
        font_size: 18.0,
        color: Color::WHITE,
        ..default()
    };

    for (i, title) in ["Orbit", "Effective Potential", "Energy Breakdown vs. theta"].into_iter().enumerate() {
        let top_center = chart_origin(i) + Vec2::new(0.5 * CHART_SIZE, CHART_SIZE + TITLE_OFFSET);
        commands.spawn(Text2dBundle {
            text: Text::from_section(title, style.clone()),
            transform: Transform::from_xyz(top_center.x, top_center.y, 0.0),
            ..default()
        });
    }

    commands.spawn((
        TextBundle::from_section("", TextStyle { font_size: 16.0, ..style }).with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(12.0),
            ..default()
        }),
        PanelText,
    ));
}

fn slider_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut scenario: ResMut<Scenario>,
    mut panel: ResMut<SliderPanel>,
) {
    let shift = keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);

    if keys.just_pressed(KeyCode::Tab) {
        if shift {
            panel.select_previous();
        } else {
            panel.select_next();
        }
    }

    let direction = if keys.any_just_pressed([KeyCode::ArrowUp, KeyCode::ArrowRight]) {
        1
    } else if keys.any_just_pressed([KeyCode::ArrowDown, KeyCode::ArrowLeft]) {
        -1
    } else {
        0
    };
    // only touch the scenario on a key press so change detection stays quiet
    if direction != 0 {
        panel.step_selected(&mut scenario, direction, shift);
    }

    if keys.just_pressed(KeyCode::KeyP) {
        if let Some(name) = panel.cycle_preset(&mut scenario) {
            info!("preset: {name}");
        }
    }
}

fn rebuild_figure_system(scenario: Res<Scenario>, mut state: ResMut<PlotState>) {
    if !scenario.is_changed() {
        return;
    }

    match OrbitFigure::build(&scenario.parameters, &scenario.sampling) {
        Ok(figure) => {
            state.figure = Some(figure);
            state.error = None;
        }
        Err(err) => {
            warn!("invalid orbit: {err}");
            state.error = Some(err.to_string());
        }
    }
}

fn draw_charts_system(mut gizmos: Gizmos, scenario: Res<Scenario>, state: Res<PlotState>) {
    let frame_color = Color::srgb(0.5, 0.5, 0.5);
    let Some(figure) = &state.figure else {
        for i in [ORBIT_CHART, POTENTIAL_CHART, ENERGY_CHART] {
            gizmos.linestrip_2d(chart_frame(i, ChartBounds::square(1.0)).border(), frame_color);
        }
        return;
    };

    // ---------------------------------------------------------------------------------
    // orbit shape, coloured by speed
    let closed = figure.orbit.kind.is_closed();
    let orbit_frame = chart_frame(ORBIT_CHART, ChartBounds::for_orbit(&figure.orbit_curve, closed, scenario.view_radius));
    gizmos.linestrip_2d(orbit_frame.border(), frame_color);
    draw_axes(&mut gizmos, &orbit_frame);

    let (v_lo, v_hi) = figure.speed_range;
    for branch in &figure.orbit_curve {
        let points = branch.iter().map(|s| ((s.position.x, s.position.y), speed_to_color(s.speed, v_lo, v_hi)));
        for run in orbit_frame.project_runs(points) {
            gizmos.linestrip_gradient_2d(run);
        }
    }
    // fixed mass m1 at the focus
    if let Some(center) = orbit_frame.project(0.0, 0.0) {
        gizmos.circle_2d(center, 5.0, Color::WHITE);
    }

    // ---------------------------------------------------------------------------------
    // effective potential with the energy line and turning points
    let potential_frame = chart_frame(
        POTENTIAL_CHART,
        ChartBounds::for_potential(&figure.potential_curve, figure.energy_level, scenario.sampling.r_end),
    );
    gizmos.linestrip_2d(potential_frame.border(), frame_color);
    draw_axes(&mut gizmos, &potential_frame);

    let effective = figure.potential_curve.iter().map(|s| (s.r, s.effective));
    for run in potential_frame.polylines(effective) {
        gizmos.linestrip_2d(run, Color::srgb(0.2, 0.6, 1.0));
    }
    let central = figure.potential_curve.iter().map(|s| (s.r, s.central));
    for run in potential_frame.polylines(central) {
        gizmos.linestrip_2d(run, Color::srgb(1.0, 0.6, 0.1));
    }

    let energy_line = [
        (scenario.sampling.r_start, figure.energy_level),
        (scenario.sampling.r_end, figure.energy_level),
    ];
    for run in potential_frame.polylines(energy_line) {
        gizmos.linestrip_2d(run, Color::srgb(1.0, 0.1, 0.1));
    }

    let marker_colors = [Color::srgb(0.1, 0.9, 0.1), Color::srgb(0.9, 0.1, 0.9)];
    for (r, color) in figure.turning_markers.iter().zip(marker_colors) {
        if let Some(p) = potential_frame.project(*r, figure.energy_level) {
            gizmos.circle_2d(p, 5.0, color);
        }
    }

    // ---------------------------------------------------------------------------------
    // kinetic / potential / total energy along the orbit
    let energy_frame = chart_frame(ENERGY_CHART, ChartBounds::for_energy(&figure.energy_curve));
    gizmos.linestrip_2d(energy_frame.border(), frame_color);
    draw_axes(&mut gizmos, &energy_frame);

    let series: [(fn(&EnergySample) -> f64, Color); 3] = [
        (|s| s.kinetic, Color::srgb(0.2, 0.6, 1.0)),
        (|s| s.potential, Color::srgb(1.0, 0.6, 0.1)),
        (|s| s.total, Color::srgb(0.1, 0.9, 0.1)),
    ];
    for (value, color) in series {
        let points = figure.energy_curve.iter().map(|s| (s.theta, value(s)));
        for run in energy_frame.polylines(points) {
            gizmos.linestrip_2d(run, color);
        }
    }
}

/// Zero lines of a chart, where they fall inside its window
fn draw_axes(gizmos: &mut Gizmos, frame: &ChartFrame) {
    let b = frame.bounds;
    let axis_color = Color::srgb(0.3, 0.3, 0.3);
    if b.y_min <= 0.0 && b.y_max >= 0.0 {
        gizmos.line_2d(frame.to_screen(b.x_min, 0.0), frame.to_screen(b.x_max, 0.0), axis_color);
    }
    if b.x_min <= 0.0 && b.x_max >= 0.0 {
        gizmos.line_2d(frame.to_screen(0.0, b.y_min), frame.to_screen(0.0, b.y_max), axis_color);
    }
}

fn panel_text_system(
    scenario: Res<Scenario>,
    panel: Res<SliderPanel>,
    state: Res<PlotState>,
    mut query: Query<&mut Text, With<PanelText>>,
) {
    if !(scenario.is_changed() || panel.is_changed() || state.is_changed()) {
        return;
    }

    let mut lines = panel.lines(&scenario);
    lines.push(String::new());
    match (&state.error, &state.figure) {
        (Some(err), _) => lines.push(format!("Invalid orbit: {err}")),
        (None, Some(figure)) => lines.push(orbit_summary(&figure.orbit, figure.label)),
        (None, None) => {}
    }
    lines.push("Tab: select   arrows: step (Shift x10)   P: preset".to_string());

    for mut text in &mut query {
        text.sections[0].value = lines.join("\n");
    }
}
