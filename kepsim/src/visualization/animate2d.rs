//! Animated two-body orbit
//!
//! The body follows Kepler's equation in time (fast at periapsis, slow at
//! apoapsis), leaves a trail behind it and carries its velocity vector.
//! `Space` pauses bevy's virtual clock.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::physics::errors::PhysicsResult;
use crate::physics::orbit::Orbit;
use crate::physics::propagator::OrbitPropagator;
use crate::physics::sampling::{sample_orbit, OrbitSample};
use crate::physics::scenario::Scenario;
use crate::physics::states::NVec2;
use crate::visualization::chart::{speed_to_color, ChartBounds, ChartFrame};

const VIEW_SIZE: f32 = 760.0;
const BODY_RADIUS: f32 = 7.0;
const CENTER_RADIUS: f32 = 9.0;

/// Pre-sampled orbit path and the screen mapping for this run
#[derive(Resource)]
struct OrbitView {
    frame: ChartFrame,
    path: Vec<Vec<OrbitSample>>,
    speed_range: (f64, f64),
}

#[derive(Resource, Default)]
struct Trail(VecDeque<NVec2>);

#[derive(Component)]
struct StatusText;

/// Open the animation window; fails before any window appears if the
/// scenario's parameters do not describe a real orbit
pub fn run_animation(scenario: Scenario) -> PhysicsResult<()> {
    let orbit = Orbit::from_parameters(&scenario.parameters)?;
    let propagator = OrbitPropagator::new(orbit.clone(), scenario.view_radius)?;

    let path = sample_orbit(&orbit, &scenario.sampling);
    let speed_range = path
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| (lo.min(s.speed), hi.max(s.speed)));
    let bounds = ChartBounds::for_orbit(&path, orbit.kind.is_closed(), scenario.view_radius);
    let frame = ChartFrame::new(bounds, Vec2::splat(-0.5 * VIEW_SIZE), Vec2::splat(VIEW_SIZE));

    info!("run_animation: starting Bevy 2D viewer for {}", orbit);

    App::new()
        .insert_resource(scenario)
        .insert_resource(propagator)
        .insert_resource(OrbitView { frame, path, speed_range })
        .insert_resource(Trail::default())
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Kepler Orbit Animation".into(),
                resolution: (900.0, 900.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_systems(Startup, setup_animation_system)
        .add_systems(
            Update,
            (pause_system, advance_body_system, draw_orbit_system, status_text_system).chain(),
        )
        .run();

    Ok(())
}

fn setup_animation_system(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());

    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 16.0,
                color: Color::WHITE,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(12.0),
            ..default()
        }),
        StatusText,
    ));
}

fn pause_system(keys: Res<ButtonInput<KeyCode>>, mut time: ResMut<Time<Virtual>>) {
    if keys.just_pressed(KeyCode::Space) {
        if time.is_paused() {
            time.unpause();
        } else {
            time.pause();
        }
    }
}

fn advance_body_system(
    time: Res<Time>,
    scenario: Res<Scenario>,
    mut propagator: ResMut<OrbitPropagator>,
    mut trail: ResMut<Trail>,
) {
    let dt = time.delta_seconds_f64() * scenario.animation.time_scale;
    if dt == 0.0 {
        return;
    }

    match propagator.advance(dt) {
        Ok(restarted) => {
            if restarted {
                trail.0.clear();
            }
            trail.0.push_back(propagator.state.x);
            while trail.0.len() > scenario.animation.trail_length {
                trail.0.pop_front();
            }
        }
        Err(err) => warn!("propagation failed at t = {}: {err}", propagator.time()),
    }
}

fn draw_orbit_system(
    mut gizmos: Gizmos,
    scenario: Res<Scenario>,
    view: Res<OrbitView>,
    propagator: Res<OrbitPropagator>,
    trail: Res<Trail>,
) {
    let frame = &view.frame;
    let (v_lo, v_hi) = view.speed_range;

    for branch in &view.path {
        let points = branch.iter().map(|s| ((s.position.x, s.position.y), speed_to_color(s.speed, v_lo, v_hi)));
        for run in frame.project_runs(points) {
            gizmos.linestrip_gradient_2d(run);
        }
    }

    // fixed mass m1
    gizmos.circle_2d(frame.to_screen(0.0, 0.0), CENTER_RADIUS, Color::WHITE);

    for run in frame.polylines(trail.0.iter().map(|x| (x.x, x.y))) {
        gizmos.linestrip_2d(run, Color::srgb(1.0, 0.85, 0.2));
    }

    let state = &propagator.state;
    let body = frame.to_screen(state.x.x, state.x.y);
    gizmos.circle_2d(body, BODY_RADIUS, Color::srgb(1.0, 0.1, 0.1));

    let tip = state.x + scenario.animation.velocity_scale * state.v;
    gizmos.arrow_2d(body, frame.to_screen(tip.x, tip.y), Color::srgb(0.2, 0.5, 1.0));
}

fn status_text_system(
    propagator: Res<OrbitPropagator>,
    time: Res<Time<Virtual>>,
    mut query: Query<&mut Text, With<StatusText>>,
) {
    let orbit = &propagator.orbit;
    let state = &propagator.state;
    let status = if time.is_paused() { "paused" } else { "running" };

    let value = format!(
        "Orbit of mass 2 ({}, eps = {:.2})\nt = {:.3}  r = {:.3}  |v| = {:.3}\nSpace: pause/resume ({status})",
        orbit.kind,
        orbit.eccentricity,
        state.t,
        state.r,
        state.speed()
    );
    for mut text in &mut query {
        text.sections[0].value = value.clone();
    }
}
