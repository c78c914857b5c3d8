pub mod physics;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use physics::errors::{PhysicsError, PhysicsResult};
pub use physics::kepler::{
    asymptote_angle, central_potential, eccentricity, effective_potential, potential_minimum,
    radius_at_angle, reduced_mass, semi_latus_rectum, semi_major_axis, turning_points, OrbitKind,
    TurningPoints,
};
pub use physics::orbit::{Orbit, Regime};
pub use physics::params::{OrbitalParameters, ParameterKind, Slider};
pub use physics::propagator::OrbitPropagator;
pub use physics::sampling::{OrbitFigure, Sampling};
pub use physics::scenario::Scenario;
pub use physics::states::{BodyState, NVec2};

pub use configuration::config::{ModeConfig, ScenarioConfig};

pub use visualization::{animate2d::run_animation, plot2d::run_plots, report::orbit_report};

pub use benchmark::benchmark::{bench_figure, bench_propagation};
