use std::time::Instant;

use crate::physics::errors::PhysicsResult;
use crate::physics::orbit::Orbit;
use crate::physics::params::OrbitalParameters;
use crate::physics::propagator::OrbitPropagator;
use crate::physics::sampling::{OrbitFigure, Sampling};

/// One bound, one parabolic and one unbound orbit sharing m1, m2, Lz, alpha
fn bench_orbits() -> [(&'static str, OrbitalParameters); 3] {
    let base = OrbitalParameters::new(1.0, 6.0, 2.0, 2.0, -0.4);
    [
        ("ellipse", base),
        ("parabola", base.with_energy(0.0)),
        ("hyperbola", base.with_energy(0.8)),
    ]
}

/// Time a full figure rebuild (what every slider change costs) for a
/// range of grid sizes
pub fn bench_figure() -> PhysicsResult<()> {
    let ns = [250, 500, 1000, 2000, 4000, 8000];
    let reps = 20;

    for (name, params) in bench_orbits() {
        for n in ns {
            let sampling = Sampling {
                angle_samples: n,
                radial_samples: n,
                ..Sampling::default()
            };

            // Warm up
            OrbitFigure::build(&params, &sampling)?;

            let t0 = Instant::now();
            for _ in 0..reps {
                OrbitFigure::build(&params, &sampling)?;
            }
            let ms = t0.elapsed().as_secs_f64() * 1000.0 / reps as f64;

            println!("{name:9} n = {n:5}, figure rebuild = {ms:8.4} ms");
        }
    }
    Ok(())
}

/// Time Kepler-equation propagation per animation frame
pub fn bench_propagation() -> PhysicsResult<()> {
    let frames = 100_000;
    let dt = 1.0 / 60.0;

    for (name, params) in bench_orbits() {
        let orbit = Orbit::from_parameters(&params)?;
        let mut propagator = OrbitPropagator::new(orbit, 20.0)?;

        let t0 = Instant::now();
        for _ in 0..frames {
            propagator.advance(dt)?;
        }
        let us = t0.elapsed().as_secs_f64() * 1.0e6 / frames as f64;

        println!("{name:9} propagation = {us:8.4} us/frame");
    }
    Ok(())
}
