//! Plain-text orbit summary
//!
//! Used by the `report` mode on stdout and, in short form, by the text
//! panels of the bevy windows.

use std::f64::consts::PI;

use crate::physics::errors::PhysicsResult;
use crate::physics::kepler::{potential_minimum, OrbitKind};
use crate::physics::orbit::Orbit;
use crate::physics::params::OrbitalParameters;

fn fmt_len(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.6}")
    } else {
        "inf".to_string()
    }
}

/// Short summary for the window panels
pub fn orbit_summary(orbit: &Orbit, label: OrbitKind) -> String {
    let tp = orbit.turning_points;
    format!(
        "{label}  eps = {:.3}  mu = {:.3}\nr_min = {}  r_max = {}",
        orbit.eccentricity,
        orbit.mu,
        fmt_len(tp.r_min),
        fmt_len(tp.r_max)
    )
}

/// Full multi-line report; fails with the same error the windows would show
pub fn orbit_report(params: &OrbitalParameters, parabola_tolerance: f64) -> PhysicsResult<String> {
    let orbit = Orbit::from_parameters(params)?;
    let label = OrbitKind::classify(orbit.eccentricity, parabola_tolerance);
    let (r_c, v_min) = potential_minimum(orbit.mu, params.lz, params.alpha)?;
    let tp = orbit.turning_points;
    let v_peri = orbit.speed_at_radius(tp.r_min)?;

    let mut lines = vec![
        "Kepler orbit".to_string(),
        format!(
            "  m1 = {}, m2 = {}, Lz = {}, alpha = {}, E = {}",
            params.m1, params.m2, params.lz, params.alpha, params.energy
        ),
        format!("  reduced mass mu       {:.6}", orbit.mu),
        format!("  eccentricity          {:.6}  ({label})", orbit.eccentricity),
        format!("  semi-latus rectum p   {:.6}", orbit.semi_latus_rectum),
        format!("  semi-major axis a     {}", fmt_len(orbit.semi_major_axis)),
        format!("  r_min (periapsis)     {}", fmt_len(tp.r_min)),
        format!("  r_max (apoapsis)      {}", fmt_len(tp.r_max)),
        format!("  V_eff minimum         {v_min:.6} at r = {r_c:.6}"),
        format!("  speed at periapsis    {v_peri:.6}"),
    ];

    match orbit.period() {
        Some(period) => lines.push(format!("  period                {period:.6}")),
        None => lines.push("  period                unbound".to_string()),
    }
    if let Some(asymptote) = orbit.asymptote_angle() {
        lines.push(format!("  asymptote angle       {:.4} rad ({:.2} deg)", asymptote, asymptote.to_degrees()));
    }

    lines.push("  r(theta):".to_string());
    for step in 0..8 {
        let theta = step as f64 * PI / 4.0;
        let r = match orbit.radius_at(theta) {
            Ok(r) => format!("{r:.6}"),
            Err(_) => "undefined".to_string(),
        };
        lines.push(format!("    theta = {:>5.3}  r = {r}", theta));
    }

    Ok(lines.join("\n"))
}
