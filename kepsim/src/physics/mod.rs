pub mod errors;
pub mod states;
pub mod params;
pub mod kepler;
pub mod orbit;
pub mod propagator;
pub mod sampling;
pub mod scenario;
