//! Tensile test simulation engine

mod engine;
mod phase;
mod state;

pub use engine::{advance_strain, compute_stress_and_phase, default_increment, DEFAULT_STEPS_TO_RUPTURE};
pub use phase::Phase;
pub use state::{SimulationPoint, SimulationState};
