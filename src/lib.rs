//! Tensile Sim - a stress-strain simulator for tensile tests
//!
//! This library simulates pulling a material specimen apart, step by step:
//! - Linear elastic loading (Hooke's Law)
//! - Plastic hardening (Hollomon power law)
//! - Rupture once the rupture strain is exceeded
//!
//! The engine is pure: each strain increment takes the previous
//! [`SimulationState`](simulation::SimulationState) and returns a new one.
//!
//! ## Example
//! ```rust
//! use tensile_sim::prelude::*;
//!
//! let catalog = MaterialCatalog::builtin();
//! let steel = catalog.get("steel1020").unwrap();
//!
//! // Drive the engine directly
//! let state = SimulationState::new();
//! let state = advance_strain(steel, &state, 0.001).unwrap();
//! assert_eq!(state.current_phase, Phase::Elastic);
//!
//! // Or let a session hold the state
//! let mut test = TensileTest::new(steel.clone()).unwrap();
//! test.run_to_rupture().unwrap();
//! let report = test.report();
//! assert!(report.ruptured);
//! ```

pub mod error;
pub mod materials;
pub mod options;
pub mod results;
pub mod session;
pub mod simulation;

// Re-export common types
pub mod prelude {
    pub use crate::error::{SimError, SimResult};
    pub use crate::materials::{Material, MaterialCatalog};
    pub use crate::options::SimulationOptions;
    pub use crate::results::{ChartDomain, Performance, TestReport};
    pub use crate::session::TensileTest;
    pub use crate::simulation::{
        advance_strain, compute_stress_and_phase, default_increment, Phase, SimulationPoint,
        SimulationState,
    };
}

#[cfg(feature = "wasm")]
pub mod wasm;
