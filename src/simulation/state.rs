//! Simulation state and recorded points

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

use super::Phase;

/// One sample of the stress-strain history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationPoint {
    /// Accumulated strain (fraction)
    pub strain: f64,
    /// Stress in MPa
    pub stress: f64,
    /// Phase at this strain
    pub phase: Phase,
}

/// Snapshot of a tensile test.
///
/// States are replaced, never modified: the engine borrows the current
/// state and hands back a new one, so any holder of an older snapshot
/// keeps a consistent view of the test up to that point.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationState {
    pub current_strain: f64,
    pub current_stress: f64,
    pub current_phase: Phase,
    /// History in simulation order (append-only)
    pub data_points: Vec<SimulationPoint>,
    /// Largest strain reached
    pub max_strain: f64,
    /// Largest stress reached, kept after rupture
    pub max_stress: f64,
    pub ruptured: bool,
}

impl SimulationState {
    /// Zeroed state at the start of a test run
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently recorded point
    pub fn last_point(&self) -> Option<&SimulationPoint> {
        self.data_points.last()
    }

    /// Number of recorded points
    pub fn steps(&self) -> usize {
        self.data_points.len()
    }

    /// Check a state received from outside the engine before continuing it
    pub fn validate(&self) -> SimResult<()> {
        if !self.current_strain.is_finite() || self.current_strain < 0.0 {
            return Err(SimError::InvalidInput(format!(
                "current_strain must be finite and non-negative, got {}",
                self.current_strain
            )));
        }
        if !self.max_strain.is_finite() || self.max_strain < self.current_strain {
            return Err(SimError::InvalidInput(format!(
                "max_strain {} must be finite and at least current_strain {}",
                self.max_strain, self.current_strain
            )));
        }
        Ok(())
    }
}
