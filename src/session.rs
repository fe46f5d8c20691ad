//! Tensile test session - holds the current state of one test run

use crate::error::{SimError, SimResult};
use crate::materials::Material;
use crate::options::SimulationOptions;
use crate::results::TestReport;
use crate::simulation::{advance_strain, default_increment, SimulationState};

/// A single tensile test on one material
#[derive(Debug, Clone)]
pub struct TensileTest {
    material: Material,
    options: SimulationOptions,
    state: SimulationState,
}

impl TensileTest {
    /// Start a test with default options
    pub fn new(material: Material) -> SimResult<Self> {
        Self::with_options(material, SimulationOptions::default())
    }

    /// Start a test with custom options
    pub fn with_options(material: Material, options: SimulationOptions) -> SimResult<Self> {
        material.validate()?;
        options.validate()?;
        if !material.yields_before_rupture() {
            log::warn!(
                "Material '{}' yields at strain {:.6}, beyond its rupture strain {}; no plastic phase will be recorded",
                material.id,
                material.yield_strain(),
                material.rupture_strain
            );
        }
        Ok(Self {
            material,
            options,
            state: SimulationState::new(),
        })
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    /// Current snapshot
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn is_ruptured(&self) -> bool {
        self.state.ruptured
    }

    /// Increment used by `increment()`
    pub fn step_size(&self) -> f64 {
        self.options
            .increment
            .unwrap_or_else(|| default_increment(&self.material))
    }

    /// Advance by the configured step
    pub fn increment(&mut self) -> SimResult<&SimulationState> {
        self.increment_by(self.step_size())
    }

    /// Advance by an explicit strain increment
    pub fn increment_by(&mut self, increment: f64) -> SimResult<&SimulationState> {
        let next = advance_strain(&self.material, &self.state, increment)?;
        if self.options.log {
            log::debug!(
                "{}: strain={:.5} stress={:.2} MPa phase={:?}",
                self.material.id,
                next.current_strain,
                next.current_stress,
                next.current_phase
            );
        }
        self.state = next;
        Ok(&self.state)
    }

    /// Return to the zeroed initial state
    pub fn reset(&mut self) {
        self.state = SimulationState::new();
    }

    /// Apply the configured step until the specimen ruptures
    pub fn run_to_rupture(&mut self) -> SimResult<&SimulationState> {
        let mut steps = 0;
        while !self.state.ruptured {
            if steps == self.options.max_steps {
                return Err(SimError::StepLimitExceeded(self.options.max_steps));
            }
            self.increment()?;
            steps += 1;
        }
        Ok(&self.state)
    }

    /// Summary of the run so far
    pub fn report(&self) -> TestReport {
        TestReport::from_state(&self.material, &self.state)
    }
}
