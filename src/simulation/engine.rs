//! Stress-strain computation and state update
//!
//! The curve is piecewise:
//! - Hooke's Law `stress = E * strain` up to the yield strain
//! - Hollomon's power law `stress = K * strain^n` up to the rupture strain
//! - zero stress once the rupture strain is exceeded
//!
//! The two laws are not blended at the yield strain, so the curve may
//! jump there.

use crate::error::{SimError, SimResult};
use crate::materials::Material;

use super::{Phase, SimulationPoint, SimulationState};

/// Increments needed by the default step to cover the full strain range
pub const DEFAULT_STEPS_TO_RUPTURE: usize = 15;

/// Stress (MPa) and phase at a given accumulated strain.
///
/// Inputs are not validated: a zero elastic modulus gives an infinite
/// yield strain and every positive strain is then classified as elastic.
pub fn compute_stress_and_phase(material: &Material, strain: f64) -> (f64, Phase) {
    if strain == 0.0 {
        return (0.0, Phase::Initial);
    }

    let e_mpa = material.elastic_modulus_mpa();
    let yield_strain = material.yield_strength / e_mpa;

    if strain <= yield_strain {
        (e_mpa * strain, Phase::Elastic)
    } else if strain <= material.rupture_strain {
        (material.hardening().stress(strain), Phase::Plastic)
    } else {
        (0.0, Phase::Rupture)
    }
}

/// Strain step that reaches rupture in about fifteen increments
pub fn default_increment(material: &Material) -> f64 {
    material.rupture_strain / DEFAULT_STEPS_TO_RUPTURE as f64
}

/// Apply a strain increment and return the resulting state.
///
/// A ruptured state is returned unchanged. Otherwise the increment and
/// material are validated; on error `state` is left as it was.
pub fn advance_strain(
    material: &Material,
    state: &SimulationState,
    increment: f64,
) -> SimResult<SimulationState> {
    if state.ruptured {
        log::trace!("Specimen '{}' already ruptured, increment ignored", material.id);
        return Ok(state.clone());
    }

    if !increment.is_finite() || increment <= 0.0 {
        return Err(SimError::InvalidInput(format!(
            "strain increment must be finite and greater than 0, got {}",
            increment
        )));
    }
    material.validate()?;

    let new_strain = state.current_strain + increment;
    if !new_strain.is_finite() {
        return Err(SimError::InvalidInput(format!(
            "accumulated strain is not finite ({} + {})",
            state.current_strain, increment
        )));
    }

    let (stress, phase) = compute_stress_and_phase(material, new_strain);
    let ruptured = phase == Phase::Rupture;

    let mut data_points = Vec::with_capacity(state.data_points.len() + 1);
    data_points.extend_from_slice(&state.data_points);
    data_points.push(SimulationPoint {
        strain: new_strain,
        stress,
        phase,
    });

    if ruptured {
        log::info!(
            "Specimen '{}' ruptured at strain {:.4} after {} steps (peak stress {:.2} MPa)",
            material.id,
            new_strain,
            data_points.len(),
            state.max_stress.max(stress)
        );
    }

    Ok(SimulationState {
        current_strain: new_strain,
        current_stress: stress,
        current_phase: phase,
        data_points,
        max_strain: state.max_strain.max(new_strain),
        max_stress: state.max_stress.max(stress),
        ruptured,
    })
}
