//! Result types derived from a finished or in-progress test

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::materials::Material;
use crate::simulation::{Phase, SimulationPoint, SimulationState};

/// Qualitative rating of the peak stress relative to the ultimate strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Performance {
    Low,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl Performance {
    /// Rating for `max_stress / ultimate_strength`
    pub fn from_stress_ratio(ratio: f64) -> Self {
        if ratio >= 0.95 {
            Self::Excellent
        } else if ratio >= 0.8 {
            Self::VeryGood
        } else if ratio >= 0.6 {
            Self::Good
        } else if ratio >= 0.4 {
            Self::Fair
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Performance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary handed to the results view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    pub material_id: String,
    /// Peak stress in MPa
    pub max_stress: f64,
    /// Peak strain (fraction)
    pub max_strain: f64,
    pub ruptured: bool,
    /// Peak strain as a percentage
    pub elongation_percent: f64,
    /// Peak stress over ultimate strength
    pub stress_ratio: f64,
    /// Peak strain over rupture strain
    pub strain_ratio: f64,
    pub performance: Performance,
    /// Whether the material is classed as ductile
    pub ductile: bool,
}

impl TestReport {
    pub fn from_state(material: &Material, state: &SimulationState) -> Self {
        let stress_ratio = state.max_stress / material.ultimate_strength;
        Self {
            material_id: material.id.clone(),
            max_stress: state.max_stress,
            max_strain: state.max_strain,
            ruptured: state.ruptured,
            elongation_percent: state.max_strain * 100.0,
            stress_ratio,
            strain_ratio: state.max_strain / material.rupture_strain,
            performance: Performance::from_stress_ratio(stress_ratio),
            ductile: material.is_ductile(),
        }
    }

    pub fn result_message(&self) -> &'static str {
        if self.ruptured {
            "The material withstood the load up to its rupture limit."
        } else {
            "The test ended before the material ruptured."
        }
    }

    /// Closing sentence for the report
    pub fn conclusion(&self, material_name: &str) -> String {
        if self.ruptured {
            format!(
                "The test showed that {} withstood stress up to approximately {} MPa, elongating {}% before rupture.",
                material_name,
                format_number(self.max_stress, 0),
                format_number(self.elongation_percent, 2)
            )
        } else {
            format!(
                "In this test, {} was subjected to a maximum stress of {} MPa, elongating {}% without rupture.",
                material_name,
                format_number(self.max_stress, 0),
                format_number(self.elongation_percent, 2)
            )
        }
    }

    /// Sentence describing the typical behavior of the material class
    pub fn behavior(&self) -> &'static str {
        if self.ductile {
            "This behavior is typical of ductile materials, where the plastic phase allows large deformation before rupture."
        } else {
            "This behavior is typical of brittle materials, where rupture occurs with little plastic deformation."
        }
    }
}

/// Axis ranges for a stress-strain chart, both starting at zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDomain {
    /// Upper strain bound
    pub max_strain: f64,
    /// Upper stress bound in MPa
    pub max_stress: f64,
}

impl ChartDomain {
    /// Domain fitted to the recorded history with 10% headroom
    pub fn for_history(state: &SimulationState) -> Self {
        Self {
            max_strain: (state.max_strain * 1.1).max(0.01),
            max_stress: (state.max_stress * 1.1).max(10.0),
        }
    }

    /// Domain that also covers the nominal limits of the material,
    /// so the axes do not rescale while a test is running
    pub fn for_session(material: &Material, state: &SimulationState) -> Self {
        Self {
            max_strain: (state.max_strain * 1.2).max(material.rupture_strain * 1.2),
            max_stress: (state.max_stress * 1.2).max(material.ultimate_strength * 1.2),
        }
    }
}

/// Points of one phase, in recording order
pub fn points_in_phase(state: &SimulationState, phase: Phase) -> Vec<SimulationPoint> {
    state
        .data_points
        .iter()
        .filter(|p| p.phase == phase)
        .copied()
        .collect()
}

/// Drawn width of the specimen as a percentage of its original width.
/// Grows linearly with strain up to 110% of the rupture strain and
/// collapses to 10% once broken.
pub fn specimen_width_percent(material: &Material, state: &SimulationState) -> f64 {
    if state.ruptured {
        return 10.0;
    }
    let shown = state.current_strain.min(material.rupture_strain * 1.1);
    100.0 + shown / material.rupture_strain * 100.0
}

/// Fixed-point formatting for readouts
pub fn format_number(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::advance_strain;
    use approx::assert_relative_eq;

    fn steel() -> Material {
        Material::new("steel1020", 210.0, 350.0, 420.0, 0.15).with_hardening(600.0, 0.18)
    }

    #[test]
    fn test_performance_thresholds() {
        assert_eq!(Performance::from_stress_ratio(1.2), Performance::Excellent);
        assert_eq!(Performance::from_stress_ratio(0.95), Performance::Excellent);
        assert_eq!(Performance::from_stress_ratio(0.94), Performance::VeryGood);
        assert_eq!(Performance::from_stress_ratio(0.8), Performance::VeryGood);
        assert_eq!(Performance::from_stress_ratio(0.6), Performance::Good);
        assert_eq!(Performance::from_stress_ratio(0.4), Performance::Fair);
        assert_eq!(Performance::from_stress_ratio(0.39), Performance::Low);
        assert_eq!(Performance::from_stress_ratio(0.0), Performance::Low);
    }

    #[test]
    fn test_report_from_state() {
        let mat = steel();
        let state = advance_strain(&mat, &SimulationState::new(), 0.1).unwrap();
        let report = TestReport::from_state(&mat, &state);

        let peak = 600.0 * 0.1_f64.powf(0.18);
        assert_relative_eq!(report.max_stress, peak, epsilon = 1e-9);
        assert_relative_eq!(report.elongation_percent, 10.0, epsilon = 1e-12);
        assert_relative_eq!(report.stress_ratio, peak / 420.0, epsilon = 1e-12);
        assert_relative_eq!(report.strain_ratio, 0.1 / 0.15, epsilon = 1e-12);
        // 600 * 0.1^0.18 is about 396 MPa, 94% of ultimate
        assert_eq!(report.performance, Performance::VeryGood);
        assert!(!report.ruptured);
        assert_eq!(report.result_message(), "The test ended before the material ruptured.");
        assert!(report.conclusion("Steel 1020").contains("without rupture"));
    }

    #[test]
    fn test_behavior_sentence() {
        let at_limit = Material::new("edge", 100.0, 200.0, 300.0, 0.2);
        let report = TestReport::from_state(&at_limit, &SimulationState::new());
        assert!(!report.ductile);
        assert!(report.behavior().contains("brittle"));

        let above = Material::new("above", 100.0, 200.0, 300.0, 0.21);
        let report = TestReport::from_state(&above, &SimulationState::new());
        assert!(report.ductile);
        assert!(report.behavior().contains("ductile"));
    }

    #[test]
    fn test_empty_report() {
        let report = TestReport::from_state(&steel(), &SimulationState::new());
        assert_eq!(report.performance, Performance::Low);
        assert_eq!(report.elongation_percent, 0.0);
    }

    #[test]
    fn test_chart_domains() {
        let mat = steel();
        let empty = SimulationState::new();
        assert_eq!(
            ChartDomain::for_history(&empty),
            ChartDomain { max_strain: 0.01, max_stress: 10.0 }
        );
        let session = ChartDomain::for_session(&mat, &empty);
        assert_relative_eq!(session.max_strain, 0.18, epsilon = 1e-12);
        assert_relative_eq!(session.max_stress, 504.0, epsilon = 1e-9);

        let state = advance_strain(&mat, &empty, 0.1).unwrap();
        let history = ChartDomain::for_history(&state);
        assert_relative_eq!(history.max_strain, 0.11, epsilon = 1e-12);
        assert_relative_eq!(history.max_stress, state.max_stress * 1.1, epsilon = 1e-9);
    }

    #[test]
    fn test_points_in_phase() {
        let mat = steel();
        let mut state = SimulationState::new();
        for inc in [0.001, 0.05, 0.05, 0.1] {
            state = advance_strain(&mat, &state, inc).unwrap();
        }
        assert_eq!(points_in_phase(&state, Phase::Elastic).len(), 1);
        assert_eq!(points_in_phase(&state, Phase::Plastic).len(), 2);
        assert_eq!(points_in_phase(&state, Phase::Rupture).len(), 1);
        assert!(points_in_phase(&state, Phase::Initial).is_empty());
    }

    #[test]
    fn test_specimen_width() {
        let mat = steel();
        let empty = SimulationState::new();
        assert_relative_eq!(specimen_width_percent(&mat, &empty), 100.0);

        let half = advance_strain(&mat, &empty, 0.075).unwrap();
        assert_relative_eq!(specimen_width_percent(&mat, &half), 150.0, epsilon = 1e-9);

        let broken = advance_strain(&mat, &half, 0.2).unwrap();
        assert_eq!(specimen_width_percent(&mat, &broken), 10.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(12.3456, 2), "12.35");
        assert_eq!(format_number(396.6, 0), "397");
    }
}
