//! Deformation phases of a tensile test

use std::fmt;

use serde::{Deserialize, Serialize};

/// Phase of the specimen, ordered by increasing strain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No strain applied yet
    Initial,
    /// Linear elastic region (Hooke's Law)
    Elastic,
    /// Power-law hardening region
    Plastic,
    /// Specimen has broken
    Rupture,
}

impl Default for Phase {
    fn default() -> Self {
        Self::Initial
    }
}

impl Phase {
    /// All phases in the order a test passes through them
    pub const ALL: [Phase; 4] = [Phase::Initial, Phase::Elastic, Phase::Plastic, Phase::Rupture];

    /// Hex color used to draw points and indicators for this phase
    pub fn color(&self) -> &'static str {
        match self {
            Phase::Initial => "#888888",
            Phase::Elastic => "#0066CC",
            Phase::Plastic => "#FF9500",
            Phase::Rupture => "#E63946",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Initial => "Initial Phase",
            Phase::Elastic => "Elastic Phase",
            Phase::Plastic => "Plastic Phase",
            Phase::Rupture => "Rupture",
        }
    }

    /// No transition leaves a terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Rupture)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
