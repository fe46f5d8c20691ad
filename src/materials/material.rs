//! Material properties

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Plastic exponent used when a material does not provide one
pub const DEFAULT_HARDENING_EXPONENT: f64 = 0.2;

/// Multiplier applied to the ultimate strength when no hardening coefficient is given
pub const DEFAULT_HARDENING_FACTOR: f64 = 1.2;

/// Rupture strain above which a material is classed as ductile
pub const DUCTILE_RUPTURE_STRAIN: f64 = 0.2;

/// Mechanical properties of a tensile specimen material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Unique identifier
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Modulus of elasticity (Young's modulus) in GPa
    pub elastic_modulus: f64,
    /// Yield strength in MPa
    pub yield_strength: f64,
    /// Ultimate strength in MPa
    pub ultimate_strength: f64,
    /// Strain at rupture (fraction, 0.15 = 15%)
    pub rupture_strain: f64,
    /// Hollomon strength coefficient K in MPa
    #[serde(default)]
    pub hardening_coefficient: Option<f64>,
    /// Hollomon strain hardening exponent n
    #[serde(default)]
    pub hardening_exponent: Option<f64>,
    /// Display color (hex)
    #[serde(default)]
    pub color: String,
    /// Short description
    #[serde(default)]
    pub description: String,
}

/// Power-law hardening parameters with defaults resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hardening {
    /// Strength coefficient K in MPa
    pub coefficient: f64,
    /// Strain hardening exponent n
    pub exponent: f64,
}

impl Hardening {
    /// Flow stress `K * strain^n`
    pub fn stress(&self, strain: f64) -> f64 {
        self.coefficient * strain.powf(self.exponent)
    }
}

impl Material {
    /// Create a new material without hardening parameters
    pub fn new(
        id: &str,
        elastic_modulus: f64,
        yield_strength: f64,
        ultimate_strength: f64,
        rupture_strain: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            elastic_modulus,
            yield_strength,
            ultimate_strength,
            rupture_strain,
            hardening_coefficient: None,
            hardening_exponent: None,
            color: String::new(),
            description: String::new(),
        }
    }

    /// Set the Hollomon hardening parameters
    pub fn with_hardening(mut self, coefficient: f64, exponent: f64) -> Self {
        self.hardening_coefficient = Some(coefficient);
        self.hardening_exponent = Some(exponent);
        self
    }

    /// Set display name, color and description
    pub fn with_display(mut self, name: &str, color: &str, description: &str) -> Self {
        self.name = name.to_string();
        self.color = color.to_string();
        self.description = description.to_string();
        self
    }

    /// Elastic modulus converted from GPa to MPa
    pub fn elastic_modulus_mpa(&self) -> f64 {
        self.elastic_modulus * 1000.0
    }

    /// Strain at which the elastic region ends
    pub fn yield_strain(&self) -> f64 {
        self.yield_strength / self.elastic_modulus_mpa()
    }

    /// Hardening parameters, falling back to `1.2 * ultimate_strength` and `n = 0.2`
    pub fn hardening(&self) -> Hardening {
        Hardening {
            coefficient: self
                .hardening_coefficient
                .unwrap_or(self.ultimate_strength * DEFAULT_HARDENING_FACTOR),
            exponent: self.hardening_exponent.unwrap_or(DEFAULT_HARDENING_EXPONENT),
        }
    }

    /// True when the yield strain lies below the rupture strain,
    /// i.e. the specimen can enter the plastic phase before breaking
    pub fn yields_before_rupture(&self) -> bool {
        self.yield_strain() < self.rupture_strain
    }

    /// Ductile materials elongate more than 20% before rupture
    pub fn is_ductile(&self) -> bool {
        self.rupture_strain > DUCTILE_RUPTURE_STRAIN
    }

    /// Check that every mechanical property is usable by the engine
    pub fn validate(&self) -> SimResult<()> {
        if self.id.trim().is_empty() {
            return Err(SimError::InvalidInput("material id must not be empty".to_string()));
        }
        for (label, value) in [
            ("elastic_modulus", self.elastic_modulus),
            ("yield_strength", self.yield_strength),
            ("ultimate_strength", self.ultimate_strength),
            ("rupture_strain", self.rupture_strain),
        ] {
            ensure_positive(&self.id, label, value)?;
        }
        if let Some(k) = self.hardening_coefficient {
            ensure_positive(&self.id, "hardening_coefficient", k)?;
        }
        if let Some(n) = self.hardening_exponent {
            if !n.is_finite() || n < 0.0 {
                return Err(SimError::InvalidInput(format!(
                    "material '{}': hardening_exponent must be finite and non-negative, got {}",
                    self.id, n
                )));
            }
        }
        Ok(())
    }
}

fn ensure_positive(id: &str, label: &str, value: f64) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidInput(format!(
            "material '{}': {} must be finite and greater than 0, got {}",
            id, label, value
        )))
    }
}
