//! Material catalog

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Material;
use crate::error::{SimError, SimResult};

/// Read-only collection of materials, kept in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Material>", into = "Vec<Material>")]
pub struct MaterialCatalog {
    materials: Vec<Material>,
    index: HashMap<String, usize>,
}

impl MaterialCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference materials used in the classroom test
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for material in builtin_materials() {
            // Built-in data is valid and unique
            let id = material.id.clone();
            catalog.index.insert(id, catalog.materials.len());
            catalog.materials.push(material);
        }
        catalog
    }

    /// Add a material to the catalog
    pub fn add(&mut self, material: Material) -> SimResult<()> {
        material.validate()?;
        if self.index.contains_key(&material.id) {
            return Err(SimError::DuplicateName(material.id));
        }
        self.index.insert(material.id.clone(), self.materials.len());
        self.materials.push(material);
        Ok(())
    }

    /// Look up a material by id
    pub fn get(&self, id: &str) -> SimResult<&Material> {
        self.index
            .get(id)
            .map(|&i| &self.materials[i])
            .ok_or_else(|| SimError::MaterialNotFound(id.to_string()))
    }

    /// Whether a material with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate over materials in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    /// Material ids in insertion order
    pub fn ids(&self) -> Vec<String> {
        self.materials.iter().map(|m| m.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Parse a JSON array of materials, validating each entry
    pub fn from_json(json: &str) -> SimResult<Self> {
        let materials: Vec<Material> = serde_json::from_str(json)?;
        let catalog = Self::try_from(materials)?;
        log::debug!("Loaded {} materials from JSON", catalog.len());
        Ok(catalog)
    }

    /// Load a JSON catalog file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        log::info!("Reading material catalog from {}", path.as_ref().display());
        Self::from_json(&json)
    }
}

impl TryFrom<Vec<Material>> for MaterialCatalog {
    type Error = SimError;

    fn try_from(materials: Vec<Material>) -> SimResult<Self> {
        let mut catalog = Self::new();
        for material in materials {
            catalog.add(material)?;
        }
        Ok(catalog)
    }
}

impl From<MaterialCatalog> for Vec<Material> {
    fn from(catalog: MaterialCatalog) -> Self {
        catalog.materials
    }
}

fn builtin_materials() -> Vec<Material> {
    vec![
        Material::new("steel1020", 210.0, 350.0, 420.0, 0.15)
            .with_hardening(600.0, 0.18)
            .with_display(
                "Steel 1020",
                "#505050",
                "Low-carbon steel with good formability and weldability.",
            ),
        Material::new("al6061", 70.0, 240.0, 290.0, 0.12)
            .with_hardening(350.0, 0.15)
            .with_display(
                "Aluminum 6061",
                "#C0C0C0",
                "Heat-treatable aluminum alloy with good corrosion resistance.",
            ),
        Material::new("copper", 120.0, 70.0, 220.0, 0.45)
            .with_hardening(320.0, 0.35)
            .with_display(
                "Copper",
                "#B87333",
                "Metal with excellent thermal and electrical conductivity.",
            ),
        Material::new("titanium", 110.0, 830.0, 900.0, 0.10)
            .with_hardening(1200.0, 0.07)
            .with_display(
                "Titanium Ti-6Al-4V",
                "#8A9A9A",
                "Titanium alloy with high specific strength, used in aircraft.",
            ),
        Material::new("abs", 2.3, 45.0, 65.0, 0.05)
            .with_hardening(80.0, 0.06)
            .with_display(
                "ABS Plastic",
                "#F7E67A",
                "Rigid, lightweight thermoplastic used in automotive and electronic parts.",
            ),
    ]
}
