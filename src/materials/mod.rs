//! Materials and the catalog they are drawn from

mod catalog;
mod material;

pub use catalog::MaterialCatalog;
pub use material::{
    Hardening, Material, DEFAULT_HARDENING_EXPONENT, DEFAULT_HARDENING_FACTOR, DUCTILE_RUPTURE_STRAIN,
};
