//! Typed lipid model
//!
//! Everything here is built through validating constructors and is
//! immutable afterwards. The class table is the only shared state.

pub mod adduct;
pub mod category;
pub mod class;
pub mod error;
pub mod fatty_acid;
pub mod species;

pub use adduct::{Adduct, Fragment, LipidAdduct};
pub use category::{LipidCategory, LipidFaBondType, LipidLevel};
pub use class::LipidClass;
pub use error::ConstraintViolation;
pub use fatty_acid::{ChainComposition, CisTrans, DoubleBondPosition, FattyAcid, FattyAcidKind};
pub use species::{LipidSpecies, LipidSpeciesInfo, Subspecies};

/// Class lookup by head group text; no match is not an error
pub fn lookup_class(head_group: &str) -> Option<LipidClass> {
    LipidClass::for_head_group(head_group)
}
