//! Fatty acyl chains
//!
//! A [`FattyAcid`] is validated once, at construction, and never mutated.
//! The detail it carries is expressed by [`FattyAcidKind`]: molecular acids
//! have no slot position, structural acids do, and isomeric acids also know
//! where each double bond sits and its geometry.

use super::category::{LipidFaBondType, LipidLevel};
use super::error::ConstraintViolation;
use crate::config::compile_time::resolution::{
    MAX_CARBON_COUNT, MAX_DOUBLE_BOND_POSITIONS, MAX_HYDROXY_COUNT,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Double bond geometry marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CisTrans {
    /// cis
    Z,
    /// trans
    E,
}

impl CisTrans {
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "Z" => Some(CisTrans::Z),
            "E" => Some(CisTrans::E),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CisTrans::Z => "Z",
            CisTrans::E => "E",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoubleBondPosition {
    pub position: u32,
    pub cis_trans: CisTrans,
}

impl DoubleBondPosition {
    pub fn new(position: u32, cis_trans: CisTrans) -> Self {
        Self {
            position,
            cis_trans,
        }
    }
}

impl fmt::Display for DoubleBondPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.position, self.cis_trans.as_str())
    }
}

/// Atom and bond counts of one chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainComposition {
    pub n_carbon: u32,
    pub n_hydroxy: u32,
    pub n_double_bonds: u32,
    pub bond_type: LipidFaBondType,
    /// Long-chain base of a sphingolipid
    pub lcb: bool,
}

impl ChainComposition {
    pub fn new(n_carbon: u32, n_hydroxy: u32, n_double_bonds: u32, bond_type: LipidFaBondType) -> Self {
        Self {
            n_carbon,
            n_hydroxy,
            n_double_bonds,
            bond_type,
            lcb: false,
        }
    }

    pub fn as_lcb(mut self) -> Self {
        self.lcb = true;
        self
    }

    /// The implicit empty acyl written as `0:0`
    pub fn empty() -> Self {
        Self::new(0, 0, 0, LipidFaBondType::Ester)
    }

    pub fn is_empty_acyl(&self) -> bool {
        self.n_carbon == 0 && self.n_hydroxy == 0 && self.n_double_bonds == 0
    }

    /// Checks the count invariants shared by chains and aggregated species
    pub fn validate(&self) -> Result<(), ConstraintViolation> {
        if self.is_empty_acyl() {
            return Ok(());
        }
        if self.n_carbon < 2 {
            return Err(ConstraintViolation::new(format!(
                "Fatty acyl chain must have at least 2 carbons, found {}",
                self.n_carbon
            )));
        }
        if self.n_carbon > MAX_CARBON_COUNT {
            return Err(ConstraintViolation::new(format!(
                "Carbon count {} exceeds limit of {}",
                self.n_carbon, MAX_CARBON_COUNT
            )));
        }
        if self.n_hydroxy > MAX_HYDROXY_COUNT {
            return Err(ConstraintViolation::new(format!(
                "Hydroxyl count {} exceeds limit of {}",
                self.n_hydroxy, MAX_HYDROXY_COUNT
            )));
        }
        if self.n_double_bonds >= self.n_carbon {
            return Err(ConstraintViolation::new(format!(
                "{} double bonds do not fit into a chain of {} carbons",
                self.n_double_bonds, self.n_carbon
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FattyAcidKind {
    Molecular,
    Structural,
    Isomeric(Vec<DoubleBondPosition>),
}

impl FattyAcidKind {
    pub fn level(&self) -> LipidLevel {
        match self {
            FattyAcidKind::Molecular => LipidLevel::MolecularSubspecies,
            FattyAcidKind::Structural => LipidLevel::StructuralSubspecies,
            FattyAcidKind::Isomeric(_) => LipidLevel::IsomericSubspecies,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FattyAcid {
    name: String,
    position: i32,
    composition: ChainComposition,
    kind: FattyAcidKind,
}

impl FattyAcid {
    pub fn new(
        name: impl Into<String>,
        position: i32,
        composition: ChainComposition,
        kind: FattyAcidKind,
    ) -> Result<Self, ConstraintViolation> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConstraintViolation::new("Fatty acyl slot name must not be empty"));
        }
        if position < -1 {
            return Err(ConstraintViolation::new(format!(
                "Fatty acyl position must be -1 (undefined) or a slot index, found {}",
                position
            )));
        }
        match kind {
            FattyAcidKind::Molecular if position != -1 => {
                return Err(ConstraintViolation::new(format!(
                    "Molecular fatty acyl {} cannot carry position {}",
                    name, position
                )));
            }
            FattyAcidKind::Structural | FattyAcidKind::Isomeric(_) if position < 1 => {
                return Err(ConstraintViolation::new(format!(
                    "Structural fatty acyl {} requires a slot position",
                    name
                )));
            }
            _ => {}
        }

        composition.validate()?;

        if let FattyAcidKind::Isomeric(positions) = &kind {
            validate_double_bond_positions(&name, &composition, positions)?;
        }

        Ok(Self {
            name,
            position,
            composition,
            kind,
        })
    }

    /// The implicit `0:0` acyl filling an unoccupied slot
    pub fn empty(
        name: impl Into<String>,
        position: i32,
        kind: FattyAcidKind,
    ) -> Result<Self, ConstraintViolation> {
        Self::new(name, position, ChainComposition::empty(), kind)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn composition(&self) -> &ChainComposition {
        &self.composition
    }

    pub fn kind(&self) -> &FattyAcidKind {
        &self.kind
    }

    pub fn level(&self) -> LipidLevel {
        self.kind.level()
    }

    pub fn n_carbon(&self) -> u32 {
        self.composition.n_carbon
    }

    pub fn n_hydroxy(&self) -> u32 {
        self.composition.n_hydroxy
    }

    pub fn n_double_bonds(&self) -> u32 {
        self.composition.n_double_bonds
    }

    pub fn bond_type(&self) -> LipidFaBondType {
        self.composition.bond_type
    }

    pub fn is_lcb(&self) -> bool {
        self.composition.lcb
    }

    pub fn is_empty_acyl(&self) -> bool {
        self.composition.is_empty_acyl()
    }

    /// Listed double bond positions; empty below the isomeric level
    pub fn double_bond_positions(&self) -> &[DoubleBondPosition] {
        match &self.kind {
            FattyAcidKind::Isomeric(positions) => positions,
            _ => &[],
        }
    }
}

fn validate_double_bond_positions(
    name: &str,
    composition: &ChainComposition,
    positions: &[DoubleBondPosition],
) -> Result<(), ConstraintViolation> {
    if positions.len() > composition.n_double_bonds as usize {
        return Err(ConstraintViolation::new(format!(
            "{} lists {} double bond positions but has only {} double bonds",
            name,
            positions.len(),
            composition.n_double_bonds
        )));
    }
    if positions.len() > MAX_DOUBLE_BOND_POSITIONS {
        return Err(ConstraintViolation::new(format!(
            "{} lists more than {} double bond positions",
            name, MAX_DOUBLE_BOND_POSITIONS
        )));
    }
    for (index, db) in positions.iter().enumerate() {
        if db.position == 0 || db.position >= composition.n_carbon {
            return Err(ConstraintViolation::new(format!(
                "Double bond position {} lies outside chain {} of {} carbons",
                db.position, name, composition.n_carbon
            )));
        }
        if positions[..index].iter().any(|other| other.position == db.position) {
            return Err(ConstraintViolation::new(format!(
                "Double bond position {} is listed twice in {}",
                db.position, name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ester(n_carbon: u32, n_double_bonds: u32) -> ChainComposition {
        ChainComposition::new(n_carbon, 0, n_double_bonds, LipidFaBondType::Ester)
    }

    #[test]
    fn test_structural_acid() {
        let fa = FattyAcid::new("FA1", 1, ester(18, 1), FattyAcidKind::Structural).unwrap();
        assert_eq!(fa.n_carbon(), 18);
        assert_eq!(fa.n_double_bonds(), 1);
        assert_eq!(fa.level(), LipidLevel::StructuralSubspecies);
        assert!(fa.double_bond_positions().is_empty());
    }

    #[test]
    fn test_carbon_lower_bound() {
        assert!(FattyAcid::new("FA1", 1, ester(1, 0), FattyAcidKind::Structural).is_err());
        assert!(FattyAcid::new("FA1", 1, ester(0, 2), FattyAcidKind::Structural).is_err());
        assert!(FattyAcid::new("FA1", 1, ester(2, 0), FattyAcidKind::Structural).is_ok());
    }

    #[test]
    fn test_empty_acyl_is_allowed() {
        let fa = FattyAcid::empty("FA2", 2, FattyAcidKind::Structural).unwrap();
        assert!(fa.is_empty_acyl());
        assert_eq!(fa.n_carbon(), 0);
    }

    #[test]
    fn test_position_constraints() {
        assert!(FattyAcid::new("FA1", -2, ester(16, 0), FattyAcidKind::Molecular).is_err());
        assert!(FattyAcid::new("FA1", 1, ester(16, 0), FattyAcidKind::Molecular).is_err());
        assert!(FattyAcid::new("FA1", -1, ester(16, 0), FattyAcidKind::Structural).is_err());
        assert!(FattyAcid::new("FA1", -1, ester(16, 0), FattyAcidKind::Molecular).is_ok());
    }

    #[test]
    fn test_isomeric_positions_bounded_by_double_bonds() {
        let positions = vec![
            DoubleBondPosition::new(9, CisTrans::Z),
            DoubleBondPosition::new(12, CisTrans::Z),
        ];
        assert!(FattyAcid::new("FA1", 1, ester(18, 1), FattyAcidKind::Isomeric(positions.clone())).is_err());
        let fa = FattyAcid::new("FA1", 1, ester(18, 2), FattyAcidKind::Isomeric(positions)).unwrap();
        assert_eq!(fa.double_bond_positions().len(), 2);
        assert_eq!(fa.double_bond_positions()[1].to_string(), "12Z");
    }

    #[test]
    fn test_isomeric_position_range() {
        let outside = vec![DoubleBondPosition::new(18, CisTrans::E)];
        assert!(FattyAcid::new("FA1", 1, ester(18, 1), FattyAcidKind::Isomeric(outside)).is_err());
        let duplicate = vec![
            DoubleBondPosition::new(9, CisTrans::Z),
            DoubleBondPosition::new(9, CisTrans::E),
        ];
        assert!(FattyAcid::new("FA1", 1, ester(18, 2), FattyAcidKind::Isomeric(duplicate)).is_err());
    }

    #[test]
    fn test_cis_trans_marker() {
        assert_eq!(CisTrans::from_marker("Z"), Some(CisTrans::Z));
        assert_eq!(CisTrans::from_marker("e"), None);
    }
}
