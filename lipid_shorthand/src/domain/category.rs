//! Closed enumerations shared by the whole model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lipid categories, following the LIPID MAPS top-level classification
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LipidCategory {
    Undefined,
    /// Fatty acyls
    FA,
    /// Glycerolipids
    GL,
    /// Glycerophospholipids
    GP,
    /// Sphingolipids
    SP,
    /// Sterol lipids
    ST,
    /// Saccharolipids
    SL,
}

impl LipidCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LipidCategory::Undefined => "UNDEFINED",
            LipidCategory::FA => "FA",
            LipidCategory::GL => "GL",
            LipidCategory::GP => "GP",
            LipidCategory::SP => "SP",
            LipidCategory::ST => "ST",
            LipidCategory::SL => "SL",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            LipidCategory::Undefined => "Undefined lipid category",
            LipidCategory::FA => "Fatty acyls",
            LipidCategory::GL => "Glycerolipids",
            LipidCategory::GP => "Glycerophospholipids",
            LipidCategory::SP => "Sphingolipids",
            LipidCategory::ST => "Sterol lipids",
            LipidCategory::SL => "Saccharolipids",
        }
    }
}

impl fmt::Display for LipidCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural detail of a lipid, coarsest first
///
/// The derived ordering is meaningful: a lipid known at one level can be
/// rendered at that level or any level that compares lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LipidLevel {
    Species,
    MolecularSubspecies,
    StructuralSubspecies,
    IsomericSubspecies,
}

impl LipidLevel {
    pub const ALL: [LipidLevel; 4] = [
        LipidLevel::Species,
        LipidLevel::MolecularSubspecies,
        LipidLevel::StructuralSubspecies,
        LipidLevel::IsomericSubspecies,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LipidLevel::Species => "SPECIES",
            LipidLevel::MolecularSubspecies => "MOLECULAR_SUBSPECIES",
            LipidLevel::StructuralSubspecies => "STRUCTURAL_SUBSPECIES",
            LipidLevel::IsomericSubspecies => "ISOMERIC_SUBSPECIES",
        }
    }

    /// Accepts the canonical names plus the short forms used on the command line
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "species" => Some(LipidLevel::Species),
            "molecular" | "molecular_subspecies" => Some(LipidLevel::MolecularSubspecies),
            "structural" | "structural_subspecies" => Some(LipidLevel::StructuralSubspecies),
            "isomeric" | "isomeric_subspecies" => Some(LipidLevel::IsomericSubspecies),
            _ => None,
        }
    }
}

impl fmt::Display for LipidLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a fatty acyl chain is bound to the backbone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LipidFaBondType {
    Ester,
    /// Alkyl ether, written `O-`
    EtherPlasmanyl,
    /// Vinyl ether, written `P-`
    EtherPlasmenyl,
    Undefined,
}

impl LipidFaBondType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LipidFaBondType::Ester => "ESTER",
            LipidFaBondType::EtherPlasmanyl => "ETHER_PLASMANYL",
            LipidFaBondType::EtherPlasmenyl => "ETHER_PLASMENYL",
            LipidFaBondType::Undefined => "UNDEFINED",
        }
    }

    /// Prefix used in shorthand names
    pub fn prefix(&self) -> &'static str {
        match self {
            LipidFaBondType::EtherPlasmanyl => "O-",
            LipidFaBondType::EtherPlasmenyl => "P-",
            LipidFaBondType::Ester | LipidFaBondType::Undefined => "",
        }
    }

    pub fn is_ether(&self) -> bool {
        matches!(
            self,
            LipidFaBondType::EtherPlasmanyl | LipidFaBondType::EtherPlasmenyl
        )
    }
}

impl fmt::Display for LipidFaBondType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LipidLevel::Species < LipidLevel::MolecularSubspecies);
        assert!(LipidLevel::MolecularSubspecies < LipidLevel::StructuralSubspecies);
        assert!(LipidLevel::StructuralSubspecies < LipidLevel::IsomericSubspecies);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(LipidLevel::parse("Structural"), Some(LipidLevel::StructuralSubspecies));
        assert_eq!(
            LipidLevel::parse("ISOMERIC_SUBSPECIES"),
            Some(LipidLevel::IsomericSubspecies)
        );
        assert_eq!(LipidLevel::parse("sum"), None);
    }

    #[test]
    fn test_bond_type_prefix() {
        assert_eq!(LipidFaBondType::EtherPlasmanyl.prefix(), "O-");
        assert_eq!(LipidFaBondType::EtherPlasmenyl.prefix(), "P-");
        assert_eq!(LipidFaBondType::Ester.prefix(), "");
        assert!(!LipidFaBondType::Ester.is_ether());
    }
}
