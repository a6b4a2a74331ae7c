//! Lipid species at the four levels of structural detail

use super::category::{LipidCategory, LipidFaBondType, LipidLevel};
use super::class::LipidClass;
use super::error::ConstraintViolation;
use super::fatty_acid::{ChainComposition, FattyAcid};
use serde::{Deserialize, Serialize};

/// Aggregate composition of a species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LipidSpeciesInfo {
    pub level: LipidLevel,
    pub n_carbon: u32,
    pub n_hydroxy: u32,
    pub n_double_bonds: u32,
    pub bond_type: LipidFaBondType,
}

impl LipidSpeciesInfo {
    pub fn new(level: LipidLevel, composition: ChainComposition) -> Result<Self, ConstraintViolation> {
        composition.validate()?;
        Ok(Self {
            level,
            n_carbon: composition.n_carbon,
            n_hydroxy: composition.n_hydroxy,
            n_double_bonds: composition.n_double_bonds,
            bond_type: composition.bond_type,
        })
    }

    /// Sums the chain counts; the strongest ether type present wins
    pub fn aggregate(level: LipidLevel, fatty_acids: &[FattyAcid]) -> Self {
        let bond_type = if fatty_acids
            .iter()
            .any(|fa| fa.bond_type() == LipidFaBondType::EtherPlasmenyl)
        {
            LipidFaBondType::EtherPlasmenyl
        } else if fatty_acids
            .iter()
            .any(|fa| fa.bond_type() == LipidFaBondType::EtherPlasmanyl)
        {
            LipidFaBondType::EtherPlasmanyl
        } else {
            LipidFaBondType::Ester
        };

        Self {
            level,
            n_carbon: fatty_acids.iter().map(FattyAcid::n_carbon).sum(),
            n_hydroxy: fatty_acids.iter().map(FattyAcid::n_hydroxy).sum(),
            n_double_bonds: fatty_acids.iter().map(FattyAcid::n_double_bonds).sum(),
            bond_type,
        }
    }

    /// Same counts reported at another level
    pub fn at_level(&self, level: LipidLevel) -> Self {
        Self { level, ..*self }
    }
}

/// A lipid whose chains are known individually
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subspecies {
    head_group: String,
    class: Option<LipidClass>,
    fatty_acids: Vec<FattyAcid>,
    info: LipidSpeciesInfo,
}

impl Subspecies {
    pub fn head_group(&self) -> &str {
        &self.head_group
    }

    pub fn fatty_acids(&self) -> &[FattyAcid] {
        &self.fatty_acids
    }

    pub fn info(&self) -> &LipidSpeciesInfo {
        &self.info
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level")]
pub enum LipidSpecies {
    Species {
        head_group: String,
        class: Option<LipidClass>,
        /// Absent for names without a resolvable composition such as mediators
        info: Option<LipidSpeciesInfo>,
    },
    Molecular(Subspecies),
    Structural(Subspecies),
    Isomeric(Subspecies),
}

impl LipidSpecies {
    /// Species level lipid; the class is looked up from the head group
    pub fn species(
        head_group: impl Into<String>,
        info: Option<LipidSpeciesInfo>,
    ) -> Result<Self, ConstraintViolation> {
        let head_group = head_group.into();
        if let Some(info) = &info {
            if info.level != LipidLevel::Species {
                return Err(ConstraintViolation::new(format!(
                    "Species level lipid cannot carry {} info",
                    info.level
                )));
            }
        }
        let class = LipidClass::for_head_group(&head_group);
        Ok(LipidSpecies::Species {
            head_group,
            class,
            info,
        })
    }

    /// Subspecies at `level`; every acid must carry exactly that level
    pub fn subspecies(
        level: LipidLevel,
        head_group: impl Into<String>,
        fatty_acids: Vec<FattyAcid>,
    ) -> Result<Self, ConstraintViolation> {
        let head_group = head_group.into();
        if level == LipidLevel::Species {
            return Err(ConstraintViolation::new(
                "Species level lipids do not list individual chains",
            ));
        }
        if fatty_acids.is_empty() {
            return Err(ConstraintViolation::new(format!(
                "{} lipid {} needs at least one chain",
                level, head_group
            )));
        }

        let class = LipidClass::for_head_group(&head_group);
        if let Some(class) = class {
            if fatty_acids.len() > class.max_chains() {
                return Err(ConstraintViolation::new(format!(
                    "{} carries at most {} chains, found {}",
                    class,
                    class.max_chains(),
                    fatty_acids.len()
                )));
            }
        }

        for (index, fa) in fatty_acids.iter().enumerate() {
            if fa.level() != level {
                return Err(ConstraintViolation::new(format!(
                    "{} is a {} chain inside a {} lipid",
                    fa.name(),
                    fa.level(),
                    level
                )));
            }
            if fatty_acids[..index].iter().any(|other| other.name() == fa.name()) {
                return Err(ConstraintViolation::new(format!(
                    "Chain slot {} is assigned twice",
                    fa.name()
                )));
            }
        }

        let info = LipidSpeciesInfo::aggregate(level, &fatty_acids);
        let subspecies = Subspecies {
            head_group,
            class,
            fatty_acids,
            info,
        };
        Ok(match level {
            LipidLevel::MolecularSubspecies => LipidSpecies::Molecular(subspecies),
            LipidLevel::StructuralSubspecies => LipidSpecies::Structural(subspecies),
            _ => LipidSpecies::Isomeric(subspecies),
        })
    }

    fn as_subspecies(&self) -> Option<&Subspecies> {
        match self {
            LipidSpecies::Species { .. } => None,
            LipidSpecies::Molecular(sub)
            | LipidSpecies::Structural(sub)
            | LipidSpecies::Isomeric(sub) => Some(sub),
        }
    }

    pub fn level(&self) -> LipidLevel {
        match self {
            LipidSpecies::Species { .. } => LipidLevel::Species,
            LipidSpecies::Molecular(_) => LipidLevel::MolecularSubspecies,
            LipidSpecies::Structural(_) => LipidLevel::StructuralSubspecies,
            LipidSpecies::Isomeric(_) => LipidLevel::IsomericSubspecies,
        }
    }

    pub fn head_group(&self) -> &str {
        match self {
            LipidSpecies::Species { head_group, .. } => head_group,
            _ => self.as_subspecies().map(Subspecies::head_group).unwrap_or_default(),
        }
    }

    pub fn lipid_class(&self) -> Option<LipidClass> {
        match self {
            LipidSpecies::Species { class, .. } => *class,
            _ => self.as_subspecies().and_then(|sub| sub.class),
        }
    }

    pub fn lipid_category(&self) -> LipidCategory {
        self.lipid_class()
            .map(|class| class.category())
            .unwrap_or(LipidCategory::Undefined)
    }

    /// Aggregate composition, reported at the species' own level
    pub fn info(&self) -> Option<&LipidSpeciesInfo> {
        match self {
            LipidSpecies::Species { info, .. } => info.as_ref(),
            _ => self.as_subspecies().map(Subspecies::info),
        }
    }

    /// Chains in slot order; empty at species level
    pub fn fatty_acids(&self) -> &[FattyAcid] {
        self.as_subspecies()
            .map(Subspecies::fatty_acids)
            .unwrap_or_default()
    }

    pub fn fatty_acid(&self, name: &str) -> Option<&FattyAcid> {
        self.fatty_acids().iter().find(|fa| fa.name() == name)
    }

    /// Head group as rendered: the class abbreviation when normalized
    pub fn display_head_group(&self, normalized: bool) -> &str {
        match (normalized, self.lipid_class()) {
            (true, Some(class)) => class.abbreviation(),
            _ => self.head_group(),
        }
    }

    /// Canonical name at the species' own level
    pub fn lipid_string(&self, normalized: bool) -> String {
        crate::render::format_species(self, self.level(), normalized)
    }
}
