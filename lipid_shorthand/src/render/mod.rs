//! Canonical shorthand rendering
//!
//! Output follows the Goslin layout: `HEADGROUP FA1/FA2` with `_` between
//! chains at the molecular level. A lipid can be rendered at its own level
//! or any coarser one; asking for more detail than was parsed is an error.

use crate::domain::{FattyAcid, LipidFaBondType, LipidLevel, LipidSpecies, LipidSpeciesInfo};
use crate::logging::codes::{self, Code};
use crate::{log_debug, log_error};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Cannot render {head_group} at {requested}: only {available} detail is known")]
    InsufficientDetail {
        head_group: String,
        requested: LipidLevel,
        available: LipidLevel,
    },
}

impl RenderError {
    pub fn error_code(&self) -> Code {
        match self {
            RenderError::InsufficientDetail { .. } => codes::render::INSUFFICIENT_DETAIL,
        }
    }
}

/// Render with the head group as written in the source name
pub fn render(lipid: &LipidSpecies, level: LipidLevel) -> Result<String, RenderError> {
    render_checked(lipid, level, false)
}

/// Render with the class abbreviation in place of the source head group
pub fn render_normalized(lipid: &LipidSpecies, level: LipidLevel) -> Result<String, RenderError> {
    render_checked(lipid, level, true)
}

fn render_checked(lipid: &LipidSpecies, level: LipidLevel, normalized: bool) -> Result<String, RenderError> {
    if level > lipid.level() {
        let error = RenderError::InsufficientDetail {
            head_group: lipid.head_group().to_string(),
            requested: level,
            available: lipid.level(),
        };
        log_error!(error.error_code(), "Requested level is finer than the parsed name",
            "head_group" => lipid.head_group(),
            "requested" => level,
            "available" => lipid.level()
        );
        return Err(error);
    }

    let text = format_species(lipid, level, normalized);
    log_debug!("Lipid rendered",
        "level" => level.as_str(),
        "text" => text.as_str()
    );
    Ok(text)
}

/// Text at `level`, clamped to the detail the lipid actually carries
pub fn format_species(lipid: &LipidSpecies, level: LipidLevel, normalized: bool) -> String {
    let head_group = lipid.display_head_group(normalized);
    let level = level.min(lipid.level());

    if level == LipidLevel::Species {
        return match lipid.info() {
            Some(info) => format!("{} {}", head_group, format_info(info)),
            None => head_group.to_string(),
        };
    }

    let separator = if level == LipidLevel::MolecularSubspecies { "_" } else { "/" };
    let is_lyso = lipid.lipid_class().is_some_and(|class| class.is_lyso());
    let chains: Vec<String> = lipid
        .fatty_acids()
        .iter()
        // lyso names leave the unoccupied slot implicit
        .filter(|fa| !(is_lyso && fa.is_empty_acyl()))
        .map(|fa| format_fatty_acid(fa, level))
        .collect();

    format!("{} {}", head_group, chains.join(separator))
}

/// `[O-|P-]C:DB[;OH]` for the summed composition
pub fn format_info(info: &LipidSpeciesInfo) -> String {
    format_counts(info.bond_type, info.n_carbon, info.n_double_bonds, "", info.n_hydroxy)
}

/// One chain; double bond positions only at the isomeric level
pub fn format_fatty_acid(fatty_acid: &FattyAcid, level: LipidLevel) -> String {
    let positions = match level {
        LipidLevel::IsomericSubspecies if !fatty_acid.double_bond_positions().is_empty() => {
            let listed: Vec<String> = fatty_acid
                .double_bond_positions()
                .iter()
                .map(ToString::to_string)
                .collect();
            format!("({})", listed.join(","))
        }
        _ => String::new(),
    };

    format_counts(
        fatty_acid.bond_type(),
        fatty_acid.n_carbon(),
        fatty_acid.n_double_bonds(),
        &positions,
        fatty_acid.n_hydroxy(),
    )
}

fn format_counts(
    bond_type: LipidFaBondType,
    n_carbon: u32,
    n_double_bonds: u32,
    positions: &str,
    n_hydroxy: u32,
) -> String {
    let mut text = format!("{}{}:{}{}", bond_type.prefix(), n_carbon, n_double_bonds, positions);
    if n_hydroxy > 0 {
        text.push_str(&format!(";{}", n_hydroxy));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChainComposition, CisTrans, DoubleBondPosition, FattyAcidKind};
    use assert_matches::assert_matches;

    fn isomeric_pg() -> LipidSpecies {
        let fa1 = FattyAcid::new(
            "FA1",
            1,
            ChainComposition::new(16, 0, 0, LipidFaBondType::Ester),
            FattyAcidKind::Isomeric(vec![]),
        )
        .unwrap();
        let fa2 = FattyAcid::new(
            "FA2",
            2,
            ChainComposition::new(18, 0, 2, LipidFaBondType::Ester),
            FattyAcidKind::Isomeric(vec![
                DoubleBondPosition::new(9, CisTrans::Z),
                DoubleBondPosition::new(12, CisTrans::E),
            ]),
        )
        .unwrap();
        LipidSpecies::subspecies(LipidLevel::IsomericSubspecies, "PG", vec![fa1, fa2]).unwrap()
    }

    #[test]
    fn test_every_coarser_level() {
        let lipid = isomeric_pg();
        assert_eq!(
            render(&lipid, LipidLevel::IsomericSubspecies).unwrap(),
            "PG 16:0/18:2(9Z,12E)"
        );
        assert_eq!(render(&lipid, LipidLevel::StructuralSubspecies).unwrap(), "PG 16:0/18:2");
        assert_eq!(render(&lipid, LipidLevel::MolecularSubspecies).unwrap(), "PG 16:0_18:2");
        assert_eq!(render(&lipid, LipidLevel::Species).unwrap(), "PG 34:2");
    }

    #[test]
    fn test_finer_level_is_rejected() {
        let info = LipidSpeciesInfo::new(
            LipidLevel::Species,
            ChainComposition::new(32, 2, 0, LipidFaBondType::Ester),
        )
        .unwrap();
        let lipid = LipidSpecies::species("SM", Some(info)).unwrap();
        assert_eq!(render(&lipid, LipidLevel::Species).unwrap(), "SM 32:0;2");

        let error = render(&lipid, LipidLevel::StructuralSubspecies).unwrap_err();
        assert_matches!(
            error,
            RenderError::InsufficientDetail {
                requested: LipidLevel::StructuralSubspecies,
                available: LipidLevel::Species,
                ..
            }
        );
        assert_eq!(error.error_code(), codes::render::INSUFFICIENT_DETAIL);
    }

    #[test]
    fn test_ether_prefix_and_normalized_head_group() {
        let fa1 = FattyAcid::new(
            "FA1",
            1,
            ChainComposition::new(18, 0, 0, LipidFaBondType::EtherPlasmenyl),
            FattyAcidKind::Structural,
        )
        .unwrap();
        let fa2 = FattyAcid::new(
            "FA2",
            2,
            ChainComposition::new(16, 0, 2, LipidFaBondType::Ester),
            FattyAcidKind::Structural,
        )
        .unwrap();
        let lipid = LipidSpecies::subspecies(LipidLevel::StructuralSubspecies, "PE", vec![fa1, fa2]).unwrap();
        assert_eq!(render(&lipid, LipidLevel::StructuralSubspecies).unwrap(), "PE P-18:0/16:2");
        assert_eq!(render(&lipid, LipidLevel::Species).unwrap(), "PE P-34:2");

        let ester = FattyAcid::new(
            "FA1",
            1,
            ChainComposition::new(12, 0, 1, LipidFaBondType::Ester),
            FattyAcidKind::Structural,
        )
        .unwrap();
        let lipid = LipidSpecies::subspecies(LipidLevel::StructuralSubspecies, "CE", vec![ester]).unwrap();
        assert_eq!(render(&lipid, LipidLevel::StructuralSubspecies).unwrap(), "CE 12:1");
        assert_eq!(
            render_normalized(&lipid, LipidLevel::StructuralSubspecies).unwrap(),
            "ChE 12:1"
        );
    }

    #[test]
    fn test_mediator_is_bare_head_group() {
        let lipid = LipidSpecies::species("12-HETE", None).unwrap();
        assert_eq!(render(&lipid, LipidLevel::Species).unwrap(), "12-HETE");
        assert_eq!(lipid.lipid_string(false), "12-HETE");
    }

    #[test]
    fn test_lyso_slot_stays_implicit() {
        let fa1 = FattyAcid::new(
            "FA1",
            1,
            ChainComposition::new(18, 0, 0, LipidFaBondType::Ester),
            FattyAcidKind::Structural,
        )
        .unwrap();
        let fa2 = FattyAcid::empty("FA2", 2, FattyAcidKind::Structural).unwrap();
        let lipid = LipidSpecies::subspecies(LipidLevel::StructuralSubspecies, "LPE", vec![fa1, fa2]).unwrap();
        assert_eq!(lipid.lipid_string(false), "LPE 18:0");
    }
}
