//! Species builder and level reconciliation
//!
//! Turns resolved chains plus the head group into one of the four lipid
//! levels. Promotion to the isomeric level is all or nothing.

use super::error::{ResolutionError, ResolutionResult};
use super::fatty_acid::{resolve_chain, ResolvedChain};
use crate::domain::{
    ConstraintViolation, FattyAcid, FattyAcidKind, LipidCategory, LipidClass, LipidLevel, LipidSpecies,
    LipidSpeciesInfo,
};
use crate::grammar::ast::nodes::{ChainList, HeadGroupNode};
use crate::grammar::dialect::DialectRules;
use crate::log_debug;

pub const LCB_SLOT: &str = "LCB";

/// Slot name of the n-th acyl chain, counting from 1
pub fn acyl_slot(index: usize) -> String {
    format!("FA{}", index)
}

pub fn build_species(
    head_group: &HeadGroupNode,
    class: Option<LipidClass>,
    chains: Option<&ChainList>,
    rules: &DialectRules,
) -> ResolutionResult<LipidSpecies> {
    let Some(chains) = chains else {
        return match class {
            Some(class) if class.allows_no_chains() => Ok(LipidSpecies::species(&head_group.text, None)?),
            _ => Err(ResolutionError::malformed_tree(
                &format!("head group '{}' needs at least one chain", head_group.text),
                head_group.span,
            )),
        };
    };

    let mut resolved = chains
        .chains()
        .iter()
        .map(|chain| resolve_chain(chain, rules))
        .collect::<ResolutionResult<Vec<_>>>()?;

    let is_lyso = class.is_some_and(|c| c.is_lyso());
    let is_sphingolipid = class.is_some_and(|c| c.category() == LipidCategory::SP);

    match chains {
        ChainList::Single(_) => {
            let chain = resolved.pop().ok_or_else(|| {
                ResolutionError::malformed_tree("chain list without chains", head_group.span)
            })?;
            build_single_chain(&head_group.text, class, chain)
        }
        ChainList::Unsorted(_) => {
            if is_lyso {
                return Err(ResolutionError::malformed_tree(
                    &format!("lyso lipid '{}' cannot use the '_' separator", head_group.text),
                    head_group.span,
                ));
            }
            let fatty_acids = place_chains(resolved, is_sphingolipid, LipidLevel::MolecularSubspecies)?;
            Ok(LipidSpecies::subspecies(
                LipidLevel::MolecularSubspecies,
                &head_group.text,
                fatty_acids,
            )?)
        }
        ChainList::Sorted(_) => {
            let level = if resolved.iter().all(ResolvedChain::is_isomeric_capable) {
                LipidLevel::IsomericSubspecies
            } else {
                LipidLevel::StructuralSubspecies
            };
            log_debug!("Sorted chains reconciled",
                "head_group" => head_group.text.as_str(),
                "level" => level.as_str()
            );
            let fatty_acids = place_chains(resolved, is_sphingolipid, level)?;
            Ok(LipidSpecies::subspecies(level, &head_group.text, fatty_acids)?)
        }
    }
}

/// Lyso and sterol ester classes keep the chain; everything else sums it
///
/// A kept single chain is always structural, even when its double bonds
/// carry full cis/trans geometry.
fn build_single_chain(
    head_group: &str,
    class: Option<LipidClass>,
    chain: ResolvedChain,
) -> ResolutionResult<LipidSpecies> {
    let level = LipidLevel::StructuralSubspecies;
    match class {
        Some(class) if class.is_lyso() => {
            if chain.composition.is_empty_acyl() {
                return Err(ConstraintViolation::new(format!(
                    "lyso lipid '{}' needs a chain other than 0:0",
                    head_group
                ))
                .into());
            }
            let fatty_acids = vec![
                chain.into_fatty_acid(&acyl_slot(1), 1, level)?,
                FattyAcid::empty(acyl_slot(2), 2, FattyAcidKind::Structural)?,
            ];
            Ok(LipidSpecies::subspecies(level, head_group, fatty_acids)?)
        }
        Some(class) if class.is_sterol_ester() => {
            let fatty_acids = vec![chain.into_fatty_acid(&acyl_slot(1), 1, level)?];
            Ok(LipidSpecies::subspecies(level, head_group, fatty_acids)?)
        }
        _ => {
            let info = LipidSpeciesInfo::new(LipidLevel::Species, chain.composition)?;
            Ok(LipidSpecies::species(head_group, Some(info))?)
        }
    }
}

/// Assign slot names and positions; a sphingolipid's first chain is its LCB
fn place_chains(
    chains: Vec<ResolvedChain>,
    is_sphingolipid: bool,
    level: LipidLevel,
) -> ResolutionResult<Vec<FattyAcid>> {
    let mut fatty_acids = Vec::with_capacity(chains.len());
    for (index, chain) in chains.into_iter().enumerate() {
        let position = match level {
            LipidLevel::MolecularSubspecies => -1,
            _ => index as i32 + 1,
        };
        let fatty_acid = match (is_sphingolipid, index) {
            (true, 0) => chain.as_lcb().into_fatty_acid(LCB_SLOT, position, level)?,
            (true, _) => chain.into_fatty_acid(&acyl_slot(index), position, level)?,
            (false, _) => chain.into_fatty_acid(&acyl_slot(index + 1), position, level)?,
        };
        fatty_acids.push(fatty_acid);
    }
    Ok(fatty_acids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LipidFaBondType;
    use crate::grammar::ast::nodes::LipidTree;
    use crate::grammar::dialect::Dialect;
    use crate::syntax::parse_lipid_name;
    use assert_matches::assert_matches;

    fn build(dialect: Dialect, name: &str) -> ResolutionResult<LipidSpecies> {
        let tree = parse_lipid_name(name, dialect).unwrap();
        let LipidTree::Lipid(node) = tree else {
            panic!("{} parsed as mediator", name);
        };
        let class = LipidClass::for_head_group(&node.head_group.text);
        build_species(&node.head_group, class, node.chains.as_ref(), dialect.rules())
    }

    #[test]
    fn test_sterol_ester_single_chain_is_structural() {
        let species = build(Dialect::LipidMaps, "CE(12:1)").unwrap();
        assert_eq!(species.level(), LipidLevel::StructuralSubspecies);
        assert_eq!(species.lipid_category(), LipidCategory::ST);
        let info = species.info().unwrap();
        assert_eq!((info.n_carbon, info.n_double_bonds, info.n_hydroxy), (12, 1, 0));
    }

    #[test]
    fn test_single_chain_is_species() {
        let species = build(Dialect::LipidMaps, "FA(18:4)").unwrap();
        assert_eq!(species.level(), LipidLevel::Species);
        assert_eq!(species.lipid_category(), LipidCategory::FA);
        let info = species.info().unwrap();
        assert_eq!((info.n_carbon, info.n_double_bonds, info.n_hydroxy), (18, 4, 0));

        let species = build(Dialect::LipidMaps, "SM(d32:0)").unwrap();
        assert_eq!(species.level(), LipidLevel::Species);
        let info = species.info().unwrap();
        assert_eq!((info.n_carbon, info.n_double_bonds, info.n_hydroxy), (32, 0, 2));
    }

    #[test]
    fn test_lyso_fills_empty_slot() {
        let species = build(Dialect::LipidMaps, "LPE(18:0)").unwrap();
        assert_eq!(species.level(), LipidLevel::StructuralSubspecies);
        assert!(species.fatty_acid("FA2").unwrap().is_empty_acyl());
        let info = species.info().unwrap();
        assert_eq!((info.n_carbon, info.n_double_bonds, info.n_hydroxy), (18, 0, 0));

        assert_matches!(
            build(Dialect::LipidMaps, "LPE(18:0_0:0)"),
            Err(ResolutionError::MalformedTree { .. })
        );
    }

    #[test]
    fn test_lyso_rejects_only_empty_chain() {
        assert_matches!(
            build(Dialect::LipidMaps, "LPE(0:0)"),
            Err(ResolutionError::ConstraintViolation(_))
        );
        assert_matches!(
            build(Dialect::Goslin, "LPC 0:0"),
            Err(ResolutionError::ConstraintViolation(_))
        );
    }

    #[test]
    fn test_single_kept_chain_stays_structural_with_geometry() {
        let species = build(Dialect::LipidMaps, "LPC(18:1(9Z))").unwrap();
        assert_eq!(species.level(), LipidLevel::StructuralSubspecies);

        let species = build(Dialect::LipidMaps, "CE(18:2(9Z,12Z))").unwrap();
        assert_eq!(species.level(), LipidLevel::StructuralSubspecies);
        assert_eq!(species.info().unwrap().n_double_bonds, 2);
    }

    #[test]
    fn test_molecular_keeps_insertion_order() {
        let species = build(Dialect::LipidMaps, "PE(18:3_16:2)").unwrap();
        assert_eq!(species.level(), LipidLevel::MolecularSubspecies);
        let fa1 = species.fatty_acid("FA1").unwrap();
        assert_eq!((fa1.n_carbon(), fa1.n_double_bonds(), fa1.position()), (18, 3, -1));
        let fa2 = species.fatty_acid("FA2").unwrap();
        assert_eq!((fa2.n_carbon(), fa2.n_double_bonds()), (16, 2));

        let species = build(Dialect::LipidMaps, "PE(18:0_0:0)").unwrap();
        assert!(species.fatty_acid("FA2").unwrap().is_empty_acyl());
    }

    #[test]
    fn test_ether_chains() {
        let species = build(Dialect::LipidMaps, "PE(O-18:3/16:2)").unwrap();
        assert_eq!(species.level(), LipidLevel::StructuralSubspecies);
        let fa1 = species.fatty_acid("FA1").unwrap();
        assert_eq!(fa1.bond_type(), LipidFaBondType::EtherPlasmanyl);
        assert_eq!(fa1.n_double_bonds(), 3);

        let species = build(Dialect::LipidMaps, "PE(P-18:0/16:2)").unwrap();
        let fa1 = species.fatty_acid("FA1").unwrap();
        assert_eq!(fa1.bond_type(), LipidFaBondType::EtherPlasmenyl);
        assert_eq!(fa1.n_double_bonds(), 0);
    }

    #[test]
    fn test_promotion_is_all_or_nothing() {
        let species = build(Dialect::LipidMaps, "PG(0:0/16:2(9Z,12Z))").unwrap();
        assert_eq!(species.level(), LipidLevel::IsomericSubspecies);
        assert!(species
            .fatty_acids()
            .iter()
            .all(|fa| fa.level() == LipidLevel::IsomericSubspecies));

        let species = build(Dialect::LipidMaps, "PC(16:1(9Z)/18:1)").unwrap();
        assert_eq!(species.level(), LipidLevel::StructuralSubspecies);
        assert!(species
            .fatty_acids()
            .iter()
            .all(|fa| fa.level() == LipidLevel::StructuralSubspecies));
    }

    #[test]
    fn test_sphingolipid_slots() {
        let species = build(Dialect::LipidMaps, "Hex2Cer(d18:1/16:0)").unwrap();
        assert_eq!(species.lipid_category(), LipidCategory::SP);
        assert_eq!(species.level(), LipidLevel::StructuralSubspecies);

        let lcb = species.fatty_acid(LCB_SLOT).unwrap();
        assert!(lcb.is_lcb());
        assert_eq!(lcb.position(), 1);
        assert_eq!(species.fatty_acid("FA1").unwrap().position(), 2);

        let info = species.info().unwrap();
        assert_eq!((info.n_carbon, info.n_double_bonds, info.n_hydroxy), (34, 1, 2));
    }

    #[test]
    fn test_glycolipids_from_swiss_lipids() {
        let species = build(Dialect::SwissLipids, "MHDG (18:3/16:1)").unwrap();
        assert_eq!(species.lipid_category(), LipidCategory::GL);
        assert_eq!(species.level(), LipidLevel::StructuralSubspecies);
        let info = species.info().unwrap();
        assert_eq!((info.n_carbon, info.n_double_bonds), (34, 4));

        let species = build(Dialect::SwissLipids, "DHDG (16:0/16:1)").unwrap();
        let info = species.info().unwrap();
        assert_eq!((info.n_carbon, info.n_double_bonds), (32, 1));
    }

    #[test]
    fn test_chain_limits() {
        assert_matches!(
            build(Dialect::LipidMaps, "PE(16:0/18:1/18:2)"),
            Err(ResolutionError::ConstraintViolation(_))
        );
        assert!(build(Dialect::LipidMaps, "CL(16:0/18:1/18:2/18:2)").is_ok());
        assert_matches!(
            build(Dialect::LipidMaps, "PE(1:0/16:0)"),
            Err(ResolutionError::ConstraintViolation(_))
        );
    }

    #[test]
    fn test_head_group_without_chains() {
        assert!(build(Dialect::LipidMaps, "Ch").is_ok());
        assert_matches!(
            build(Dialect::LipidMaps, "PE"),
            Err(ResolutionError::MalformedTree { .. })
        );
    }
}
