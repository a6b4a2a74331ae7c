//! Resolution: parse tree to typed lipid model
//!
//! One resolver serves every dialect; the [`DialectRules`] passed along
//! decide the few dialect-specific readings (ether prefix case, what counts
//! as unsupported).

use crate::domain::{Adduct, Fragment, LipidAdduct, LipidSpecies};
use crate::grammar::ast::nodes::{AdductNode, LipidNode, LipidTree};
use crate::grammar::dialect::{Dialect, DialectRules};
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};

pub mod class;
pub mod error;
pub mod fatty_acid;
pub mod species;

pub use class::resolve_class;
pub use error::{ResolutionError, ResolutionResult};
pub use fatty_acid::{resolve_chain, ResolvedChain};
pub use species::{acyl_slot, build_species, LCB_SLOT};

/// Build the lipid model for a parse tree
pub fn resolve(tree: &LipidTree, dialect: Dialect) -> ResolutionResult<LipidAdduct> {
    let rules = dialect.rules();
    log_debug!("Starting resolution",
        "dialect" => dialect.as_str(),
        "chains" => tree.chain_count()
    );

    let result = match tree {
        LipidTree::Mediator(mediator) => LipidSpecies::species(&mediator.name, None)
            .map(|lipid| LipidAdduct::new(Some(lipid), None, None))
            .map_err(ResolutionError::from),
        LipidTree::Lipid(node) => resolve_lipid(node, rules),
    };

    match &result {
        Ok(adduct) => {
            log_success!(codes::success::RESOLUTION_COMPLETE, "Resolution completed",
                "level" => adduct.lipid().map(|l| l.level().as_str()).unwrap_or("NONE")
            );
        }
        Err(error) => {
            log_error!(error.error_code(), "Resolution failed",
                "dialect" => dialect.as_str(),
                "error" => error.to_string()
            );
        }
    }
    result
}

fn resolve_lipid(node: &LipidNode, rules: &DialectRules) -> ResolutionResult<LipidAdduct> {
    let class = resolve_class(&node.head_group, node.pip_position.as_ref(), rules)?;
    let lipid = build_species(&node.head_group, class, node.chains.as_ref(), rules)?;
    let adduct = node.adduct.as_ref().map(resolve_adduct).transpose()?;
    let fragment = node.fragment.as_ref().map(|f| Fragment::new(f.name.clone()));
    Ok(LipidAdduct::new(Some(lipid), adduct, fragment))
}

/// Missing charge reads as 0; sign `+` is 1 and `-` is -1
pub fn resolve_adduct(node: &AdductNode) -> ResolutionResult<Adduct> {
    let charge = node
        .charge
        .as_ref()
        .map(fatty_acid::parse_count)
        .transpose()?
        .unwrap_or(0);
    let sign = match node.sign.as_ref().map(|sign| sign.value) {
        Some('+') => 1,
        Some('-') => -1,
        _ => 0,
    };
    Ok(Adduct::new(node.adduct.clone(), charge, sign)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LipidCategory, LipidLevel};
    use crate::syntax::parse_lipid_name;
    use assert_matches::assert_matches;

    fn resolve_name(dialect: Dialect, name: &str) -> ResolutionResult<LipidAdduct> {
        let tree = parse_lipid_name(name, dialect).unwrap();
        resolve(&tree, dialect)
    }

    #[test]
    fn test_mediators_have_no_info() {
        for name in ["11,12-DiHETrE", "5,6-EpETrE"] {
            let adduct = resolve_name(Dialect::LipidMaps, name).unwrap();
            let lipid = adduct.lipid().unwrap();
            assert_eq!(lipid.level(), LipidLevel::Species);
            assert_eq!(lipid.lipid_category(), LipidCategory::FA);
            assert_eq!(lipid.head_group(), name);
            assert!(lipid.info().is_none());
        }
    }

    #[test]
    fn test_goslin_adduct() {
        let adduct = resolve_name(Dialect::Goslin, "PE 18:0/16:1 [M+H]1+").unwrap();
        let ion = adduct.adduct().unwrap();
        assert_eq!(ion.adduct_string(), "+H");
        assert_eq!(ion.charge(), 1);
        assert_eq!(ion.charge_sign(), 1);

        let adduct = resolve_name(Dialect::Goslin, "PE 18:0/16:1[M-H]1-").unwrap();
        assert_eq!(adduct.adduct().unwrap().charge_sign(), -1);
    }

    #[test]
    fn test_fragment_is_kept() {
        let adduct = resolve_name(Dialect::GoslinFragments, "PC 16:0/18:1 - HG(PC,184)").unwrap();
        assert_eq!(adduct.fragment().unwrap().name, "HG(PC,184)");
    }

    #[test]
    fn test_unsupported_features() {
        assert_matches!(
            resolve_name(Dialect::Goslin, "PE 18:0[D5]/16:1"),
            Err(ResolutionError::UnsupportedFeature { .. })
        );
        assert_matches!(
            resolve_name(Dialect::LipidMaps, "PIP[3'](16:0/18:1)"),
            Err(ResolutionError::UnsupportedFeature { .. })
        );
        assert_matches!(
            resolve_name(Dialect::LipidMaps, "PAT16(16:0/18:1)"),
            Err(ResolutionError::UnsupportedFeature { .. })
        );
    }
}
