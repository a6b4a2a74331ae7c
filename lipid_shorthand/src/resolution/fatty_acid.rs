//! Chain node to chain composition
//!
//! Decides bond type, counts and whether the double bond annotation is
//! complete enough for the isomeric level. Slot names and positions are
//! assigned later by the species builder.

use super::error::{ResolutionError, ResolutionResult};
use crate::domain::{
    ChainComposition, CisTrans, ConstraintViolation, DoubleBondPosition, FattyAcid, FattyAcidKind,
    LipidFaBondType, LipidLevel,
};
use crate::grammar::ast::nodes::{ChainNode, DbPositionsNode};
use crate::grammar::dialect::DialectRules;
use crate::utils::{Span, Spanned};

/// One chain with everything but its slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChain {
    pub composition: ChainComposition,
    /// Set when every double bond is listed with a cis/trans marker
    pub positions: Option<Vec<DoubleBondPosition>>,
    pub span: Span,
}

impl ResolvedChain {
    /// Complete annotation, or no double bonds at all
    pub fn is_isomeric_capable(&self) -> bool {
        self.positions.is_some()
    }

    pub fn as_lcb(mut self) -> Self {
        self.composition = self.composition.as_lcb();
        self
    }

    /// Place the chain into a slot at `level`
    pub fn into_fatty_acid(
        self,
        name: &str,
        position: i32,
        level: LipidLevel,
    ) -> Result<FattyAcid, ConstraintViolation> {
        let kind = match level {
            LipidLevel::MolecularSubspecies => FattyAcidKind::Molecular,
            LipidLevel::IsomericSubspecies => {
                FattyAcidKind::Isomeric(self.positions.unwrap_or_default())
            }
            _ => FattyAcidKind::Structural,
        };
        FattyAcid::new(name, position, self.composition, kind)
    }
}

pub fn resolve_chain(chain: &ChainNode, rules: &DialectRules) -> ResolutionResult<ResolvedChain> {
    if let Some(heavy) = &chain.heavy {
        return Err(ResolutionError::unsupported_feature(
            &format!("heavy label [{}]", heavy.value),
            heavy.span,
        ));
    }

    let mut bond_type = match &chain.ether {
        Some(prefix) => resolve_bond_type(prefix, rules)?,
        None => LipidFaBondType::Ester,
    };

    let carbon = chain
        .carbon
        .as_ref()
        .ok_or_else(|| ResolutionError::malformed_tree("chain without carbon count", chain.span))?;
    let n_carbon = parse_count(carbon)?;
    let n_double_bonds = chain.double_bonds.as_ref().map(parse_count).transpose()?.unwrap_or(0);

    let mut n_hydroxy = chain.hydroxyl.as_ref().map(parse_count).transpose()?.unwrap_or(0);
    if let Some(letter) = &chain.lcb_hydroxyl {
        n_hydroxy += lcb_hydroxy_count(letter)?;
    }

    let positions = resolve_positions(chain.db_positions.as_ref(), n_double_bonds)?;

    // a listed bond next to the ether oxygen is the vinyl ether bond
    if bond_type.is_ether()
        && positions
            .as_ref()
            .is_some_and(|list| list.iter().any(|db| db.position == 1))
    {
        bond_type = LipidFaBondType::EtherPlasmenyl;
    }

    Ok(ResolvedChain {
        composition: ChainComposition::new(n_carbon, n_hydroxy, n_double_bonds, bond_type),
        positions,
        span: chain.span,
    })
}

fn resolve_bond_type(prefix: &Spanned<String>, rules: &DialectRules) -> ResolutionResult<LipidFaBondType> {
    let text = prefix.value.as_str();
    match text {
        "O" => Ok(LipidFaBondType::EtherPlasmanyl),
        "o" if rules.case_insensitive_ether => Ok(LipidFaBondType::EtherPlasmanyl),
        "P" => Ok(LipidFaBondType::EtherPlasmenyl),
        "i" | "a" | "I" | "A" => Err(ResolutionError::unsupported_feature(
            &format!("branched chain prefix '{}-'", text),
            prefix.span,
        )),
        _ => Err(ResolutionError::malformed_tree(
            &format!("unknown chain prefix '{}-'", text),
            prefix.span,
        )),
    }
}

fn lcb_hydroxy_count(letter: &Spanned<String>) -> ResolutionResult<u32> {
    match letter.value.as_str() {
        "m" => Ok(1),
        "d" => Ok(2),
        "t" => Ok(3),
        other => Err(ResolutionError::malformed_tree(
            &format!("unknown long-chain base prefix '{}'", other),
            letter.span,
        )),
    }
}

/// `Some` only for a complete, fully marked list; zero bonds are vacuously complete
fn resolve_positions(
    node: Option<&DbPositionsNode>,
    n_double_bonds: u32,
) -> ResolutionResult<Option<Vec<DoubleBondPosition>>> {
    let Some(node) = node else {
        return Ok((n_double_bonds == 0).then(Vec::new));
    };

    if node.positions.len() > n_double_bonds as usize {
        return Err(ConstraintViolation::new(format!(
            "{} double bond positions listed for {} double bonds",
            node.positions.len(),
            n_double_bonds
        ))
        .into());
    }

    let mut positions = Vec::with_capacity(node.positions.len());
    for entry in &node.positions {
        let position = parse_count(&entry.number)?;
        match entry
            .cis_trans
            .as_ref()
            .and_then(|marker| CisTrans::from_marker(&marker.value))
        {
            Some(cis_trans) => positions.push(DoubleBondPosition::new(position, cis_trans)),
            None => return Ok(None),
        }
    }

    if positions.len() == n_double_bonds as usize {
        Ok(Some(positions))
    } else {
        Ok(None)
    }
}

pub fn parse_count(number: &Spanned<String>) -> ResolutionResult<u32> {
    number
        .value
        .parse::<u32>()
        .map_err(|_| ResolutionError::number_format(&number.value, number.span))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ast::nodes::DbPositionNode;
    use crate::grammar::dialect::Dialect;
    use crate::utils::Position;
    use assert_matches::assert_matches;

    fn span() -> Span {
        Span::empty_at(Position::start())
    }

    fn text(value: &str) -> Spanned<String> {
        Spanned::new(value.to_string(), span())
    }

    fn chain(carbon: &str, db: &str) -> ChainNode {
        ChainNode {
            carbon: Some(text(carbon)),
            double_bonds: Some(text(db)),
            ..ChainNode::empty_at(span())
        }
    }

    fn with_positions(mut node: ChainNode, positions: &[(&str, Option<&str>)]) -> ChainNode {
        node.db_positions = Some(DbPositionsNode {
            positions: positions
                .iter()
                .map(|(number, marker)| DbPositionNode {
                    number: text(number),
                    cis_trans: marker.map(text),
                })
                .collect(),
            span: span(),
        });
        node
    }

    #[test]
    fn test_plasmenyl_does_not_count_vinyl_bond() {
        let rules = Dialect::LipidMaps.rules();
        let plasmenyl = ChainNode {
            ether: Some(text("P")),
            ..chain("18", "0")
        };
        let resolved = resolve_chain(&plasmenyl, rules).unwrap();
        assert_eq!(resolved.composition.bond_type, LipidFaBondType::EtherPlasmenyl);
        assert_eq!(resolved.composition.n_double_bonds, 0);

        let plasmanyl = ChainNode {
            ether: Some(text("O")),
            ..chain("18", "3")
        };
        let resolved = resolve_chain(&plasmanyl, rules).unwrap();
        assert_eq!(resolved.composition.bond_type, LipidFaBondType::EtherPlasmanyl);
        assert_eq!(resolved.composition.n_double_bonds, 3);
    }

    #[test]
    fn test_ether_bond_at_position_one_is_plasmenyl() {
        let node = with_positions(
            ChainNode {
                ether: Some(text("O")),
                ..chain("18", "1")
            },
            &[("1", Some("Z"))],
        );
        let resolved = resolve_chain(&node, Dialect::Goslin.rules()).unwrap();
        assert_eq!(resolved.composition.bond_type, LipidFaBondType::EtherPlasmenyl);
    }

    #[test]
    fn test_prefix_handling() {
        let lower = ChainNode {
            ether: Some(text("o")),
            ..chain("16", "0")
        };
        assert!(resolve_chain(&lower, Dialect::Hmdb.rules()).is_ok());
        assert_matches!(
            resolve_chain(&lower, Dialect::LipidMaps.rules()),
            Err(ResolutionError::MalformedTree { .. })
        );

        let lower_plasmenyl = ChainNode {
            ether: Some(text("p")),
            ..chain("16", "0")
        };
        assert_matches!(
            resolve_chain(&lower_plasmenyl, Dialect::Hmdb.rules()),
            Err(ResolutionError::MalformedTree { .. })
        );

        let branched = ChainNode {
            ether: Some(text("i")),
            ..chain("16", "0")
        };
        assert_matches!(
            resolve_chain(&branched, Dialect::LipidMaps.rules()),
            Err(ResolutionError::UnsupportedFeature { .. })
        );
    }

    #[test]
    fn test_lcb_letters() {
        let node = ChainNode {
            lcb_hydroxyl: Some(text("t")),
            ..chain("18", "0")
        };
        let resolved = resolve_chain(&node, Dialect::LipidMaps.rules()).unwrap();
        assert_eq!(resolved.composition.n_hydroxy, 3);

        let node = ChainNode {
            lcb_hydroxyl: Some(text("x")),
            ..chain("18", "0")
        };
        assert_matches!(
            resolve_chain(&node, Dialect::LipidMaps.rules()),
            Err(ResolutionError::MalformedTree { .. })
        );
    }

    #[test]
    fn test_isomeric_capability() {
        let rules = Dialect::Hmdb.rules();
        assert!(resolve_chain(&chain("16", "0"), rules).unwrap().is_isomeric_capable());
        assert!(!resolve_chain(&chain("16", "1"), rules).unwrap().is_isomeric_capable());

        let complete = with_positions(chain("18", "2"), &[("9", Some("Z")), ("12", Some("Z"))]);
        assert_eq!(resolve_chain(&complete, rules).unwrap().positions.unwrap().len(), 2);

        let partial = with_positions(chain("18", "2"), &[("9", Some("Z"))]);
        assert!(!resolve_chain(&partial, rules).unwrap().is_isomeric_capable());

        let bare = with_positions(chain("18", "1"), &[("9", None)]);
        assert!(!resolve_chain(&bare, rules).unwrap().is_isomeric_capable());

        let empty = with_positions(chain("18", "0"), &[]);
        assert!(resolve_chain(&empty, rules).unwrap().is_isomeric_capable());
    }

    #[test]
    fn test_count_errors() {
        let rules = Dialect::Goslin.rules();
        assert_matches!(
            resolve_chain(&chain("99999999999", "0"), rules),
            Err(ResolutionError::NumberFormat { .. })
        );
        assert_matches!(
            resolve_chain(&ChainNode::empty_at(span()), rules),
            Err(ResolutionError::MalformedTree { .. })
        );
        let too_many = with_positions(chain("18", "1"), &[("9", Some("Z")), ("12", Some("Z"))]);
        assert_matches!(
            resolve_chain(&too_many, rules),
            Err(ResolutionError::ConstraintViolation(_))
        );
    }

    #[test]
    fn test_slot_placement() {
        let resolved = resolve_chain(&chain("16", "0"), Dialect::Goslin.rules()).unwrap();
        let molecular = resolved
            .clone()
            .into_fatty_acid("FA1", -1, LipidLevel::MolecularSubspecies)
            .unwrap();
        assert_eq!(molecular.level(), LipidLevel::MolecularSubspecies);

        assert!(resolved
            .into_fatty_acid("FA1", -1, LipidLevel::StructuralSubspecies)
            .is_err());
    }
}
