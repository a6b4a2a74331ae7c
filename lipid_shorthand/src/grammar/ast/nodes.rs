//! Parse tree nodes for lipid shorthand names
//!
//! The tree is purely syntactic: numbers stay as their source text and
//! prefixes stay as written, so the resolver decides what they mean.
//!
//! ```text
//! lipid      ::= mediator | head_group [pip_pos] [chains] [adduct] [fragment]
//! chains     ::= chain ( ("/" | "_") chain )*
//! chain      ::= [ether "-"] [lcb] carbon ":" db ["(" positions ")"] [";" hydroxyl] [heavy]
//! positions  ::= position ("," position)*
//! position   ::= number [("Z" | "E")]
//! adduct     ::= "[M" sign adduct_text "]" [charge] sign
//! fragment   ::= " - " text
//! ```
//!
//! Optional subrules that are absent are `None`.

use crate::utils::{Span, Spanned};
use serde::{Deserialize, Serialize};
use std::fmt;

// === ROOT ===

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LipidTree {
    /// A trivial name matched as a whole, e.g. `12-HETE`
    Mediator(MediatorNode),
    Lipid(LipidNode),
}

impl LipidTree {
    pub fn span(&self) -> Span {
        match self {
            Self::Mediator(node) => node.span,
            Self::Lipid(node) => node.span,
        }
    }

    /// Number of chains in the tree, 0 for mediators
    pub fn chain_count(&self) -> usize {
        match self {
            Self::Mediator(_) => 0,
            Self::Lipid(node) => node.chains.as_ref().map(ChainList::len).unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediatorNode {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LipidNode {
    pub head_group: HeadGroupNode,
    /// `PIP[3']` phosphate position, LipidMaps only
    pub pip_position: Option<Spanned<String>>,
    pub chains: Option<ChainList>,
    pub adduct: Option<AdductNode>,
    pub fragment: Option<FragmentNode>,
    pub span: Span,
}

// === HEAD GROUP ===

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadGroupNode {
    /// Head group exactly as written, inner spaces included (`CDP DG`)
    pub text: String,
    pub span: Span,
}

// === CHAINS ===

/// Chains with the separator that joined them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainList {
    Single(ChainNode),
    /// Joined by `/`
    Sorted(Vec<ChainNode>),
    /// Joined by `_`
    Unsorted(Vec<ChainNode>),
}

impl ChainList {
    pub fn from_chains(mut chains: Vec<ChainNode>, separator: Option<ChainSeparator>) -> Option<Self> {
        match (chains.len(), separator) {
            (0, _) => None,
            (1, _) => chains.pop().map(Self::Single),
            (_, Some(ChainSeparator::Unsorted)) => Some(Self::Unsorted(chains)),
            (_, _) => Some(Self::Sorted(chains)),
        }
    }

    pub fn chains(&self) -> &[ChainNode] {
        match self {
            Self::Single(chain) => std::slice::from_ref(chain),
            Self::Sorted(chains) | Self::Unsorted(chains) => chains,
        }
    }

    pub fn len(&self) -> usize {
        self.chains().len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains().is_empty()
    }

    pub fn separator(&self) -> Option<ChainSeparator> {
        match self {
            Self::Single(_) => None,
            Self::Sorted(_) => Some(ChainSeparator::Sorted),
            Self::Unsorted(_) => Some(ChainSeparator::Unsorted),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainSeparator {
    Sorted,
    Unsorted,
}

impl ChainSeparator {
    pub fn as_char(&self) -> char {
        match self {
            Self::Sorted => '/',
            Self::Unsorted => '_',
        }
    }
}

impl fmt::Display for ChainSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One fatty acyl or long-chain base as written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainNode {
    /// Letters before `-`, e.g. `O`, `P`, `i`
    pub ether: Option<Spanned<String>>,
    /// `m`, `d` or `t` before the carbon count
    pub lcb_hydroxyl: Option<Spanned<String>>,
    pub carbon: Option<Spanned<String>>,
    pub double_bonds: Option<Spanned<String>>,
    pub db_positions: Option<DbPositionsNode>,
    /// Number after `;`
    pub hydroxyl: Option<Spanned<String>>,
    /// Bracketed isotope label, kept verbatim
    pub heavy: Option<Spanned<String>>,
    pub span: Span,
}

impl ChainNode {
    pub fn empty_at(span: Span) -> Self {
        Self {
            ether: None,
            lcb_hydroxyl: None,
            carbon: None,
            double_bonds: None,
            db_positions: None,
            hydroxyl: None,
            heavy: None,
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbPositionsNode {
    pub positions: Vec<DbPositionNode>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbPositionNode {
    pub number: Spanned<String>,
    pub cis_trans: Option<Spanned<String>>,
}

// === ADDUCT & FRAGMENT ===

/// `[M+H]1+`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdductNode {
    /// Text between `M` and `]`, e.g. `+NH4`
    pub adduct: String,
    pub charge: Option<Spanned<String>>,
    /// `+` or `-`
    pub sign: Option<Spanned<char>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentNode {
    pub name: String,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    fn chain() -> ChainNode {
        ChainNode::empty_at(Span::empty_at(Position::start()))
    }

    #[test]
    fn test_chain_list_from_separator() {
        assert_eq!(ChainList::from_chains(vec![], None), None);
        assert!(matches!(
            ChainList::from_chains(vec![chain()], Some(ChainSeparator::Sorted)),
            Some(ChainList::Single(_))
        ));

        let unsorted = ChainList::from_chains(vec![chain(), chain()], Some(ChainSeparator::Unsorted))
            .unwrap();
        assert_eq!(unsorted.len(), 2);
        assert_eq!(unsorted.separator(), Some(ChainSeparator::Unsorted));

        let sorted = ChainList::from_chains(vec![chain(), chain()], Some(ChainSeparator::Sorted))
            .unwrap();
        assert_eq!(sorted.separator().map(|s| s.as_char()), Some('/'));
    }
}
