//! Shorthand dialects and their grammar rules
//!
//! One grammar and one resolver serve every dialect; the differences between
//! notations are data in [`DialectRules`].

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    Goslin,
    GoslinFragments,
    LipidMaps,
    SwissLipids,
    Hmdb,
}

/// Where the chain section starts relative to the head group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadGroupLayout {
    /// `PE 18:0/16:1`
    Spaced,
    /// `PE(18:0/16:1)`
    Parenthesized { space_before_paren: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectRules {
    pub layout: HeadGroupLayout,
    /// `;2` hydroxyl suffix
    pub numeric_hydroxyl: bool,
    /// `m`/`d`/`t` long-chain base prefix
    pub lcb_letters: bool,
    /// Accept `o-` as well as `O-`; `P-` is always exact
    pub case_insensitive_ether: bool,
    /// Every listed double bond position must carry `Z` or `E`
    pub require_cis_trans: bool,
    /// `[M+H]1+` suffix
    pub adducts: bool,
    /// ` - name` suffix
    pub fragments: bool,
    /// `[...]` after a chain is read as an isotope label
    pub heavy_labels: bool,
    /// `HG[...]` before the chain section is read as a phosphate position
    pub pip_positions: bool,
    /// Head groups the grammar knows but the resolver cannot represent
    pub unsupported_head_groups: &'static [&'static str],
}

const GOSLIN_RULES: DialectRules = DialectRules {
    layout: HeadGroupLayout::Spaced,
    numeric_hydroxyl: true,
    lcb_letters: false,
    case_insensitive_ether: false,
    require_cis_trans: true,
    adducts: true,
    fragments: false,
    heavy_labels: true,
    pip_positions: false,
    unsupported_head_groups: &[],
};

const GOSLIN_FRAGMENTS_RULES: DialectRules = DialectRules {
    fragments: true,
    ..GOSLIN_RULES
};

const LIPID_MAPS_RULES: DialectRules = DialectRules {
    layout: HeadGroupLayout::Parenthesized {
        space_before_paren: false,
    },
    numeric_hydroxyl: false,
    lcb_letters: true,
    case_insensitive_ether: false,
    require_cis_trans: true,
    adducts: false,
    fragments: false,
    heavy_labels: false,
    pip_positions: true,
    unsupported_head_groups: &["PAT16", "PAT18"],
};

const SWISS_LIPIDS_RULES: DialectRules = DialectRules {
    layout: HeadGroupLayout::Parenthesized {
        space_before_paren: true,
    },
    pip_positions: false,
    unsupported_head_groups: &[],
    ..LIPID_MAPS_RULES
};

const HMDB_RULES: DialectRules = DialectRules {
    case_insensitive_ether: true,
    require_cis_trans: false,
    pip_positions: false,
    unsupported_head_groups: &[],
    ..LIPID_MAPS_RULES
};

impl Dialect {
    pub const ALL: [Dialect; 5] = [
        Dialect::Goslin,
        Dialect::GoslinFragments,
        Dialect::LipidMaps,
        Dialect::SwissLipids,
        Dialect::Hmdb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Goslin => "Goslin",
            Dialect::GoslinFragments => "GoslinFragments",
            Dialect::LipidMaps => "LipidMaps",
            Dialect::SwissLipids => "SwissLipids",
            Dialect::Hmdb => "HMDB",
        }
    }

    /// Case-insensitive selector lookup, e.g. `"goslin"`, `"lipidmaps"`, `"hmdb"`
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "goslin" => Some(Dialect::Goslin),
            "goslinfragments" | "goslinfragment" => Some(Dialect::GoslinFragments),
            "lipidmaps" => Some(Dialect::LipidMaps),
            "swisslipids" => Some(Dialect::SwissLipids),
            "hmdb" => Some(Dialect::Hmdb),
            _ => None,
        }
    }

    pub fn rules(&self) -> &'static DialectRules {
        match self {
            Dialect::Goslin => &GOSLIN_RULES,
            Dialect::GoslinFragments => &GOSLIN_FRAGMENTS_RULES,
            Dialect::LipidMaps => &LIPID_MAPS_RULES,
            Dialect::SwissLipids => &SWISS_LIPIDS_RULES,
            Dialect::Hmdb => &HMDB_RULES,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DialectRules {
    /// Whether `prefix` (the letters before `-`) is an ether prefix in this dialect
    pub fn is_ether_prefix(&self, prefix: &str) -> bool {
        match prefix {
            "O" | "P" | "i" | "a" => true,
            "o" => self.case_insensitive_ether,
            _ => false,
        }
    }

    pub fn is_unsupported_head_group(&self, head_group: &str) -> bool {
        self.unsupported_head_groups.contains(&head_group.trim())
    }
}
