//! Lipid class table
//!
//! Every class belongs to exactly one category and carries a non-empty,
//! ordered synonym list whose first entry is the canonical abbreviation.
//! Head group lookup walks the classes in declaration order, so when two
//! classes share a synonym the earlier one wins (MLCL is reachable only by
//! variant, never by its "CL" synonym).

use super::category::LipidCategory;
use super::error::ConstraintViolation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

macro_rules! lipid_classes {
    ($($variant:ident => ($category:ident, $lm_name:expr, [$($synonym:expr),+ $(,)?])),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum LipidClass {
            $($variant),+
        }

        impl LipidClass {
            /// All classes in declaration (lookup) order
            pub const ALL: &'static [LipidClass] = &[$(LipidClass::$variant),+];

            pub fn category(&self) -> LipidCategory {
                match self {
                    $(LipidClass::$variant => LipidCategory::$category),+
                }
            }

            /// LIPID MAPS main class label, e.g. "Glycerophosphocholines [GP01]"
            pub fn lipid_maps_class_name(&self) -> &'static str {
                match self {
                    $(LipidClass::$variant => $lm_name),+
                }
            }

            pub fn synonyms(&self) -> &'static [&'static str] {
                match self {
                    $(LipidClass::$variant => &[$($synonym),+]),+
                }
            }
        }
    };
}

lipid_classes! {
    Undefined => (Undefined, "UNDEFINED", ["Undefined lipid class"]),
    Fa => (FA, "Fatty acids and conjugates [FA01]", [
        "FA", "10-HDoHE", "11-HDoHE", "11-HETE", "11,12-DHET", "11,12-DiHETrE",
        "11(12)-EET", "12-HEPE", "12-HETE", "12-HHTrE", "12-OxoETE", "12(13)-EpOME",
        "13-HODE", "13-HOTrE", "14,15-DHET", "14(15)-EET", "14(15)-EpETE", "15-HEPE",
        "15-HETE", "15d-PGJ2", "16-HDoHE", "16-HETE", "18-HEPE", "5-HEPE", "5-HETE",
        "5-HpETE", "5-OxoETE", "5,12-DiHETE", "5,6-DiHETE", "5,6-EpETrE", "5,6,15-LXA4",
        "5(6)-EET", "8-HDoHE", "8-HETE", "8,9-DHET", "8(9)-EET", "9-HEPE", "9-HETE",
        "9-HODE", "9-HOTrE", "9(10)-EpOME", "AA", "alpha-LA", "DHA", "EPA",
        "Linoleic acid", "LTB4", "LTC4", "LTD4", "Maresin 1", "Palmitic acid", "PGB2",
        "PGD2", "PGE2", "PGF2alpha", "PGI2", "Resolvin D1", "Resolvin D2", "Resolvin D3",
        "Resolvin D5", "tetranor-12-HETE", "TXB1", "TXB2", "TXB3",
    ]),
    Mg => (GL, "Monoradylglycerols [GL01]", ["MG", "MAG"]),
    Dg => (GL, "Diradylglycerols [GL02]", ["DG", "DAG"]),
    Tg => (GL, "Triradylglycerols [GL03]", ["TG", "TAG"]),
    Mhdg => (GL, "Glycosyldiacylglycerols [GL0501]", ["MHDG"]),
    Dhdg => (GL, "Glycosyldiacylglycerols [GL0501]", ["DHDG"]),
    Bmp => (GP, "Monoacylglycerophosphomonoradylglycerols [GP0410]", ["BMP"]),
    CdpDag => (GP, "CDP-diacylglycerols [GP1301]", ["CDP DG", "CDPDAG"]),
    Cl => (GP, "Glycerophosphoglycerophosphoglycerols [GP12]", ["CL"]),
    Mgdg => (GP, "Glycosyldiacylglycerols [GL0501]", ["MGDG"]),
    Dgdg => (GP, "Glycosyldiacylglycerols [GL0501]", ["DGDG"]),
    Sqmg => (GP, "Glycosylmonoacylglycerols [GL0401]", ["SQMG"]),
    Sqdg => (GP, "Glycosyldiacylglycerols [GL0501]", ["SQDG"]),
    Mlcl => (GP, "Glycerophosphoglycerophosphoglycerols [GP12]", ["CL"]),
    Pa => (GP, "Glycerophosphates [GP10]", ["PA"]),
    Lpa => (GP, "Glycerophosphates [GP10]", ["LPA"]),
    Pc => (GP, "Glycerophosphocholines [GP01]", ["PC"]),
    PcO => (GP, "Glycerophosphocholines [GP01]", ["PC O"]),
    Lpc => (GP, "Glycerophosphocholines [GP01]", ["LPC"]),
    LpcO => (GP, "Glycerophosphocholines [GP01]", ["LPC O"]),
    Pe => (GP, "Glycerophosphoethanolamines [GP02]", ["PE"]),
    PeO => (GP, "Glycerophosphoethanolamines [GP02]", ["PE O"]),
    Pet => (GP, "Glycerophosphoethanolamines [GP02]", ["PEt"]),
    Lpe => (GP, "Glycerophosphoethanolamines [GP02]", ["LPE"]),
    LpeO => (GP, "Glycerophosphoethanolamines [GP02]", ["LPE O"]),
    Pg => (GP, "Glycerophosphoglycerols [GP04]", ["PG"]),
    Lpg => (GP, "Glycerophosphoglycerols [GP04]", ["LPG"]),
    Pgp => (GP, "Glycerophosphoglycerophosphates [GP05]", ["PGP"]),
    Pi => (GP, "Glycerophosphoinositols [GP06]", ["PI"]),
    Lpi => (GP, "Glycerophosphoinositols [GP06]", ["LPI"]),
    Lps => (GP, "Glycerophosphoserines [GP03]", ["LPS"]),
    Pip => (GP, "Glycerophosphoinositol monophosphates [GP07]", ["PIP"]),
    Pip3p => (GP, "Glycerophosphoinositol monophosphates [GP07]", ["PIP[3']"]),
    Pip4p => (GP, "Glycerophosphoinositol monophosphates [GP07]", ["PIP[4']"]),
    Pip5p => (GP, "Glycerophosphoinositol monophosphates [GP07]", ["PIP[5']"]),
    Pip2 => (GP, "Glycerophosphoinositol bisphosphates [GP08]", ["PIP2"]),
    Pip2_3p4p => (GP, "Glycerophosphoinositol bisphosphates [GP08]", ["PIP2[3',4']"]),
    Pip2_3p5p => (GP, "Glycerophosphoinositol bisphosphates [GP08]", ["PIP2[3',5']"]),
    Pip3 => (GP, "Glycerophosphoinositol trisphosphates [GP09]", ["PIP3"]),
    Ps => (GP, "Glycerophosphoserines [GP03]", ["PS"]),
    Cer => (SP, "Ceramides [SP02]", ["Cer"]),
    C1p => (SP, "Ceramide-1-phosphates [SP0205]", ["C1P"]),
    Sph => (SP, "Sphingoid bases [SP01]", ["SPH"]),
    S1p => (SP, "Sphingoid bases [SP01]", ["S1P"]),
    Sm => (SP, "Phosphosphingolipids [SP03]", ["SM"]),
    HexCer => (SP, "Neutral glycosphingolipids [SP05]", ["HexCer"]),
    GlcCer => (SP, "Neutral glycosphingolipids [SP05]", ["GlcCer"]),
    GalCer => (SP, "Neutral glycosphingolipids [SP05]", ["GalCer"]),
    Hex2Cer => (SP, "Neutral glycosphingolipids [SP05]", ["Hex2Cer"]),
    Hex3Cer => (SP, "Neutral glycosphingolipids [SP05]", ["Hex3Cer"]),
    SHexCer => (SP, "Acidic glycosphingolipids [SP06]", ["SHexCer"]),
    LacCer => (SP, "Neutral glycosphingolipids [SP05]", ["LacCer"]),
    St => (ST, "Sterols [ST01]", ["ST"]),
    Se => (ST, "Steryl esters [ST0102]", ["SE"]),
    Ch => (ST, "Cholesterol [LMST01010001]", ["FC", "Ch", "Cholesterol"]),
    ChE => (ST, "Cholesteryl esters [ST0102]", ["ChE", "CE"]),
}

static HEAD_GROUP_INDEX: OnceLock<HashMap<&'static str, LipidClass>> = OnceLock::new();

fn head_group_index() -> &'static HashMap<&'static str, LipidClass> {
    HEAD_GROUP_INDEX.get_or_init(|| {
        let mut index = HashMap::new();
        for class in LipidClass::ALL {
            for synonym in class.synonyms() {
                // first declaration wins
                index.entry(*synonym).or_insert(*class);
            }
        }
        index
    })
}

impl LipidClass {
    /// Canonical abbreviation (first synonym)
    pub fn abbreviation(&self) -> &'static str {
        self.synonyms()[0]
    }

    pub fn matches_abbreviation(&self, head_group: &str) -> bool {
        self.synonyms().iter().any(|synonym| *synonym == head_group)
    }

    /// Find the class for a head group; surrounding whitespace is ignored
    pub fn for_head_group(head_group: &str) -> Option<LipidClass> {
        head_group_index().get(head_group.trim()).copied()
    }

    /// Abbreviation of the lyso form of this class
    pub fn lyso_abbreviation(&self) -> Result<String, ConstraintViolation> {
        if self.category() == LipidCategory::GP {
            Ok(format!("L{}", self.abbreviation()))
        } else {
            Err(ConstraintViolation::new(format!(
                "Lipid category must be {} for lyso-classes, {} is {}",
                LipidCategory::GP,
                self.abbreviation(),
                self.category()
            )))
        }
    }

    /// Glycerophospholipids with a single acyl chain and an implicit empty second slot
    pub fn is_lyso(&self) -> bool {
        matches!(
            self,
            LipidClass::Lpa
                | LipidClass::Lpc
                | LipidClass::LpcO
                | LipidClass::Lpe
                | LipidClass::LpeO
                | LipidClass::Lpg
                | LipidClass::Lpi
                | LipidClass::Lps
        )
    }

    pub fn is_sterol_ester(&self) -> bool {
        matches!(self, LipidClass::ChE | LipidClass::Se)
    }

    /// Classes that are complete without any acyl chain
    pub fn allows_no_chains(&self) -> bool {
        matches!(self, LipidClass::Ch)
    }

    /// Maximum number of chains (including the long-chain base) a name may list
    pub fn max_chains(&self) -> usize {
        match self {
            LipidClass::Cl => 4,
            LipidClass::Mlcl => 3,
            LipidClass::Undefined => 4,
            _ => match self.category() {
                LipidCategory::GL => 3,
                LipidCategory::GP | LipidCategory::SP => 2,
                LipidCategory::FA | LipidCategory::ST => 1,
                LipidCategory::SL | LipidCategory::Undefined => 4,
            },
        }
    }
}

impl fmt::Display for LipidClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_trims_and_matches_exactly() {
        assert_eq!(LipidClass::for_head_group(" PE "), Some(LipidClass::Pe));
        assert_eq!(LipidClass::for_head_group("pe"), None);
        assert_eq!(LipidClass::for_head_group("CE"), Some(LipidClass::ChE));
        assert_eq!(LipidClass::for_head_group("CDP DG"), Some(LipidClass::CdpDag));
        assert_eq!(LipidClass::for_head_group("XYZ"), None);
    }

    #[test]
    fn test_first_declared_class_wins_shared_synonym() {
        assert_eq!(LipidClass::for_head_group("CL"), Some(LipidClass::Cl));
        assert!(LipidClass::Mlcl.matches_abbreviation("CL"));
    }

    #[test]
    fn test_mediators_belong_to_fatty_acids() {
        let class = LipidClass::for_head_group("11,12-DiHETrE").unwrap();
        assert_eq!(class, LipidClass::Fa);
        assert_eq!(class.category(), LipidCategory::FA);
        assert_eq!(
            LipidClass::for_head_group("5,6-EpETrE"),
            Some(LipidClass::Fa)
        );
    }

    #[test]
    fn test_every_class_has_synonyms() {
        for class in LipidClass::ALL {
            assert!(!class.synonyms().is_empty());
            assert!(!class.abbreviation().is_empty());
        }
    }

    #[test]
    fn test_lyso_abbreviation() {
        assert_eq!(LipidClass::Pe.lyso_abbreviation().unwrap(), "LPE");
        assert!(LipidClass::Tg.lyso_abbreviation().is_err());
    }

    #[test]
    fn test_categories_of_glycolipids() {
        assert_eq!(LipidClass::Mhdg.category(), LipidCategory::GL);
        assert_eq!(LipidClass::Dhdg.category(), LipidCategory::GL);
        assert_eq!(LipidClass::Hex2Cer.category(), LipidCategory::SP);
    }

    #[test]
    fn test_max_chains() {
        assert_eq!(LipidClass::Cl.max_chains(), 4);
        assert_eq!(LipidClass::Mlcl.max_chains(), 3);
        assert_eq!(LipidClass::Tg.max_chains(), 3);
        assert_eq!(LipidClass::Pe.max_chains(), 2);
        assert_eq!(LipidClass::ChE.max_chains(), 1);
    }
}
