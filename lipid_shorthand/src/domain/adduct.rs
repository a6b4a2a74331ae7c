use super::category::LipidLevel;
use super::error::ConstraintViolation;
use super::species::LipidSpecies;
use crate::render::RenderError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ion adduct, e.g. `[M+H]1+`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adduct {
    adduct_string: String,
    charge: u32,
    charge_sign: i8,
}

impl Adduct {
    pub fn new(
        adduct_string: impl Into<String>,
        charge: u32,
        charge_sign: i32,
    ) -> Result<Self, ConstraintViolation> {
        if !(-1..=1).contains(&charge_sign) {
            return Err(ConstraintViolation::new(format!(
                "Charge sign can only be -1, 0 or 1, found {}",
                charge_sign
            )));
        }
        Ok(Self {
            adduct_string: adduct_string.into(),
            charge,
            charge_sign: charge_sign as i8,
        })
    }

    pub fn adduct_string(&self) -> &str {
        &self.adduct_string
    }

    pub fn charge(&self) -> u32 {
        self.charge
    }

    pub fn charge_sign(&self) -> i8 {
        self.charge_sign
    }
}

impl fmt::Display for Adduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[M{}]", self.adduct_string)?;
        if self.charge == 0 && self.charge_sign == 0 {
            return Ok(());
        }
        let sign = match self.charge_sign {
            1 => "+",
            -1 => "-",
            _ => "",
        };
        write!(f, "{}{}", self.charge, sign)
    }
}

/// Fragment annotation from the GoslinFragments dialect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub name: String,
}

impl Fragment {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Result of parsing one name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LipidAdduct {
    lipid: Option<LipidSpecies>,
    adduct: Option<Adduct>,
    fragment: Option<Fragment>,
}

impl LipidAdduct {
    pub fn new(lipid: Option<LipidSpecies>, adduct: Option<Adduct>, fragment: Option<Fragment>) -> Self {
        Self {
            lipid,
            adduct,
            fragment,
        }
    }

    pub fn lipid(&self) -> Option<&LipidSpecies> {
        self.lipid.as_ref()
    }

    pub fn adduct(&self) -> Option<&Adduct> {
        self.adduct.as_ref()
    }

    pub fn fragment(&self) -> Option<&Fragment> {
        self.fragment.as_ref()
    }

    /// Lipid text at `level` followed by the adduct and fragment, if any
    pub fn render(&self, level: LipidLevel, normalized: bool) -> Result<String, RenderError> {
        let mut text = match &self.lipid {
            Some(lipid) if normalized => crate::render::render_normalized(lipid, level)?,
            Some(lipid) => crate::render::render(lipid, level)?,
            None => String::new(),
        };
        if let Some(adduct) = &self.adduct {
            text.push_str(&adduct.to_string());
        }
        if let Some(fragment) = &self.fragment {
            text.push_str(" - ");
            text.push_str(&fragment.name);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_sign_range() {
        assert!(Adduct::new("+H", 1, 1).is_ok());
        assert!(Adduct::new("+H", 1, 0).is_ok());
        assert!(Adduct::new("-H", 1, -1).is_ok());
        assert!(Adduct::new("+H", 1, 2).is_err());
        assert!(Adduct::new("+H", 1, -2).is_err());
    }

    #[test]
    fn test_adduct_display() {
        assert_eq!(Adduct::new("+H", 1, 1).unwrap().to_string(), "[M+H]1+");
        assert_eq!(Adduct::new("-H", 1, -1).unwrap().to_string(), "[M-H]1-");
        assert_eq!(Adduct::new("+NH4", 0, 0).unwrap().to_string(), "[M+NH4]");
    }

    #[test]
    fn test_empty_result_renders_empty() {
        let result = LipidAdduct::default();
        assert!(result.lipid().is_none());
        assert_eq!(result.render(LipidLevel::Species, false).unwrap(), "");
    }
}
