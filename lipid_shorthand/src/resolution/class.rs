//! Head group to lipid class

use super::error::{ResolutionError, ResolutionResult};
use crate::domain::{lookup_class, LipidClass};
use crate::grammar::ast::nodes::HeadGroupNode;
use crate::grammar::dialect::DialectRules;
use crate::logging::codes;
use crate::log_warning;
use crate::utils::Spanned;

/// Look up the class of a head group
///
/// An unknown head group is valid and yields `None`; head groups the dialect
/// marks as unsupported and phosphate positions are fidelity gaps.
pub fn resolve_class(
    head_group: &HeadGroupNode,
    pip_position: Option<&Spanned<String>>,
    rules: &DialectRules,
) -> ResolutionResult<Option<LipidClass>> {
    if rules.is_unsupported_head_group(&head_group.text) {
        return Err(ResolutionError::unsupported_feature(
            &format!("head group '{}'", head_group.text),
            head_group.span,
        ));
    }

    if let Some(position) = pip_position {
        return Err(ResolutionError::unsupported_feature(
            &format!("phosphate position [{}] on '{}'", position.value, head_group.text),
            position.span,
        ));
    }

    let class = lookup_class(&head_group.text);
    if class.is_none() {
        log_warning!(code = codes::resolution::UNKNOWN_HEAD_GROUP, "Head group not in class table",
            "head_group" => head_group.text.as_str()
        );
    }
    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::dialect::Dialect;
    use crate::utils::{Position, Span};
    use assert_matches::assert_matches;

    fn head_group(text: &str) -> HeadGroupNode {
        HeadGroupNode {
            text: text.to_string(),
            span: Span::empty_at(Position::start()),
        }
    }

    #[test]
    fn test_known_and_unknown_head_groups() {
        let rules = Dialect::LipidMaps.rules();
        assert_eq!(resolve_class(&head_group("CE"), None, rules).unwrap(), Some(LipidClass::ChE));
        assert_eq!(resolve_class(&head_group("XYZ"), None, rules).unwrap(), None);
    }

    #[test]
    fn test_unsupported_head_groups() {
        assert_matches!(
            resolve_class(&head_group("PAT16"), None, Dialect::LipidMaps.rules()),
            Err(ResolutionError::UnsupportedFeature { .. })
        );

        let position = Spanned::new("3'".to_string(), Span::empty_at(Position::start()));
        assert_matches!(
            resolve_class(&head_group("PIP"), Some(&position), Dialect::LipidMaps.rules()),
            Err(ResolutionError::UnsupportedFeature { .. })
        );
    }
}
