//! Top-level builders: head group, chain section, adduct, fragment
//!
//! lipid ::= mediator | head_group [pip_pos] [chains] [adduct] [fragment]

use super::atomic::{at_adduct_start, parse_bracketed_text, with_context, Parser};
use super::chains::{chain_starts_at, parse_chain_list};
use crate::domain::LipidClass;
use crate::grammar::ast::nodes::*;
use crate::grammar::dialect::HeadGroupLayout;
use crate::syntax::{SyntaxError, SyntaxResult};
use crate::tokens::Token;
use crate::utils::Spanned;

/// True when the whole name is one of the trivial fatty acid names
pub fn is_mediator_name(name: &str) -> bool {
    let name = name.trim();
    name != LipidClass::Fa.abbreviation() && LipidClass::Fa.matches_abbreviation(name)
}

/// Entry point for one lipid name
pub fn parse_lipid_tree(parser: &mut dyn Parser) -> SyntaxResult<LipidTree> {
    if is_mediator_name(parser.source()) {
        return parse_mediator(parser).map(LipidTree::Mediator);
    }

    let start = parser.position();
    let head_group = parse_head_group(parser)?;

    let pip_position = if parser.rules().pip_positions && parser.check(&Token::LBracket) {
        Some(parse_bracketed_text(parser)?)
    } else {
        None
    };

    let chains = parse_chain_section(parser)?;
    let adduct = parse_optional_adduct(parser)?;
    let fragment = parse_optional_fragment(parser)?;

    if !parser.is_at_end() {
        let error = parser.unexpected("end of input");
        parser.record_error(error);
    }

    Ok(LipidTree::Lipid(LipidNode {
        head_group,
        pip_position,
        chains,
        adduct,
        fragment,
        span: parser.span_from(start),
    }))
}

// === MEDIATOR ===

fn parse_mediator(parser: &mut dyn Parser) -> SyntaxResult<MediatorNode> {
    let start = parser.position();
    let name = parser.source().trim().to_string();
    while !parser.is_at_end() {
        parser.advance();
    }
    Ok(MediatorNode {
        name,
        span: parser.span_from(start),
    })
}

// === HEAD GROUP ===

/// head_group ::= letters (letters | digits | "-" | "'" | bracketed | " " letters)*
pub fn parse_head_group(parser: &mut dyn Parser) -> SyntaxResult<HeadGroupNode> {
    with_context(parser, "head group", |parser| {
        let start = parser.position();
        if !matches!(parser.current_token(), Some(Token::Letters(_))) {
            return Err(parser.unexpected("head group"));
        }

        let layout = parser.rules().layout;
        let mut text = String::new();

        loop {
            match parser.current_token() {
                Some(Token::Letters(_)) | Some(Token::Digits(_)) | Some(Token::Apostrophe) => {}
                Some(Token::Minus) if !matches!(parser.peek_token(1), Some(Token::Space)) => {}
                Some(Token::Space) => {
                    if head_group_ends_at_space(parser, layout)? {
                        break;
                    }
                }
                Some(Token::LBracket) => {
                    if at_adduct_start(parser) || parser.rules().pip_positions {
                        break;
                    }
                    let label = parse_bracketed_text(parser)?;
                    text.push('[');
                    text.push_str(&label.value);
                    text.push(']');
                    continue;
                }
                _ => break,
            }

            if let Some(token) = parser.current_token() {
                text.push_str(&token.as_source_string());
            }
            parser.advance();
        }

        Ok(HeadGroupNode {
            text,
            span: parser.span_from(start),
        })
    })
}

/// Decide at a space whether the head group is complete
///
/// Spaces inside multi-word head groups (`CDP DG`) are kept. A space before
/// `(` is consumed here when the dialect allows it.
fn head_group_ends_at_space(parser: &mut dyn Parser, layout: HeadGroupLayout) -> SyntaxResult<bool> {
    match layout {
        HeadGroupLayout::Spaced => Ok(chain_starts_at(parser, 1)
            || matches!(
                parser.peek_token(1),
                None | Some(Token::Eof) | Some(Token::Minus) | Some(Token::LBracket) | Some(Token::Space)
            )),
        HeadGroupLayout::Parenthesized { space_before_paren } => {
            match parser.peek_token(1) {
                Some(Token::LParen) => {
                    if !space_before_paren {
                        let error = SyntaxError::grammar_violation(
                            &parser.current_rule(),
                            "space between head group and '(' is not part of this dialect",
                            parser.current_span(),
                        );
                        parser.record_error(error);
                    }
                    parser.advance();
                    Ok(true)
                }
                Some(Token::Letters(_)) | Some(Token::Digits(_)) => Ok(false),
                _ => Ok(true),
            }
        }
    }
}

// === CHAIN SECTION ===

fn parse_chain_section(parser: &mut dyn Parser) -> SyntaxResult<Option<ChainList>> {
    with_context(parser, "chains", |parser| match parser.rules().layout {
        HeadGroupLayout::Spaced => {
            if parser.check(&Token::Space) && chain_starts_at(parser, 1) {
                parser.advance();
                parse_chain_list(parser)
            } else {
                Ok(None)
            }
        }
        HeadGroupLayout::Parenthesized { .. } => {
            if !parser.check(&Token::LParen) {
                return Ok(None);
            }
            parser.advance();
            let chains = parse_chain_list(parser)?;
            parser.expect(Token::RParen)?;
            Ok(chains)
        }
    })
}

// === ADDUCT ===

fn parse_optional_adduct(parser: &mut dyn Parser) -> SyntaxResult<Option<AdductNode>> {
    if !parser.rules().adducts {
        return Ok(None);
    }
    if parser.check(&Token::Space)
        && matches!(parser.peek_token(1), Some(Token::LBracket))
        && matches!(parser.peek_token(2), Some(Token::Letters(letters)) if letters.starts_with('M'))
    {
        parser.advance();
    }
    if !at_adduct_start(parser) {
        return Ok(None);
    }
    parse_adduct(parser).map(Some)
}

/// adduct ::= "[M" adduct_text "]" [charge] [sign]
pub fn parse_adduct(parser: &mut dyn Parser) -> SyntaxResult<AdductNode> {
    with_context(parser, "adduct", |parser| {
        let start = parser.position();
        parser.expect(Token::LBracket)?;
        let molecule = parser.expect_letters("'M'")?;

        let mut adduct = molecule.value.chars().skip(1).collect::<String>();
        loop {
            match parser.current_token() {
                Some(Token::Plus) | Some(Token::Minus) | Some(Token::Letters(_)) | Some(Token::Digits(_)) => {
                    if let Some(token) = parser.current_token() {
                        adduct.push_str(&token.as_source_string());
                    }
                    parser.advance();
                }
                _ => break,
            }
        }
        parser.expect(Token::RBracket)?;

        let charge = match parser.current_token() {
            Some(Token::Digits(_)) => Some(parser.expect_digits("charge")?),
            _ => None,
        };
        let sign = match parser.current_token() {
            Some(Token::Plus) => Some('+'),
            Some(Token::Minus) => Some('-'),
            _ => None,
        }
        .map(|sign| {
            let spanned = Spanned::new(sign, parser.current_span());
            parser.advance();
            spanned
        });

        Ok(AdductNode {
            adduct,
            charge,
            sign,
            span: parser.span_from(start),
        })
    })
}

// === FRAGMENT ===

fn parse_optional_fragment(parser: &mut dyn Parser) -> SyntaxResult<Option<FragmentNode>> {
    let at_fragment = parser.rules().fragments
        && parser.check(&Token::Space)
        && matches!(parser.peek_token(1), Some(Token::Minus))
        && matches!(parser.peek_token(2), Some(Token::Space));
    if !at_fragment {
        return Ok(None);
    }

    with_context(parser, "fragment", |parser| {
        for _ in 0..3 {
            parser.advance();
        }
        let start = parser.position();
        if parser.is_at_end() {
            return Err(parser.unexpected("fragment name"));
        }

        let mut name = String::new();
        while let Some(token) = parser.current_token() {
            if matches!(token, Token::Eof) {
                break;
            }
            name.push_str(&token.as_source_string());
            parser.advance();
        }

        Ok(Some(FragmentNode {
            name,
            span: parser.span_from(start),
        }))
    })
}
