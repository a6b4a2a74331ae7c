//! Chain builders
//!
//! A failed chain is recorded and skipped up to the next separator so the
//! remaining chains are still checked.

use super::atomic::{
    at_adduct_start, parse_bracketed_text, parse_db_positions, parse_ether_prefix,
    parse_hydroxyl_suffix, parse_lcb_hydroxyl, with_context, Parser,
};
use crate::config::compile_time::syntax::MAX_CHAIN_COUNT;
use crate::grammar::ast::nodes::*;
use crate::syntax::{SyntaxError, SyntaxResult};
use crate::tokens::Token;

/// chain ::= [ether "-"] [lcb] carbon ":" db [positions] [";" hydroxyl] [heavy]
pub fn parse_chain(parser: &mut dyn Parser) -> SyntaxResult<ChainNode> {
    with_context(parser, "chain", |parser| {
        let start = parser.position();

        let ether = parse_ether_prefix(parser)?;
        let lcb_hydroxyl = parse_lcb_hydroxyl(parser)?;
        let carbon = parser.expect_digits("carbon count")?;
        parser.expect(Token::Colon)?;
        let double_bonds = parser.expect_digits("double bond count")?;
        let db_positions = parse_db_positions(parser)?;
        let hydroxyl = parse_hydroxyl_suffix(parser)?;

        let heavy = if parser.rules().heavy_labels
            && parser.check(&Token::LBracket)
            && !at_adduct_start(parser)
        {
            Some(parse_bracketed_text(parser)?)
        } else {
            None
        };

        Ok(ChainNode {
            ether,
            lcb_hydroxyl,
            carbon: Some(carbon),
            double_bonds: Some(double_bonds),
            db_positions,
            hydroxyl,
            heavy,
            span: parser.span_from(start),
        })
    })
}

/// chains ::= chain (("/" | "_") chain)*
///
/// Mixed separators and chain counts above the limit are recorded as errors
/// but do not stop the walk.
pub fn parse_chain_list(parser: &mut dyn Parser) -> SyntaxResult<Option<ChainList>> {
    let start = parser.position();
    let mut chains = Vec::new();
    let mut separator: Option<ChainSeparator> = None;

    loop {
        match parse_chain(parser) {
            Ok(chain) => chains.push(chain),
            Err(error) => {
                parser.record_error(error);
                if !parser.can_recover() {
                    return Ok(None);
                }
                parser.synchronize();
            }
        }

        let next = match parser.current_token() {
            Some(Token::Slash) => ChainSeparator::Sorted,
            Some(Token::Underscore) => ChainSeparator::Unsorted,
            _ => break,
        };

        match separator {
            Some(first) if first != next => {
                let error = SyntaxError::grammar_violation(
                    &parser.current_rule(),
                    &format!("separator '{}' mixed with '{}'", next, first),
                    parser.current_span(),
                );
                parser.record_error(error);
                if !parser.can_recover() {
                    return Ok(None);
                }
            }
            Some(_) => {}
            None => separator = Some(next),
        }
        parser.advance();
    }

    let count = chains.len();
    if count > MAX_CHAIN_COUNT {
        let span = parser.span_from(start);
        parser.record_error(SyntaxError::TooManyChains {
            count,
            max: MAX_CHAIN_COUNT,
            span,
        });
    }

    Ok(ChainList::from_chains(chains, separator))
}

/// True when the tokens `offset` places ahead of the cursor can open a chain
///
/// Used by the spaced layout to find where the head group ends.
pub fn chain_starts_at(parser: &dyn Parser, offset: usize) -> bool {
    match (parser.peek_token(offset), parser.peek_token(offset + 1)) {
        (Some(Token::Digits(_)), _) => true,
        (Some(Token::Letters(_)), Some(Token::Minus)) => {
            matches!(parser.peek_token(offset + 2), Some(Token::Digits(_)))
        }
        (Some(Token::Letters(letters)), Some(Token::Digits(_))) => letters.chars().count() == 1,
        _ => false,
    }
}
