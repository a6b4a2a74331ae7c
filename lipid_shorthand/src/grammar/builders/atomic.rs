//! Atomic builders: numbers, prefixes, double bond positions
//!
//! Builders only look at tokens. Whether `i-` is a valid ether prefix or
//! `99999999999` fits an integer is decided by the resolver.

use crate::config::compile_time::resolution::MAX_DOUBLE_BOND_POSITIONS;
use crate::grammar::ast::nodes::*;
use crate::grammar::dialect::DialectRules;
use crate::syntax::{SyntaxError, SyntaxResult};
use crate::tokens::Token;
use crate::utils::{Span, Spanned};

/// Parser interface the builders drive
pub trait Parser {
    // === BASIC NAVIGATION ===
    fn current_token(&self) -> Option<&Token>;
    fn peek_token(&self, n: usize) -> Option<&Token>;
    fn advance(&mut self);
    fn position(&self) -> usize;

    // === SPAN REPORTING ===
    fn current_span(&self) -> Span;
    /// Span from the token at `start` through the last consumed token
    fn span_from(&self, start: usize) -> Span;

    // === DIALECT ===
    fn rules(&self) -> &'static DialectRules;
    fn source(&self) -> &str;

    // === ERROR RECOVERY ===
    fn record_error(&mut self, error: SyntaxError);
    /// Skip to the next chain separator, closing paren or end of input
    fn synchronize(&mut self);
    fn can_recover(&self) -> bool;
    fn push_context(&mut self, rule: &str);
    fn pop_context(&mut self);
    fn current_rule(&self) -> String;

    // === EXPECTATION METHODS ===

    fn is_at_end(&self) -> bool {
        matches!(self.current_token(), None | Some(Token::Eof))
    }

    fn check(&self, expected: &Token) -> bool {
        self.current_token().is_some_and(|token| token == expected)
    }

    /// Error for the current token, end of input aware
    fn unexpected(&self, expected: &str) -> SyntaxError {
        let rule = self.current_rule();
        match self.current_token() {
            None | Some(Token::Eof) => {
                SyntaxError::unexpected_end_of_input(&rule, expected, self.current_span())
            }
            Some(token) => {
                SyntaxError::unexpected_token(&rule, expected, &token.to_string(), self.current_span())
            }
        }
    }

    fn expect(&mut self, expected: Token) -> SyntaxResult<Span> {
        if self.check(&expected) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.unexpected(&format!("'{}'", expected.as_source_string())))
        }
    }

    fn expect_digits(&mut self, what: &str) -> SyntaxResult<Spanned<String>> {
        match self.current_token() {
            Some(Token::Digits(digits)) => {
                let value = Spanned::new(digits.clone(), self.current_span());
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    fn expect_letters(&mut self, what: &str) -> SyntaxResult<Spanned<String>> {
        match self.current_token() {
            Some(Token::Letters(letters)) => {
                let value = Spanned::new(letters.clone(), self.current_span());
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected(what)),
        }
    }
}

/// Run `build` with `rule` on the context stack, popping it on every exit
pub fn with_context<T, F>(parser: &mut dyn Parser, rule: &str, build: F) -> SyntaxResult<T>
where
    F: FnOnce(&mut dyn Parser) -> SyntaxResult<T>,
{
    parser.push_context(rule);
    let result = build(parser);
    parser.pop_context();
    result
}

// === PREFIXES ===

/// ether ::= letters "-"
pub fn parse_ether_prefix(parser: &mut dyn Parser) -> SyntaxResult<Option<Spanned<String>>> {
    let is_prefix = matches!(parser.current_token(), Some(Token::Letters(_)))
        && matches!(parser.peek_token(1), Some(Token::Minus));
    if !is_prefix {
        return Ok(None);
    }

    let prefix = parser.expect_letters("ether prefix")?;
    parser.expect(Token::Minus)?;
    Ok(Some(prefix))
}

/// lcb ::= letters directly followed by the carbon count, e.g. `d18`
pub fn parse_lcb_hydroxyl(parser: &mut dyn Parser) -> SyntaxResult<Option<Spanned<String>>> {
    let is_lcb = matches!(parser.current_token(), Some(Token::Letters(_)))
        && matches!(parser.peek_token(1), Some(Token::Digits(_)));
    if !is_lcb {
        return Ok(None);
    }

    let letters = parser.expect_letters("long-chain base hydroxyl")?;
    if !parser.rules().lcb_letters {
        let rule = parser.current_rule();
        return Err(SyntaxError::grammar_violation(
            &rule,
            &format!("long-chain base prefix '{}' is not part of this dialect", letters.value),
            letters.span,
        ));
    }
    Ok(Some(letters))
}

// === DOUBLE BONDS ===

/// position ::= number [cis_trans]
pub fn parse_db_position(parser: &mut dyn Parser) -> SyntaxResult<DbPositionNode> {
    let number = parser.expect_digits("double bond position")?;

    let cis_trans = match parser.current_token() {
        Some(Token::Letters(marker)) if marker == "Z" || marker == "E" => {
            Some(parser.expect_letters("cis/trans marker")?)
        }
        Some(Token::Letters(_)) => return Err(parser.unexpected("'Z' or 'E'")),
        _ => None,
    };

    if cis_trans.is_none() && parser.rules().require_cis_trans {
        let rule = parser.current_rule();
        return Err(SyntaxError::grammar_violation(
            &rule,
            &format!("double bond position {} needs a 'Z' or 'E' marker", number.value),
            number.span,
        ));
    }

    Ok(DbPositionNode { number, cis_trans })
}

/// positions ::= "(" [position ("," position)*] ")"
pub fn parse_db_positions(parser: &mut dyn Parser) -> SyntaxResult<Option<DbPositionsNode>> {
    if !parser.check(&Token::LParen) {
        return Ok(None);
    }
    with_context(parser, "double bond positions", |parser| {
        let start = parser.position();
        parser.expect(Token::LParen)?;

        let mut positions = Vec::new();
        if !parser.check(&Token::RParen) {
            loop {
                positions.push(parse_db_position(parser)?);
                if parser.check(&Token::Comma) {
                    parser.advance();
                } else {
                    break;
                }
            }
        }
        parser.expect(Token::RParen)?;
        let span = parser.span_from(start);

        if positions.len() > MAX_DOUBLE_BOND_POSITIONS {
            let rule = parser.current_rule();
            return Err(SyntaxError::grammar_violation(
                &rule,
                &format!(
                    "{} double bond positions exceed the limit of {}",
                    positions.len(),
                    MAX_DOUBLE_BOND_POSITIONS
                ),
                span,
            ));
        }

        Ok(Some(DbPositionsNode { positions, span }))
    })
}

// === SUFFIXES ===

/// hydroxyl ::= ";" number
pub fn parse_hydroxyl_suffix(parser: &mut dyn Parser) -> SyntaxResult<Option<Spanned<String>>> {
    if !parser.check(&Token::Semicolon) {
        return Ok(None);
    }

    if !parser.rules().numeric_hydroxyl {
        let rule = parser.current_rule();
        return Err(SyntaxError::grammar_violation(
            &rule,
            "';' hydroxyl notation is not part of this dialect",
            parser.current_span(),
        ));
    }

    parser.advance();
    parser.expect_digits("hydroxyl count").map(Some)
}

/// Bracketed text up to the closing `]`, returned verbatim without brackets
pub fn parse_bracketed_text(parser: &mut dyn Parser) -> SyntaxResult<Spanned<String>> {
    let open = parser.expect(Token::LBracket)?;
    let mut text = String::new();

    loop {
        match parser.current_token() {
            Some(Token::RBracket) => break,
            None | Some(Token::Eof) => return Err(parser.unexpected("']'")),
            Some(token) => {
                text.push_str(&token.as_source_string());
                parser.advance();
            }
        }
    }

    let close = parser.expect(Token::RBracket)?;
    Ok(Spanned::new(text, open.merge(close)))
}

/// True when `[` opens an adduct (`[M...`) rather than a label
pub fn at_adduct_start(parser: &dyn Parser) -> bool {
    parser.check(&Token::LBracket)
        && matches!(parser.peek_token(1), Some(Token::Letters(letters)) if letters.starts_with('M'))
}
