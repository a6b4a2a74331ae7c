//! Recursive-descent parser for one lipid name
//!
//! Builders report failures as `Err`; the parser records them, resynchronizes
//! at the next chain boundary and keeps going until the error limit.

use crate::config::compile_time::syntax::{MAX_RECOVERY_SCAN_TOKENS, MAX_SYNTAX_ERRORS};
use crate::config::runtime::ParserPreferences;
use crate::grammar::ast::nodes::LipidTree;
use crate::grammar::builders::{parse_lipid_tree, Parser};
use crate::grammar::dialect::{Dialect, DialectRules};
use crate::logging::codes;
use crate::syntax::SyntaxError;
use crate::tokens::{Token, TokenStream};
use crate::utils::Span;
use crate::{log_debug, log_error, log_success, log_warning};

const MAX_CONTEXT_STACK_DEPTH: usize = 16;

pub struct LipidParser<'a> {
    source: &'a str,
    tokens: TokenStream,
    dialect: Dialect,
    context_stack: Vec<String>,
    errors: Vec<SyntaxError>,
    preferences: ParserPreferences,
}

impl<'a> LipidParser<'a> {
    pub fn new(source: &'a str, tokens: TokenStream, dialect: Dialect) -> Self {
        Self::with_preferences(source, tokens, dialect, ParserPreferences::default())
    }

    pub fn with_preferences(
        source: &'a str,
        tokens: TokenStream,
        dialect: Dialect,
        preferences: ParserPreferences,
    ) -> Self {
        log_debug!("Creating lipid parser",
            "tokens" => tokens.len(),
            "dialect" => dialect.as_str()
        );

        Self {
            source,
            tokens,
            dialect,
            context_stack: Vec::new(),
            errors: Vec::new(),
            preferences,
        }
    }

    /// Build the parse tree, or every error found on the way
    pub fn parse(mut self) -> Result<LipidTree, Vec<SyntaxError>> {
        if !self.tokens.has_eof() {
            return Err(vec![SyntaxError::internal_parser_error(
                "token stream missing end of input marker",
            )]);
        }

        match parse_lipid_tree(&mut self) {
            Ok(tree) if self.errors.is_empty() => {
                if self.preferences.log_parse_tree {
                    log_debug!("Parse tree built",
                        "dialect" => self.dialect.as_str(),
                        "tree" => format!("{:?}", tree)
                    );
                }
                log_success!(codes::success::PARSE_TREE_COMPLETE, "Parse tree built",
                    "chains" => tree.chain_count()
                );
                Ok(tree)
            }
            Ok(_) => Err(self.errors),
            Err(error) => {
                self.record_error(error);
                Err(self.errors)
            }
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }
}

impl Parser for LipidParser<'_> {
    fn current_token(&self) -> Option<&Token> {
        self.tokens.current_token()
    }

    fn peek_token(&self, n: usize) -> Option<&Token> {
        self.tokens.peek_token(n)
    }

    fn advance(&mut self) {
        self.tokens.advance();
    }

    fn position(&self) -> usize {
        self.tokens.position()
    }

    fn current_span(&self) -> Span {
        self.tokens
            .current_span()
            .unwrap_or_else(|| self.tokens.end_span())
    }

    fn span_from(&self, start: usize) -> Span {
        self.tokens.span_from(start)
    }

    fn rules(&self) -> &'static DialectRules {
        self.dialect.rules()
    }

    fn source(&self) -> &str {
        self.source
    }

    fn record_error(&mut self, error: SyntaxError) {
        if !self.preferences.collect_all_errors && !self.errors.is_empty() {
            return;
        }
        if self.errors.len() >= MAX_SYNTAX_ERRORS {
            if !matches!(self.errors.last(), Some(SyntaxError::TooManyErrors { .. })) {
                let span = self.current_span();
                log_warning!(code = codes::syntax::TOO_MANY_ERRORS, "Syntax error limit reached",
                    "limit" => MAX_SYNTAX_ERRORS
                );
                self.errors.push(SyntaxError::TooManyErrors { span });
            }
            return;
        }

        log_error!(error.error_code(), "Syntax error",
            span = error.span().unwrap_or_else(|| self.current_span()),
            "rule" => self.current_rule(),
            "error" => error.to_string()
        );
        self.errors.push(error);
    }

    fn synchronize(&mut self) {
        let start = self.tokens.position();
        let mut scanned = 0;

        while scanned < MAX_RECOVERY_SCAN_TOKENS {
            match self.tokens.current_token() {
                Some(token) if token.is_sync_point() => break,
                None => break,
                Some(_) => {
                    self.tokens.advance();
                    scanned += 1;
                }
            }
        }

        log_debug!("Recovered after syntax error",
            "skipped_span" => format!("{}", self.tokens.span_range(start, self.tokens.position())),
            "tokens_skipped" => scanned
        );
    }

    fn can_recover(&self) -> bool {
        self.preferences.collect_all_errors && self.errors.len() < MAX_SYNTAX_ERRORS
    }

    fn push_context(&mut self, rule: &str) {
        if self.context_stack.len() >= MAX_CONTEXT_STACK_DEPTH {
            log_warning!("Context stack depth limit reached, dropping oldest context");
            self.context_stack.remove(0);
        }
        self.context_stack.push(rule.to_string());
    }

    fn pop_context(&mut self) {
        self.context_stack.pop();
    }

    fn current_rule(&self) -> String {
        if self.context_stack.is_empty() {
            "lipid".to_string()
        } else {
            self.context_stack.join(" -> ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ast::nodes::*;
    use crate::lexical::tokenize;
    use assert_matches::assert_matches;

    fn parse(dialect: Dialect, source: &str) -> Result<LipidTree, Vec<SyntaxError>> {
        let tokenized = tokenize(source).unwrap();
        assert!(!tokenized.has_errors(), "lexical errors in {}", source);
        LipidParser::new(source, tokenized.stream, dialect).parse()
    }

    fn lipid(tree: LipidTree) -> LipidNode {
        match tree {
            LipidTree::Lipid(node) => node,
            other => panic!("expected lipid, got {:?}", other),
        }
    }

    #[test]
    fn test_goslin_structural_chains() {
        let node = lipid(parse(Dialect::Goslin, "PE 18:0/16:1(9Z)").unwrap());
        assert_eq!(node.head_group.text, "PE");
        let chains = node.chains.unwrap();
        assert_matches!(chains, ChainList::Sorted(_));
        assert_eq!(chains.len(), 2);

        let second = &chains.chains()[1];
        assert_eq!(second.carbon.as_ref().unwrap().value, "16");
        let positions = second.db_positions.as_ref().unwrap();
        assert_eq!(positions.positions[0].number.value, "9");
        assert_eq!(positions.positions[0].cis_trans.as_ref().unwrap().value, "Z");
    }

    #[test]
    fn test_lipid_maps_lcb_and_ether() {
        let node = lipid(parse(Dialect::LipidMaps, "SM(d18:1/16:0)").unwrap());
        let lcb = &node.chains.as_ref().unwrap().chains()[0];
        assert_eq!(lcb.lcb_hydroxyl.as_ref().unwrap().value, "d");

        let node = lipid(parse(Dialect::LipidMaps, "PE(P-18:0/16:2)").unwrap());
        let first = &node.chains.as_ref().unwrap().chains()[0];
        assert_eq!(first.ether.as_ref().unwrap().value, "P");
    }

    #[test]
    fn test_multi_word_head_group() {
        let node = lipid(parse(Dialect::Goslin, "CDP DG 16:0/18:1").unwrap());
        assert_eq!(node.head_group.text, "CDP DG");
    }

    #[test]
    fn test_swiss_space_before_paren() {
        let node = lipid(parse(Dialect::SwissLipids, "MHDG (18:3/16:1)").unwrap());
        assert_eq!(node.head_group.text, "MHDG");
        assert_eq!(node.chains.unwrap().len(), 2);

        let errors = parse(Dialect::LipidMaps, "MHDG (18:3/16:1)").unwrap_err();
        assert_matches!(errors[0], SyntaxError::GrammarViolation { .. });
    }

    #[test]
    fn test_goslin_adduct_and_hydroxyl() {
        let node = lipid(parse(Dialect::Goslin, "Cer 18:1;2/16:0[M+H]1+").unwrap());
        let lcb = &node.chains.as_ref().unwrap().chains()[0];
        assert_eq!(lcb.hydroxyl.as_ref().unwrap().value, "2");
        let adduct = node.adduct.unwrap();
        assert_eq!(adduct.adduct, "+H");
        assert_eq!(adduct.charge.unwrap().value, "1");
        assert_eq!(adduct.sign.unwrap().value, '+');
    }

    #[test]
    fn test_fragment_suffix() {
        let node = lipid(parse(Dialect::GoslinFragments, "PE 18:0/16:1 - HG(PE,141)").unwrap());
        assert_eq!(node.fragment.unwrap().name, "HG(PE,141)");

        assert!(parse(Dialect::Goslin, "PE 18:0/16:1 - HG(PE,141)").is_err());
    }

    #[test]
    fn test_mediator_whole_name() {
        let tree = parse(Dialect::LipidMaps, "11,12-DiHETrE").unwrap();
        assert_matches!(tree, LipidTree::Mediator(MediatorNode { ref name, .. }) if name == "11,12-DiHETrE");
    }

    #[test]
    fn test_missing_cis_trans_depends_on_dialect() {
        let errors = parse(Dialect::LipidMaps, "PC(16:0/18:1(9))").unwrap_err();
        assert_matches!(errors[0], SyntaxError::GrammarViolation { .. });

        let node = lipid(parse(Dialect::Hmdb, "PC(16:0/18:1(9))").unwrap());
        let chains = node.chains.unwrap();
        let second = &chains.chains()[1];
        assert!(second.db_positions.as_ref().unwrap().positions[0].cis_trans.is_none());
    }

    #[test]
    fn test_errors_collected_across_chains() {
        let errors = parse(Dialect::Goslin, "TG 18/16:x/14").unwrap_err();
        assert!(errors.len() >= 2, "got {:?}", errors);
        assert!(errors.iter().all(|e| e.span().is_some()));
    }

    #[test]
    fn test_mixed_separators_rejected() {
        let errors = parse(Dialect::Goslin, "TG 14:0/16:0_18:1").unwrap_err();
        assert_matches!(
            &errors[0],
            SyntaxError::GrammarViolation { message, .. } if message.contains("mixed")
        );
    }

    #[test]
    fn test_first_error_only_when_not_collecting() {
        let tokenized = tokenize("TG 18/16/14").unwrap();
        let preferences = ParserPreferences {
            collect_all_errors: false,
            log_parse_tree: false,
        };
        let errors = LipidParser::with_preferences("TG 18/16/14", tokenized.stream, Dialect::Goslin, preferences)
            .parse()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
    }
}
