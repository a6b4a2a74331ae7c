//! Span-accurate token stream
//!
//! Keeps every lexed token, including invalid characters, with its original
//! span, and navigates only over the significant ones.

use crate::{
    tokens::token::Token,
    utils::{Position, Span, Spanned},
};

/// A token with span information
pub type SpannedToken = Spanned<Token>;

#[derive(Debug, Clone)]
pub struct TokenStream {
    /// All tokens with original spans
    all_tokens: Vec<SpannedToken>,
    /// Indices into all_tokens for significant tokens
    significant_indices: Vec<usize>,
    /// Current position in significant_indices
    position: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        let mut stream = Self {
            all_tokens: tokens,
            significant_indices: Vec::new(),
            position: 0,
        };
        stream.rebuild_significant_indices();
        stream
    }

    fn rebuild_significant_indices(&mut self) {
        self.significant_indices = self
            .all_tokens
            .iter()
            .enumerate()
            .filter(|(_, spanned)| spanned.value.is_significant())
            .map(|(index, _)| index)
            .collect();

        crate::log_debug!("Token stream built",
            "total_tokens" => self.all_tokens.len(),
            "significant_tokens" => self.significant_indices.len(),
            "eof_found" => self.has_eof()
        );

        self.position = 0;
    }

    // === CORE NAVIGATION ===

    pub fn current(&self) -> Option<&SpannedToken> {
        self.peek_ahead(0)
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.current().map(|spanned| &spanned.value)
    }

    pub fn current_span(&self) -> Option<Span> {
        self.current().map(|spanned| spanned.span)
    }

    pub fn peek(&self) -> Option<&SpannedToken> {
        self.peek_ahead(1)
    }

    /// Peek ahead by n positions in significant tokens
    pub fn peek_ahead(&self, n: usize) -> Option<&SpannedToken> {
        self.significant_indices
            .get(self.position + n)
            .and_then(|&original_index| self.all_tokens.get(original_index))
    }

    pub fn peek_token(&self, n: usize) -> Option<&Token> {
        self.peek_ahead(n).map(|spanned| &spanned.value)
    }

    pub fn advance(&mut self) -> Option<&SpannedToken> {
        if self.position < self.significant_indices.len() {
            self.position += 1;
        }
        self.current()
    }

    /// True once the Eof token (or the end of the stream) is reached
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_token(), None | Some(Token::Eof))
    }

    pub fn len(&self) -> usize {
        self.significant_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.significant_indices.is_empty()
    }

    // === SPANS ===

    /// Span from the token at `start_position` up to the previous token
    pub fn span_from(&self, start_position: usize) -> Span {
        let end_position = self.position.saturating_sub(1).max(start_position);
        self.span_range(start_position, end_position)
    }

    pub fn span_at_position(&self, position: usize) -> Option<Span> {
        self.significant_indices
            .get(position)
            .and_then(|&original_index| self.all_tokens.get(original_index))
            .map(|spanned| spanned.span)
    }

    pub fn span_range(&self, start_pos: usize, end_pos: usize) -> Span {
        match (self.span_at_position(start_pos), self.span_at_position(end_pos)) {
            (Some(start), Some(end)) => start.merge(end),
            (Some(start), None) => start,
            (None, Some(end)) => end,
            (None, None) => self.end_span(),
        }
    }

    /// Zero-width span after the last token
    pub fn end_span(&self) -> Span {
        self.all_tokens
            .last()
            .map(|spanned| Span::empty_at(spanned.span.end))
            .unwrap_or_else(|| Span::empty_at(Position::start()))
    }

    // === MATCHING ===

    pub fn check(&self, expected: &Token) -> bool {
        self.current_token()
            .map(|token| std::mem::discriminant(token) == std::mem::discriminant(expected))
            .unwrap_or(false)
    }

    pub fn consume_if<F>(&mut self, predicate: F) -> Option<SpannedToken>
    where
        F: FnOnce(&Token) -> bool,
    {
        if let Some(token) = self.current_token() {
            if predicate(token) {
                let result = self.current().cloned();
                self.advance();
                return result;
            }
        }
        None
    }

    pub fn advance_if_matches(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    // === CHECKPOINTS ===

    pub fn save_position(&self) -> usize {
        self.position
    }

    pub fn restore_position(&mut self, saved_position: usize) {
        self.position = saved_position.min(self.significant_indices.len());
    }

    // === ITERATION ===

    pub fn all_tokens(&self) -> &[SpannedToken] {
        &self.all_tokens
    }

    pub fn iter_significant(&self) -> impl Iterator<Item = &SpannedToken> {
        self.significant_indices
            .iter()
            .filter_map(|&i| self.all_tokens.get(i))
    }

    pub fn remaining_tokens(&self) -> impl Iterator<Item = &SpannedToken> {
        self.significant_indices
            .iter()
            .skip(self.position)
            .filter_map(|&i| self.all_tokens.get(i))
    }

    // === DIAGNOSTICS ===

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining_count(&self) -> usize {
        self.significant_indices.len().saturating_sub(self.position)
    }

    pub fn diagnostic(&self) -> String {
        let current_info = match self.current() {
            Some(current) => format!("'{}' at {}", current.value, current.span),
            None => "<EOF>".to_string(),
        };
        format!(
            "TokenStream(pos: {}/{}, current: {})",
            self.position,
            self.significant_indices.len(),
            current_info
        )
    }

    pub fn has_eof(&self) -> bool {
        self.significant_indices
            .last()
            .and_then(|&last_idx| self.all_tokens.get(last_idx))
            .map(|token| matches!(token.value, Token::Eof))
            .unwrap_or(false)
    }
}

/// Builds streams by hand, used where tokens are synthesized rather than lexed
#[derive(Debug)]
pub struct TokenStreamBuilder {
    tokens: Vec<SpannedToken>,
    current_position: Position,
}

impl TokenStreamBuilder {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            current_position: Position::start(),
        }
    }

    /// Add a token spanning `text`
    pub fn push_token(mut self, token: Token, text: &str) -> Self {
        let start = self.current_position;
        let end = start.advance_str(text);
        self.tokens.push(SpannedToken::new(token, Span::new(start, end)));
        self.current_position = end;
        self
    }

    pub fn build(mut self) -> TokenStream {
        if !matches!(self.tokens.last().map(|t| &t.value), Some(Token::Eof)) {
            let at = Span::empty_at(self.current_position);
            self.tokens.push(SpannedToken::new(Token::Eof, at));
        }
        TokenStream::new(self.tokens)
    }
}

impl Default for TokenStreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TokenStream {
        TokenStreamBuilder::new()
            .push_token(Token::Letters("PE".into()), "PE")
            .push_token(Token::Invalid('*'), "*")
            .push_token(Token::Space, " ")
            .push_token(Token::Digits("18".into()), "18")
            .build()
    }

    #[test]
    fn test_invalid_tokens_are_skipped() {
        let mut stream = sample();
        assert_eq!(stream.len(), 4);
        assert!(stream.check(&Token::Letters(String::new())));
        stream.advance();
        assert_eq!(stream.current_token(), Some(&Token::Space));
        assert_eq!(stream.all_tokens().len(), 5);
    }

    #[test]
    fn test_spans_survive_filtering() {
        let mut stream = sample();
        stream.advance();
        let span = stream.current_span().unwrap();
        assert_eq!(span.start.offset, 3);
        stream.advance();
        assert_eq!(stream.current_span().unwrap().start.offset, 4);
    }

    #[test]
    fn test_checkpoint_restore() {
        let mut stream = sample();
        let saved = stream.save_position();
        stream.advance();
        stream.advance();
        stream.restore_position(saved);
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn test_end_detection() {
        let mut stream = sample();
        assert!(stream.has_eof());
        while !stream.is_at_end() {
            stream.advance();
        }
        assert_eq!(stream.remaining_count(), 1);
        assert!(stream.consume_if(|t| matches!(t, Token::Digits(_))).is_none());
    }
}
