//! Token type produced by the tokenizer.
//!
//! A [`Token`] is one lexical unit cut from an input line, tagged with the
//! name of the tokenizer rule that matched it. Tokens are immutable once
//! created; later stages either pass them on or replace them by a
//! [`Word`](crate::analysis::word::Word).
//!
//! # Examples
//!
//! ```
//! use termflow::analysis::token::Token;
//!
//! let token = Token::with_offsets("Indexierung", "WORD", 1, 12, 23);
//! assert_eq!(token.text(), "Indexierung");
//! assert_eq!(token.rule(), "WORD");
//! assert_eq!(token.start_offset(), 12);
//! assert_eq!(token.len(), 11);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The matched text
    text: String,

    /// Name of the tokenizer rule that produced this token
    rule: String,

    /// Index of the token within its line (0-based)
    position: usize,

    /// Byte offset where this token starts in the line
    start_offset: usize,

    /// Byte offset where this token ends in the line
    end_offset: usize,
}

impl Token {
    /// Create a new token with the given text and rule name.
    pub fn new<S: Into<String>, R: Into<String>>(text: S, rule: R) -> Self {
        let text = text.into();
        let end_offset = text.len();
        Token {
            text,
            rule: rule.into(),
            position: 0,
            start_offset: 0,
            end_offset,
        }
    }

    /// Create a new token with text, rule, position and byte offsets.
    pub fn with_offsets<S: Into<String>, R: Into<String>>(
        text: S,
        rule: R,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            rule: rule.into(),
            position,
            start_offset,
            end_offset,
        }
    }

    /// The surface form of the token.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The name of the rule that matched this token.
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Whether this token was produced by the named rule (case-insensitive).
    pub fn is_rule(&self, rule: &str) -> bool {
        self.rule.eq_ignore_ascii_case(rule)
    }

    /// Index of the token within its line.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Start byte offset within the line.
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// End byte offset within the line.
    pub fn end_offset(&self) -> usize {
        self.end_offset
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}/{}:", self.text, self.rule)
    }
}

/// A token stream represents a sequence of tokens from a tokenizer.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello", "WORD");
        assert_eq!(token.text(), "hello");
        assert_eq!(token.rule(), "WORD");
        assert_eq!(token.position(), 0);
        assert_eq!(token.start_offset(), 0);
        assert_eq!(token.end_offset(), 5);
        assert!(!token.is_empty());
    }

    #[test]
    fn test_token_rule_match_ignores_case() {
        let token = Token::new(".", "PUNC");
        assert!(token.is_rule("punc"));
        assert!(!token.is_rule("WORD"));
    }

    #[test]
    fn test_token_display() {
        let token = Token::new("hello", "WORD");
        assert_eq!(format!("{token}"), ":hello/WORD:");
    }

    #[test]
    fn test_token_stream() {
        let tokens = vec![Token::new("hello", "WORD"), Token::new("world", "WORD")];

        let collected: Vec<_> = tokens.into_token_stream().collect();

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].text(), "hello");
        assert_eq!(collected[1].text(), "world");
    }
}
