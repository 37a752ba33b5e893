//! First-match-wins tokenizer over an ordered rule table.

use super::Tokenizer;
use super::rule::{CATCH_ALL_RULE, RuleSet, WHITESPACE_RULE};
use crate::analysis::token::{IntoTokenStream, Token, TokenStream};
use crate::config::TokenizerConfig;
use crate::error::Result;

/// A tokenizer that repeatedly cuts the longest prefix matched by the first
/// applicable rule.
///
/// The rule set always ends with a catch-all rule, so every iteration
/// consumes at least one character and tokenizing a line never stalls.
#[derive(Clone, Debug)]
pub struct RuleTokenizer {
    rules: RuleSet,
    emit_whitespace: bool,
}

impl RuleTokenizer {
    /// Create a tokenizer from a configuration.
    pub fn new(config: &TokenizerConfig) -> Result<Self> {
        Ok(RuleTokenizer {
            rules: RuleSet::compile(config)?,
            emit_whitespace: config.emit_whitespace,
        })
    }

    /// Create a tokenizer with the default rule table.
    pub fn default_rules() -> Result<Self> {
        Self::new(&TokenizerConfig::default())
    }

    /// Get the compiled rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Check if whitespace tokens are emitted.
    pub fn emit_whitespace(&self) -> bool {
        self.emit_whitespace
    }

    /// Split one line into tokens.
    pub fn tokenize_line(&self, line: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut offset = 0;

        while offset < line.len() {
            let rest = &line[offset..];
            let (name, len) = match self.rules.first_match(rest) {
                Some((rule, len)) => (rule.name(), len),
                None => (
                    CATCH_ALL_RULE,
                    rest.chars().next().map_or(rest.len(), char::len_utf8),
                ),
            };

            if self.emit_whitespace || name != WHITESPACE_RULE {
                tokens.push(Token::with_offsets(
                    &rest[..len],
                    name,
                    tokens.len(),
                    offset,
                    offset + len,
                ));
            }
            offset += len;
        }

        tokens
    }
}

impl Tokenizer for RuleTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        Ok(self.tokenize_line(text).into_token_stream())
    }

    fn name(&self) -> &'static str {
        "rule"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSpec;

    fn texts(tokens: &[Token]) -> Vec<(&str, &str)> {
        tokens.iter().map(|t| (t.text(), t.rule())).collect()
    }

    #[test]
    fn test_default_rules() {
        let tokenizer = RuleTokenizer::default_rules().unwrap();
        let tokens = tokenizer.tokenize_line("Die automatische Indexierung, z.B. 1.000 Mal!");

        assert_eq!(
            texts(&tokens),
            vec![
                ("Die", "WORD"),
                ("automatische", "WORD"),
                ("Indexierung", "WORD"),
                (",", "PUNC"),
                ("z.B", "ABRV"),
                (".", "PUNC"),
                ("1.000", "NUMS"),
                ("Mal", "WORD"),
                ("!", "PUNC"),
            ]
        );
        assert_eq!(tokens[1].position(), 1);
        assert_eq!(tokens[1].start_offset(), 4);
        assert_eq!(tokens[1].end_offset(), 16);
    }

    #[test]
    fn test_whitespace_emission() {
        let config = TokenizerConfig {
            emit_whitespace: true,
            ..TokenizerConfig::default()
        };
        let tokenizer = RuleTokenizer::new(&config).unwrap();
        let tokens = tokenizer.tokenize_line("a  b");

        assert_eq!(
            texts(&tokens),
            vec![("a", "WORD"), ("  ", "SPAC"), ("b", "WORD")]
        );
    }

    #[test]
    fn test_tokens_cover_whole_line() {
        let config = TokenizerConfig {
            rules: vec![RuleSpec::new("WORD", r"[a-z]+")],
            emit_whitespace: true,
        };
        let tokenizer = RuleTokenizer::new(&config).unwrap();
        let line = "abc, déf\t§ 12";
        let tokens = tokenizer.tokenize_line(line);

        let covered: usize = tokens.iter().map(|t| t.len()).sum();
        assert_eq!(covered, line.len());
        let joined: String = tokens.iter().map(|t| t.text()).collect();
        assert_eq!(joined, line);
    }

    #[test]
    fn test_partial_any_rule_keeps_every_character() {
        let config = TokenizerConfig {
            rules: vec![RuleSpec::new("WORD", r"[a-z]+"), RuleSpec::new("ANY", r"\d")],
            emit_whitespace: false,
        };
        let tokenizer = RuleTokenizer::new(&config).unwrap();
        let tokens = tokenizer.tokenize_line("ab§cd");

        assert_eq!(
            texts(&tokens),
            vec![("ab", "WORD"), ("§", "ANY"), ("cd", "WORD")]
        );
        assert_eq!(tokens.iter().map(|t| t.len()).sum::<usize>(), "ab§cd".len());
    }

    #[test]
    fn test_tokenization_is_deterministic() {
        let tokenizer = RuleTokenizer::default_rules().unwrap();
        let line = "Siehe www.example.org/pfad oder 42% (ca.)";
        assert_eq!(tokenizer.tokenize_line(line), tokenizer.tokenize_line(line));
    }

    #[test]
    fn test_empty_line() {
        let tokenizer = RuleTokenizer::default_rules().unwrap();
        assert!(tokenizer.tokenize_line("").is_empty());
    }

    #[test]
    fn test_tokenizer_trait() {
        let tokenizer = RuleTokenizer::default_rules().unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("Hallo Welt").unwrap().collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokenizer.name(), "rule");
    }
}
