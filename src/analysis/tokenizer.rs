//! Tokenizers that cut input lines into typed lexical units.
//!
//! - [`rule::RuleSet`] - compiled, ordered rule table with macro expansion
//! - [`rule_based::RuleTokenizer`] - first-match-wins lexer over a rule set
//!
//! # Examples
//!
//! ```
//! use termflow::analysis::tokenizer::Tokenizer;
//! use termflow::analysis::tokenizer::rule_based::RuleTokenizer;
//!
//! let tokenizer = RuleTokenizer::default_rules().unwrap();
//! let tokens: Vec<_> = tokenizer.tokenize("Hallo Welt!").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].rule(), "WORD");
//! assert_eq!(tokens[2].rule(), "PUNC");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod rule;
pub mod rule_based;

pub use rule::{RuleSet, TokenRule};
pub use rule_based::RuleTokenizer;
