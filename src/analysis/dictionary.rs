//! Dictionary lookups used by the word-level stages.
//!
//! A [`Dictionary`] is shared between the lookup stages of one pipeline, so
//! it is accessed through `&self` and must be `Send + Sync`. Implementations
//! keep their own counters behind interior mutability.

pub mod lexicon;

pub use lexicon::MemoryLexicon;

use crate::analysis::word::{Lexical, Word};
use crate::pipeline::Counters;

/// Lexical lookup service.
pub trait Dictionary: Send + Sync {
    /// Look up a word form. Returns an unknown word when nothing matches.
    fn find_word(&self, form: &str) -> Word;

    /// Try to split an unknown form into known parts. Returns an unknown
    /// word when no split exists.
    fn find_compositum(&self, form: &str) -> Word;

    /// Synonym readings for a known word, excluding readings it already has.
    fn find_synonyms(&self, word: &Word) -> Vec<Lexical>;

    /// Lookup counters.
    fn report(&self) -> Counters;
}
