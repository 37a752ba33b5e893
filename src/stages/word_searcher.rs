//! Dictionary lookup of word tokens.

use std::sync::Arc;

use crate::analysis::dictionary::Dictionary;
use crate::pipeline::{Counters, Data, Emitter, Item, Stage};

/// Replaces tokens of the configured rules with dictionary words.
///
/// Tokens of any other rule (punctuation, numbers, ...) pass through
/// unchanged, so the sequencer still sees its stopper tokens.
pub struct WordSearcher {
    dictionary: Arc<dyn Dictionary>,
    word_rules: Vec<String>,
    counters: Counters,
}

impl WordSearcher {
    /// Create a searcher looking up tokens of `word_rules`.
    pub fn new(dictionary: Arc<dyn Dictionary>, word_rules: &[String]) -> Self {
        WordSearcher {
            dictionary,
            word_rules: word_rules.to_vec(),
            counters: Counters::new(),
        }
    }
}

impl Stage for WordSearcher {
    fn name(&self) -> &str {
        "word_searcher"
    }

    fn process_data(&mut self, data: Data, out: &mut dyn Emitter) {
        let token = match data {
            Data::Token(token) if self.word_rules.iter().any(|rule| token.is_rule(rule)) => token,
            other => {
                out.forward(Item::Data(other));
                return;
            }
        };

        self.counters.increment("tokens");
        let word = self.dictionary.find_word(token.text());
        if word.is_unknown() {
            self.counters.increment("unknown");
        } else {
            self.counters.increment("words");
        }
        out.forward(Item::word(word));
    }

    fn report(&self) -> Counters {
        self.counters.clone()
    }
}
