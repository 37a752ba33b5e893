//! Synonym expansion of known words.

use std::sync::Arc;

use crate::analysis::dictionary::Dictionary;
use crate::pipeline::{Counters, Data, Emitter, Item, Stage};

/// Appends synonym readings to every known word.
pub struct Synonymer {
    dictionary: Arc<dyn Dictionary>,
    counters: Counters,
}

impl Synonymer {
    /// Create a synonymer over a dictionary.
    pub fn new(dictionary: Arc<dyn Dictionary>) -> Self {
        Synonymer {
            dictionary,
            counters: Counters::new(),
        }
    }
}

impl Stage for Synonymer {
    fn name(&self) -> &str {
        "synonymer"
    }

    fn process_data(&mut self, data: Data, out: &mut dyn Emitter) {
        match data {
            Data::Word(mut word) if !word.is_unknown() => {
                for synonym in self.dictionary.find_synonyms(&word) {
                    if word.add_lexical(synonym) {
                        self.counters.increment("synonyms");
                    }
                }
                out.forward(Item::word(word));
            }
            other => out.forward(Item::Data(other)),
        }
    }

    fn report(&self) -> Counters {
        self.counters.clone()
    }
}
