//! Compound splitting of unknown words.

use std::sync::Arc;

use log::trace;

use crate::analysis::dictionary::Dictionary;
use crate::pipeline::{Counters, Data, Emitter, Item, Stage};

/// Replaces unknown words by their compound analysis when one exists.
pub struct Decomposer {
    dictionary: Arc<dyn Dictionary>,
    counters: Counters,
}

impl Decomposer {
    /// Create a decomposer over a dictionary.
    pub fn new(dictionary: Arc<dyn Dictionary>) -> Self {
        Decomposer {
            dictionary,
            counters: Counters::new(),
        }
    }
}

impl Stage for Decomposer {
    fn name(&self) -> &str {
        "decomposer"
    }

    fn process_data(&mut self, data: Data, out: &mut dyn Emitter) {
        match data {
            Data::Word(word) if word.is_unknown() => {
                self.counters.increment("unknown");
                let compound = self.dictionary.find_compositum(word.form());
                if compound.is_unknown() {
                    out.forward(Item::word(word));
                } else {
                    trace!("{} -> {}", word.form(), compound);
                    self.counters.increment("compounds");
                    out.forward(Item::word(compound));
                }
            }
            other => out.forward(Item::Data(other)),
        }
    }

    fn report(&self) -> Counters {
        self.counters.clone()
    }
}
