//! Phrase synthesis over word-class patterns.
//!
//! The sequencer buffers everything up to a stopper token (by default
//! punctuation or other symbols) or a command. On flush it looks at the word
//! classes found at every buffered position, expands all combinations into
//! class signatures, and scans every configured pattern at every offset of
//! every signature. A match composes a phrase from the matched readings and
//! schedules it for insertion at the offset where the match starts.
//!
//! # Examples
//!
//! ```
//! use termflow::analysis::token::Token;
//! use termflow::analysis::word::{Lexical, Word};
//! use termflow::config::SequencerConfig;
//! use termflow::pipeline::{Item, Stage};
//! use termflow::stages::Sequencer;
//!
//! let mut stage = Sequencer::stage(&SequencerConfig::default()).unwrap();
//! let mut out: Vec<Item> = Vec::new();
//!
//! stage.consume(Item::word(Word::new("automatische", vec![Lexical::new("automatisch", 'a')])), &mut out);
//! stage.consume(Item::word(Word::new("Indexierung", vec![Lexical::new("indexierung", 's')])), &mut out);
//! assert!(out.is_empty());
//!
//! stage.consume(Item::token(Token::new(".", "PUNC")), &mut out);
//! assert_eq!(out.len(), 4);
//! assert_eq!(out[0].as_word().unwrap().form(), "indexierung, automatisch");
//! ```

use std::sync::LazyLock;

use ahash::AHashSet;
use log::warn;
use regex::{Captures, Regex};

use crate::analysis::word::{Word, word_class};
use crate::config::{SequenceSpec, SequencerConfig};
use crate::error::{Result, TermflowError};
use crate::pipeline::{BufferPolicy, BufferedStage, Counters, DeferredInsertion, Item};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// A compiled class pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequencePattern {
    classes: Vec<char>,
    format: String,
}

impl SequencePattern {
    /// Compile a pattern, checking that every placeholder names a position
    /// of the pattern.
    pub fn new(spec: &SequenceSpec) -> Result<Self> {
        let classes: Vec<char> = spec.classes.chars().map(|c| c.to_ascii_lowercase()).collect();
        if classes.is_empty() {
            return Err(TermflowError::config("Sequence pattern has no classes"));
        }

        for placeholder in PLACEHOLDER.find_iter(&spec.format) {
            let valid = placeholder
                .as_str()
                .parse::<usize>()
                .is_ok_and(|n| (1..=classes.len()).contains(&n));
            if !valid {
                return Err(TermflowError::config(format!(
                    "Placeholder {} in format '{}' is outside 1..={}",
                    placeholder.as_str(),
                    spec.format,
                    classes.len()
                )));
            }
        }

        Ok(SequencePattern {
            classes,
            format: spec.format.clone(),
        })
    }

    /// Lower-cased class codes.
    pub fn classes(&self) -> &[char] {
        &self.classes
    }

    /// Output format.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Offsets at which the pattern occurs in a signature, overlaps included.
    fn match_offsets<'a>(&'a self, signature: &'a [char]) -> impl Iterator<Item = usize> + 'a {
        signature
            .windows(self.classes.len())
            .enumerate()
            .filter(|(_, window)| *window == self.classes.as_slice())
            .map(|(offset, _)| offset)
    }

    /// Compose the phrase for a match at `offset`, or `None` when some
    /// position lacks a reading of the required class.
    fn compose(&self, items: &[Item], offset: usize) -> Option<String> {
        let mut forms = Vec::with_capacity(self.classes.len());
        for (i, &class) in self.classes.iter().enumerate() {
            let lexical = items.get(offset + i)?.as_word()?.lexical_of_class(class)?;
            forms.push(lexical.form.as_str());
        }

        let phrase = PLACEHOLDER.replace_all(&self.format, |caps: &Captures| {
            caps[0]
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|index| forms.get(index))
                .map_or_else(|| caps[0].to_string(), |form| form.to_string())
        });
        Some(phrase.into_owned())
    }
}

/// Buffer policy synthesizing phrases.
#[derive(Clone, Debug)]
pub struct Sequencer {
    stopper: Vec<String>,
    patterns: Vec<SequencePattern>,
    max_signatures: usize,
}

/// The sequencer as a pipeline stage.
pub type SequencerStage = BufferedStage<Sequencer>;

impl Sequencer {
    /// Create a sequencer from configuration.
    pub fn new(config: &SequencerConfig) -> Result<Self> {
        let patterns = config
            .sequences
            .iter()
            .map(SequencePattern::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Sequencer {
            stopper: config.stopper.clone(),
            patterns,
            max_signatures: config.max_signatures.max(1),
        })
    }

    /// Create the buffered stage running this policy.
    pub fn stage(config: &SequencerConfig) -> Result<SequencerStage> {
        Ok(BufferedStage::new(Self::new(config)?))
    }

    /// Compiled patterns in order.
    pub fn patterns(&self) -> &[SequencePattern] {
        &self.patterns
    }

    fn is_stopper(&self, item: &Item) -> bool {
        item.as_data()
            .and_then(|data| data.stopper_class())
            .is_some_and(|class| self.stopper.iter().any(|s| s.eq_ignore_ascii_case(class)))
    }

    /// Candidate class codes per buffered position.
    fn position_classes(items: &[Item]) -> Vec<Vec<char>> {
        items
            .iter()
            .map(|item| match item.as_word() {
                Some(word) if !word.is_unknown() => word.classes(),
                _ => vec![word_class::PLACEHOLDER],
            })
            .collect()
    }

    /// Cartesian product of the per-position classes, capped at
    /// `max_signatures`. Positions hold distinct codes, so the product has
    /// no duplicates.
    fn signatures(&self, positions: &[Vec<char>]) -> Vec<Vec<char>> {
        let mut signatures: Vec<Vec<char>> = vec![Vec::with_capacity(positions.len())];
        let mut truncated = false;

        for classes in positions {
            let mut next = Vec::with_capacity(signatures.len() * classes.len());
            'expand: for signature in &signatures {
                for &class in classes {
                    if next.len() == self.max_signatures {
                        truncated = true;
                        break 'expand;
                    }
                    let mut extended = signature.clone();
                    extended.push(class);
                    next.push(extended);
                }
            }
            signatures = next;
        }

        if truncated {
            warn!(
                "class signatures of a {}-item window exceed {}, some sequences may be missed",
                positions.len(),
                self.max_signatures
            );
        }
        signatures
    }
}

impl BufferPolicy for Sequencer {
    fn name(&self) -> &str {
        "sequencer"
    }

    fn should_flush(&self, items: &[Item]) -> bool {
        items.last().is_some_and(|item| self.is_stopper(item))
    }

    fn prepare_flush(&mut self, items: &[Item], counters: &mut Counters) -> Vec<DeferredInsertion> {
        if self.patterns.is_empty() || items.is_empty() {
            return Vec::new();
        }

        let positions = Self::position_classes(items);
        let signatures = self.signatures(&positions);

        let mut seen: AHashSet<(usize, String)> = AHashSet::new();
        let mut insertions = Vec::new();

        for signature in &signatures {
            for pattern in &self.patterns {
                for offset in pattern.match_offsets(signature) {
                    let Some(phrase) = pattern.compose(items, offset) else {
                        continue;
                    };
                    if !seen.insert((offset, phrase.clone())) {
                        continue;
                    }
                    counters.increment("sequences");
                    insertions.push(DeferredInsertion::new(offset, Item::word(Word::sequence(phrase))));
                }
            }
        }

        insertions
    }
}
