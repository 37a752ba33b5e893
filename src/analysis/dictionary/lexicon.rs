//! In-memory lexicon built from configuration.
//!
//! Entries map a word form to readings written as `"lexical#class"`:
//!
//! ```
//! use termflow::analysis::dictionary::{Dictionary, MemoryLexicon};
//! use termflow::config::{LexiconConfig, PorterConfig};
//!
//! let config = LexiconConfig {
//!     entries: vec![("haus".to_string(), vec!["haus#s".to_string()])],
//!     ..LexiconConfig::default()
//! };
//! let lexicon = MemoryLexicon::from_config(&config, &PorterConfig::default()).unwrap();
//!
//! let word = lexicon.find_word("Haus");
//! assert_eq!(word.to_string(), "<Haus = [(haus/s)]>");
//! assert!(lexicon.find_word("Garten").is_unknown());
//! ```

use ahash::{AHashMap, AHashSet};
use log::{debug, trace};
use parking_lot::Mutex;

use super::Dictionary;
use crate::analysis::stemmer::PorterStemmer;
use crate::analysis::word::{Lexical, LexicalFlags, Word, word_class};
use crate::config::{LexiconConfig, PorterConfig};
use crate::error::{Result, TermflowError};
use crate::pipeline::Counters;

/// Trailing letter tried away when a compound head is not found as is.
const LINKING_LETTER: char = 's';

/// Dictionary over configured entries and synonym groups.
#[derive(Debug)]
pub struct MemoryLexicon {
    /// Lower-cased form -> readings
    entries: AHashMap<String, Vec<Lexical>>,
    /// Stem of every entry form -> readings of all forms sharing it
    stems: AHashMap<String, Vec<Lexical>>,
    /// Lower-cased form -> indices into `synonym_groups`
    synonym_index: AHashMap<String, Vec<usize>>,
    synonym_groups: Vec<Vec<String>>,
    stemmer: Option<PorterStemmer>,
    min_part_length: usize,
    counters: Mutex<Counters>,
}

impl MemoryLexicon {
    /// Build a lexicon, validating every entry.
    pub fn from_config(config: &LexiconConfig, stemmer: &PorterConfig) -> Result<Self> {
        let mut entries: AHashMap<String, Vec<Lexical>> = AHashMap::new();
        for (form, readings) in &config.entries {
            let slot = entries.entry(form.to_lowercase()).or_default();
            for reading in readings {
                let lexical = parse_reading(reading).map_err(|e| {
                    TermflowError::config(format!("In lexicon entry '{form}': {e}"))
                })?;
                if !slot.contains(&lexical) {
                    slot.push(lexical);
                }
            }
        }

        let stemmer = if config.stemming {
            Some(PorterStemmer::from_config(stemmer)?)
        } else {
            None
        };

        let mut stems: AHashMap<String, Vec<Lexical>> = AHashMap::new();
        if let Some(stemmer) = &stemmer {
            for (form, readings) in &entries {
                let stem = stemmer.try_stem(form).unwrap_or_else(|| form.clone());
                let slot = stems.entry(stem).or_default();
                for lexical in readings {
                    if !slot.contains(lexical) {
                        slot.push(lexical.clone());
                    }
                }
            }
        }

        let mut synonym_groups = Vec::with_capacity(config.synonyms.len());
        let mut synonym_index: AHashMap<String, Vec<usize>> = AHashMap::new();
        for group in &config.synonyms {
            let members: Vec<String> = group.iter().map(|member| member.to_lowercase()).collect();
            if members.len() < 2 {
                continue;
            }
            let index = synonym_groups.len();
            for member in &members {
                synonym_index.entry(member.clone()).or_default().push(index);
            }
            synonym_groups.push(members);
        }

        debug!(
            "lexicon loaded: {} forms, {} synonym groups, stemming {}",
            entries.len(),
            synonym_groups.len(),
            if stemmer.is_some() { "on" } else { "off" }
        );

        Ok(MemoryLexicon {
            entries,
            stems,
            synonym_index,
            synonym_groups,
            stemmer,
            min_part_length: config.min_part_length.max(1),
            counters: Mutex::new(Counters::new()),
        })
    }

    /// Number of distinct forms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the lexicon has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup_exact(&self, key: &str) -> Option<&Vec<Lexical>> {
        self.entries.get(key)
    }

    /// Readings of a compound part, trying the bare head without its
    /// linking letter when needed.
    fn lookup_part(&self, part: &str, is_head: bool) -> Option<&Vec<Lexical>> {
        self.lookup_exact(part).or_else(|| {
            if !is_head {
                return None;
            }
            let stripped = part.strip_suffix(LINKING_LETTER)?;
            if stripped.chars().count() < self.min_part_length {
                return None;
            }
            self.lookup_exact(stripped)
        })
    }
}

/// Parse `"lexical#class"`; the class is exactly one character.
fn parse_reading(reading: &str) -> Result<Lexical> {
    let (form, class) = reading
        .rsplit_once('#')
        .ok_or_else(|| TermflowError::config(format!("Reading '{reading}' has no '#class'")))?;

    let mut chars = class.chars();
    match (chars.next(), chars.next()) {
        (Some(class), None) if !form.is_empty() => Ok(Lexical::new(form.to_lowercase(), class)),
        _ => Err(TermflowError::config(format!(
            "Reading '{reading}' needs a form and a single-character class"
        ))),
    }
}

fn part_readings(readings: &[Lexical], into: &mut Vec<Lexical>) {
    for lexical in readings {
        let part = Lexical::new(lexical.form.clone(), word_class::PART)
            .with_flags(LexicalFlags::COMPOUND_PART);
        if !into.contains(&part) {
            into.push(part);
        }
    }
}

impl Dictionary for MemoryLexicon {
    fn find_word(&self, form: &str) -> Word {
        let key = form.to_lowercase();
        self.counters.lock().increment("queries");

        if let Some(readings) = self.lookup_exact(&key) {
            self.counters.lock().increment("found");
            return Word::new(form, readings.clone());
        }

        if let Some(stemmer) = &self.stemmer {
            if let Some(readings) = stemmer.try_stem(&key).and_then(|stem| self.stems.get(&stem)) {
                trace!("found '{form}' through its stem");
                self.counters.lock().increment("stemmed");
                let readings = readings
                    .iter()
                    .map(|lexical| lexical.clone().with_flags(LexicalFlags::STEMMED))
                    .collect();
                return Word::new(form, readings);
            }
        }

        Word::unknown(form)
    }

    fn find_compositum(&self, form: &str) -> Word {
        let key = form.to_lowercase();
        let chars: Vec<(usize, char)> = key.char_indices().collect();
        let min = self.min_part_length;

        if chars.len() < 2 * min {
            return Word::unknown(form);
        }

        // Smallest head first means the longest tail is tried first.
        for split in min..=chars.len() - min {
            let at = chars[split].0;
            let (head, tail) = key.split_at(at);

            let Some(tail_readings) = self.lookup_part(tail, false) else {
                continue;
            };
            let Some(head_readings) = self.lookup_part(head, true) else {
                continue;
            };

            let mut lexicals = vec![Lexical::new(key.clone(), word_class::COMPOUND)];
            part_readings(head_readings, &mut lexicals);
            part_readings(tail_readings, &mut lexicals);

            trace!("decomposed '{form}' into '{head}' + '{tail}'");
            self.counters.lock().increment("compounds");
            return Word::compound(form, lexicals);
        }

        Word::unknown(form)
    }

    fn find_synonyms(&self, word: &Word) -> Vec<Lexical> {
        let present: AHashSet<&str> = word
            .lexicals()
            .iter()
            .map(|lexical| lexical.form.as_str())
            .collect();
        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut synonyms = Vec::new();

        for lexical in word.lexicals() {
            let Some(groups) = self.synonym_index.get(&lexical.form) else {
                continue;
            };
            for &group in groups {
                for member in &self.synonym_groups[group] {
                    if present.contains(member.as_str()) || !seen.insert(member.as_str()) {
                        continue;
                    }
                    synonyms.push(Lexical::new(member.clone(), word_class::SYNONYM));
                }
            }
        }

        if !synonyms.is_empty() {
            self.counters.lock().add("synonyms", synonyms.len() as u64);
        }
        synonyms
    }

    fn report(&self) -> Counters {
        self.counters.lock().clone()
    }
}
