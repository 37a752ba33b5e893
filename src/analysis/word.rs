//! Words and their dictionary readings.
//!
//! A [`Word`] is a surface form together with the ordered set of
//! [`Lexical`] readings the dictionary found for it. A word without readings
//! is unknown; the constructors keep `attr` and `lexicals` consistent so that
//! a known word always carries at least one reading.
//!
//! # Examples
//!
//! ```
//! use termflow::analysis::word::{word_class, Lexical, Word};
//!
//! let word = Word::new(
//!     "Indexierung",
//!     vec![Lexical::new("indexierung", word_class::NOUN)],
//! );
//! assert!(!word.is_unknown());
//! assert_eq!(word.classes(), vec!['s']);
//!
//! let unknown = Word::new("Xyzzy", vec![]);
//! assert!(unknown.is_unknown());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Single-character word class codes.
pub mod word_class {
    /// Noun.
    pub const NOUN: char = 's';
    /// Adjective.
    pub const ADJECTIVE: char = 'a';
    /// Verb.
    pub const VERB: char = 'v';
    /// Proper name.
    pub const NAME: char = 'e';
    /// Compound word as a whole.
    pub const COMPOUND: char = 'k';
    /// Part of a compound word.
    pub const PART: char = '+';
    /// Synonym reading.
    pub const SYNONYM: char = 'y';
    /// Synthesized phrase.
    pub const SEQUENCE: char = 'q';
    /// Placeholder for items without any reading, used in class signatures.
    pub const PLACEHOLDER: char = '#';
}

/// Bit flags attached to a [`Lexical`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LexicalFlags(u8);

impl LexicalFlags {
    /// No flag set.
    pub const NONE: LexicalFlags = LexicalFlags(0);
    /// Reading was found by looking up the stem instead of the form.
    pub const STEMMED: LexicalFlags = LexicalFlags(1);
    /// Reading is one part of a compound split.
    pub const COMPOUND_PART: LexicalFlags = LexicalFlags(1 << 1);
    /// Reading was synthesized by the pipeline.
    pub const SYNTHESIZED: LexicalFlags = LexicalFlags(1 << 2);

    /// Whether every flag of `other` is set.
    pub fn contains(self, other: LexicalFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of both flag sets.
    pub fn with(self, other: LexicalFlags) -> LexicalFlags {
        LexicalFlags(self.0 | other.0)
    }
}

/// One dictionary reading of a word form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lexical {
    /// The normalized (base) form
    pub form: String,
    /// Word class code, see [`word_class`]
    pub class: char,
    /// Origin flags
    #[serde(default)]
    pub flags: LexicalFlags,
}

impl Lexical {
    /// Create a new reading without flags.
    pub fn new<S: Into<String>>(form: S, class: char) -> Self {
        Lexical {
            form: form.into(),
            class,
            flags: LexicalFlags::NONE,
        }
    }

    /// Set additional flags on this reading.
    pub fn with_flags(mut self, flags: LexicalFlags) -> Self {
        self.flags = self.flags.with(flags);
        self
    }

    /// Whether the reading has the given class (case-insensitive).
    pub fn has_class(&self, class: char) -> bool {
        self.class.eq_ignore_ascii_case(&class)
    }
}

impl fmt::Display for Lexical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}/{})", self.form, self.class)
    }
}

/// How a word was recognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordAttr {
    /// Found in the dictionary
    Identified,
    /// No reading found
    Unknown,
    /// Recognized as a compound of known parts
    Compound,
    /// Synthesized phrase
    Sequence,
}

/// A word form with its dictionary readings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    form: String,
    attr: WordAttr,
    lexicals: Vec<Lexical>,
}

impl Word {
    /// Create a word from its readings; no readings makes it unknown.
    pub fn new<S: Into<String>>(form: S, lexicals: Vec<Lexical>) -> Self {
        let attr = if lexicals.is_empty() {
            WordAttr::Unknown
        } else {
            WordAttr::Identified
        };
        Self::with_attr(form, attr, lexicals)
    }

    /// Create an unknown word.
    pub fn unknown<S: Into<String>>(form: S) -> Self {
        Word {
            form: form.into(),
            attr: WordAttr::Unknown,
            lexicals: Vec::new(),
        }
    }

    /// Create a compound word; falls back to unknown without readings.
    pub fn compound<S: Into<String>>(form: S, lexicals: Vec<Lexical>) -> Self {
        Self::with_attr(form, WordAttr::Compound, lexicals)
    }

    /// Create a synthesized phrase carrying a single sequence reading.
    pub fn sequence<S: Into<String>>(phrase: S) -> Self {
        let phrase = phrase.into();
        let lexical = Lexical::new(phrase.clone(), word_class::SEQUENCE)
            .with_flags(LexicalFlags::SYNTHESIZED);
        Word {
            form: phrase,
            attr: WordAttr::Sequence,
            lexicals: vec![lexical],
        }
    }

    fn with_attr<S: Into<String>>(form: S, attr: WordAttr, lexicals: Vec<Lexical>) -> Self {
        let mut word = Word {
            form: form.into(),
            attr: WordAttr::Unknown,
            lexicals: Vec::with_capacity(lexicals.len()),
        };
        for lexical in lexicals {
            word.add_lexical(lexical);
        }
        if !word.lexicals.is_empty() {
            word.attr = attr;
        }
        word
    }

    /// The surface form.
    pub fn form(&self) -> &str {
        &self.form
    }

    /// How the word was recognized.
    pub fn attr(&self) -> WordAttr {
        self.attr
    }

    /// Readings in insertion order.
    pub fn lexicals(&self) -> &[Lexical] {
        &self.lexicals
    }

    /// Whether no reading is known for this word.
    pub fn is_unknown(&self) -> bool {
        self.attr == WordAttr::Unknown
    }

    /// Add a reading; returns false when it was already present.
    pub fn add_lexical(&mut self, lexical: Lexical) -> bool {
        if self.lexicals.contains(&lexical) {
            return false;
        }
        self.lexicals.push(lexical);
        if self.attr == WordAttr::Unknown {
            self.attr = WordAttr::Identified;
        }
        true
    }

    /// Distinct class codes of all readings, in reading order.
    pub fn classes(&self) -> Vec<char> {
        let mut classes: Vec<char> = Vec::with_capacity(self.lexicals.len());
        for lexical in &self.lexicals {
            let class = lexical.class.to_ascii_lowercase();
            if !classes.contains(&class) {
                classes.push(class);
            }
        }
        classes
    }

    /// First reading with the given class (case-insensitive).
    pub fn lexical_of_class(&self, class: char) -> Option<&Lexical> {
        self.lexicals.iter().find(|lexical| lexical.has_class(class))
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.form)?;
        match self.attr {
            WordAttr::Unknown => write!(f, "|?")?,
            WordAttr::Compound => write!(f, "|KOM")?,
            WordAttr::Sequence => write!(f, "|SEQ")?,
            WordAttr::Identified => {}
        }
        if !self.lexicals.is_empty() {
            let readings: Vec<String> = self.lexicals.iter().map(|l| l.to_string()).collect();
            write!(f, " = [{}]", readings.join(", "))?;
        }
        write!(f, ">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_word_has_readings() {
        let word = Word::new("Haus", vec![Lexical::new("haus", word_class::NOUN)]);
        assert_eq!(word.attr(), WordAttr::Identified);
        assert_eq!(word.lexicals().len(), 1);
    }

    #[test]
    fn test_compound_without_parts_is_unknown() {
        let word = Word::compound("Haustür", vec![]);
        assert!(word.is_unknown());
    }

    #[test]
    fn test_lexicals_are_a_set() {
        let mut word = Word::unknown("Bank");
        assert!(word.add_lexical(Lexical::new("bank", word_class::NOUN)));
        assert!(!word.add_lexical(Lexical::new("bank", word_class::NOUN)));
        assert!(word.add_lexical(Lexical::new("bänken", word_class::VERB)));

        assert!(!word.is_unknown());
        assert_eq!(word.classes(), vec!['s', 'v']);
    }

    #[test]
    fn test_lexical_of_class() {
        let word = Word::new(
            "gut",
            vec![
                Lexical::new("gut", word_class::NOUN),
                Lexical::new("gut", word_class::ADJECTIVE),
            ],
        );
        assert_eq!(word.lexical_of_class('A').map(|l| l.class), Some('a'));
        assert!(word.lexical_of_class(word_class::VERB).is_none());
    }

    #[test]
    fn test_sequence_word() {
        let word = Word::sequence("indexierung, automatisch");
        assert_eq!(word.attr(), WordAttr::Sequence);
        assert_eq!(word.classes(), vec![word_class::SEQUENCE]);
        assert!(word.lexicals()[0].flags.contains(LexicalFlags::SYNTHESIZED));
    }

    #[test]
    fn test_word_display() {
        let word = Word::new("Haus", vec![Lexical::new("haus", 's')]);
        assert_eq!(word.to_string(), "<Haus = [(haus/s)]>");
        assert_eq!(Word::unknown("Xyz").to_string(), "<Xyz|?>");
    }
}
