//! Stemming: reducing word forms to their stems.
//!
//! The Porter engine in [`porter`] does not hard-code the algorithm. It
//! interprets a rule table (see [`PorterConfig`](crate::config::PorterConfig))
//! whose groups are visited in order, whose rules carry boolean guards over
//! the shape of the stem ([`guard`], [`shape`]) and which may transfer
//! control to a later group.
//!
//! # Examples
//!
//! ```
//! use termflow::analysis::stemmer::{PorterStemmer, Stemmer};
//!
//! let stemmer = PorterStemmer::new();
//! assert_eq!(stemmer.stem("caresses"), "caress");
//! assert_eq!(stemmer.stem("motoring"), "motor");
//! assert_eq!(stemmer.try_stem("sing"), None);
//! ```

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form; words without a stem come back lower-cased.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

pub mod guard;
pub mod porter;
pub mod rule;
pub mod shape;

pub use guard::Guard;
pub use porter::PorterStemmer;
pub use rule::{Replacement, RuleGroup, StemRule, SuffixRule};
pub use shape::StemShape;
