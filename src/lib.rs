//! # termflow
//!
//! An offline automatic-indexing engine: raw natural-language text goes in,
//! a stream of normalized index terms comes out.
//!
//! ## Features
//!
//! - Rule-ordered tokenizer with regex macros
//! - Porter stemming driven by a configurable rule table
//! - In-memory lexicon with stem fallback, compound splitting and synonyms
//! - Phrase synthesis over word-class patterns
//! - Streaming stage pipeline with in-band commands
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use termflow::analysis::dictionary::MemoryLexicon;
//! use termflow::config::TermflowConfig;
//! use termflow::pipeline::{Item, Pipeline};
//!
//! let config = TermflowConfig::from_json_str(r#"{
//!     "lexicon": { "entries": [
//!         ["automatische", ["automatisch#a"]],
//!         ["indexierung", ["indexierung#s"]]
//!     ] }
//! }"#).unwrap();
//! let lexicon = MemoryLexicon::from_config(&config.lexicon, &config.stemmer).unwrap();
//! let mut pipeline = Pipeline::from_config(&config, Arc::new(lexicon)).unwrap();
//!
//! let mut out: Vec<Item> = Vec::new();
//! pipeline.process_text("memo", "Automatische Indexierung.", &mut out).unwrap();
//!
//! let phrase = out.iter().filter_map(Item::as_word).next().unwrap();
//! assert_eq!(phrase.form(), "indexierung, automatisch");
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod stages;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
