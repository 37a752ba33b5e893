//! Text analysis: tokens, words, tokenization, stemming and dictionaries.
//!
//! These are the building blocks the pipeline stages are made of. Everything
//! here works on single lines or single words and knows nothing about item
//! streams.

pub mod dictionary;
pub mod stemmer;
pub mod token;
pub mod tokenizer;
pub mod word;
