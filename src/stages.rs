//! Concrete pipeline stages.
//!
//! The default chain, in order:
//!
//! ```text
//! TokenizerStage → WordSearcher → Decomposer → Synonymer → Sequencer
//! ```
//!
//! - [`tokenizer::TokenizerStage`] - cuts lines into tokens, marks line ends
//! - [`word_searcher::WordSearcher`] - turns word tokens into dictionary words
//! - [`decomposer::Decomposer`] - splits unknown words into known parts
//! - [`synonymer::Synonymer`] - adds synonym readings
//! - [`sequencer::Sequencer`] - synthesizes multi-word phrases per window

pub mod decomposer;
pub mod sequencer;
pub mod synonymer;
pub mod tokenizer;
pub mod word_searcher;

pub use decomposer::Decomposer;
pub use sequencer::{SequencePattern, Sequencer, SequencerStage};
pub use synonymer::Synonymer;
pub use tokenizer::TokenizerStage;
pub use word_searcher::WordSearcher;
