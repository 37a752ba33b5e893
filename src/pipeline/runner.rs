//! The pipeline orchestrator.
//!
//! A [`Pipeline`] owns an ordered chain of stages and admits input one item
//! at a time. Every item is pushed depth first through the whole chain
//! before the next one is admitted. The orchestrator watches what reaches
//! the sink: `WARN` is logged, `ERR` halts the pipeline, and `STATUS`
//! triggers a report of every stage's counters.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use termflow::analysis::dictionary::MemoryLexicon;
//! use termflow::config::TermflowConfig;
//! use termflow::pipeline::{Item, Pipeline};
//!
//! let config = TermflowConfig::default();
//! let lexicon = MemoryLexicon::from_config(&config.lexicon, &config.stemmer).unwrap();
//! let mut pipeline = Pipeline::from_config(&config, Arc::new(lexicon)).unwrap();
//!
//! let mut out: Vec<Item> = Vec::new();
//! pipeline.process_text("memo", "Hallo Welt.", &mut out).unwrap();
//!
//! assert_eq!(out.first().unwrap().to_string(), "*FILE('memo')");
//! assert_eq!(out.last().unwrap().to_string(), "*EOF('memo')");
//! ```

use std::fmt;
use std::sync::Arc;

use log::{debug, error, info, warn};

use super::counters::Counters;
use super::item::{Command, Item};
use super::stage::{Emitter, Stage, dispatch};
use crate::analysis::dictionary::{Dictionary, MemoryLexicon};
use crate::config::TermflowConfig;
use crate::error::{Result, TermflowError};
use crate::stages::{Decomposer, Sequencer, Synonymer, TokenizerStage, WordSearcher};

/// Sink wrapper observing commands on their way out of the chain.
struct Monitor<'a> {
    sink: &'a mut dyn Emitter,
    error: Option<String>,
    status: bool,
}

impl Emitter for Monitor<'_> {
    fn forward(&mut self, item: Item) {
        if let Item::Command(command) = &item {
            match command {
                Command::Warn(message) => warn!("{message}"),
                Command::Err(message) => {
                    error!("{message}");
                    self.error.get_or_insert_with(|| message.clone());
                }
                Command::Status => self.status = true,
                _ => {}
            }
        }
        self.sink.forward(item);
    }
}

/// An ordered chain of stages.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
    dictionary: Option<Arc<dyn Dictionary>>,
    halted: Option<String>,
}

impl Pipeline {
    /// Create an empty pipeline; items pass straight to the sink.
    pub fn new() -> Self {
        Pipeline::default()
    }

    /// Append a stage to the chain.
    pub fn add_stage(mut self, stage: Box<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Attach a dictionary whose counters are part of the report.
    pub fn with_dictionary(mut self, dictionary: Arc<dyn Dictionary>) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    /// Build the standard chain: tokenizer, word searcher, decomposer,
    /// synonymer, sequencer.
    pub fn from_config(config: &TermflowConfig, dictionary: Arc<dyn Dictionary>) -> Result<Self> {
        let pipeline = Pipeline::new()
            .add_stage(Box::new(TokenizerStage::new(&config.tokenizer)?))
            .add_stage(Box::new(WordSearcher::new(
                Arc::clone(&dictionary),
                &config.word_rules,
            )))
            .add_stage(Box::new(Decomposer::new(Arc::clone(&dictionary))))
            .add_stage(Box::new(Synonymer::new(Arc::clone(&dictionary))))
            .add_stage(Box::new(Sequencer::stage(&config.sequencer)?))
            .with_dictionary(dictionary);

        debug!("pipeline built: {pipeline:?}");
        Ok(pipeline)
    }

    /// Stage names in chain order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Check if a fatal command has passed through the chain.
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// Push one item through the chain into `sink`.
    ///
    /// Fails with [`TermflowError::Halted`] once an `ERR` command has been
    /// observed.
    pub fn push(&mut self, item: Item, sink: &mut dyn Emitter) -> Result<()> {
        if let Some(message) = &self.halted {
            return Err(TermflowError::halted(message.clone()));
        }

        let mut monitor = Monitor {
            sink,
            error: None,
            status: false,
        };
        dispatch(&mut self.stages, &mut monitor, item);

        if monitor.status {
            for (name, counters) in self.report() {
                info!("{name}: {counters}");
            }
        }
        if let Some(message) = monitor.error {
            self.halted = Some(message);
        }
        Ok(())
    }

    /// Feed a plain text source: `FILE`, one line item per line, `EOF`.
    pub fn process_text(&mut self, name: &str, text: &str, sink: &mut dyn Emitter) -> Result<()> {
        self.push(Item::command(Command::File(name.to_string())), sink)?;
        for line in text.lines() {
            self.push(Item::line(line), sink)?;
        }
        self.push(Item::command(Command::Eof(name.to_string())), sink)
    }

    /// Feed a record-structured source. Records are numbered from 1 and
    /// announced with `RECORD(id)` before their lines.
    pub fn process_records<I, S>(&mut self, name: &str, records: I, sink: &mut dyn Emitter) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.push(Item::command(Command::File(name.to_string())), sink)?;
        for (index, record) in records.into_iter().enumerate() {
            self.push(Item::command(Command::Record((index + 1).to_string())), sink)?;
            for line in record.as_ref().lines() {
                self.push(Item::line(line), sink)?;
            }
        }
        self.push(Item::command(Command::Eof(name.to_string())), sink)
    }

    /// Counters of every stage in chain order, then the dictionary's.
    pub fn report(&self) -> Vec<(String, Counters)> {
        let mut report: Vec<(String, Counters)> = self
            .stages
            .iter()
            .map(|stage| (stage.name().to_string(), stage.report()))
            .collect();
        if let Some(dictionary) = &self.dictionary {
            report.push(("dictionary".to_string(), dictionary.report()));
        }
        report
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .field("halted", &self.halted)
            .finish()
    }
}

fn forward_failure(built: Result<Pipeline>, sink: &mut dyn Emitter) -> Result<Pipeline> {
    built.inspect_err(|e| sink.forward(Item::command(Command::Err(e.to_string()))))
}

/// Build the in-memory lexicon and the standard pipeline from one
/// configuration.
///
/// A construction failure of either is reported downstream as `ERR` before
/// it is returned.
pub fn build(config: &TermflowConfig, sink: &mut dyn Emitter) -> Result<Pipeline> {
    let built = MemoryLexicon::from_config(&config.lexicon, &config.stemmer)
        .and_then(|lexicon| Pipeline::from_config(config, Arc::new(lexicon)));
    forward_failure(built, sink)
}

/// Build the standard pipeline and run one text source through it.
///
/// A construction failure is reported downstream as `ERR` before it is
/// returned.
pub fn run(
    config: &TermflowConfig,
    dictionary: Arc<dyn Dictionary>,
    name: &str,
    text: &str,
    sink: &mut dyn Emitter,
) -> Result<Pipeline> {
    let mut pipeline = forward_failure(Pipeline::from_config(config, dictionary), sink)?;
    pipeline.process_text(name, text, sink)?;
    Ok(pipeline)
}
