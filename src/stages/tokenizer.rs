//! Stream wrapper around the rule tokenizer.

use log::trace;

use crate::analysis::tokenizer::RuleTokenizer;
use crate::config::TokenizerConfig;
use crate::error::Result;
use crate::pipeline::{Command, Counters, Data, Emitter, Item, Stage};

/// Tokenizes `Line` items and marks the end of every line.
///
/// Tokens of a line are followed by `EOL(name)` while a source name is known
/// and the input is not record-structured. Other payloads pass through.
#[derive(Debug)]
pub struct TokenizerStage {
    tokenizer: RuleTokenizer,
    file: Option<String>,
    in_record: bool,
    counters: Counters,
}

impl TokenizerStage {
    /// Create the stage from a tokenizer configuration.
    pub fn new(config: &TokenizerConfig) -> Result<Self> {
        Ok(Self::with_tokenizer(RuleTokenizer::new(config)?))
    }

    /// Wrap an existing tokenizer.
    pub fn with_tokenizer(tokenizer: RuleTokenizer) -> Self {
        TokenizerStage {
            tokenizer,
            file: None,
            in_record: false,
            counters: Counters::new(),
        }
    }

    /// The wrapped tokenizer.
    pub fn tokenizer(&self) -> &RuleTokenizer {
        &self.tokenizer
    }
}

impl Stage for TokenizerStage {
    fn name(&self) -> &str {
        "tokenizer"
    }

    fn process_data(&mut self, data: Data, out: &mut dyn Emitter) {
        let Data::Line(line) = data else {
            out.forward(Item::Data(data));
            return;
        };

        self.counters.increment("lines");
        let tokens = self.tokenizer.tokenize_line(&line);
        trace!("line of {} bytes gave {} tokens", line.len(), tokens.len());
        self.counters.add("tokens", tokens.len() as u64);

        for token in tokens {
            out.forward(Item::token(token));
        }

        if let Some(file) = &self.file {
            if !self.in_record {
                out.forward(Item::command(Command::Eol(file.clone())));
            }
        }
    }

    fn process_command(&mut self, command: Command, out: &mut dyn Emitter) {
        match &command {
            Command::File(name) => {
                self.file = Some(name.clone());
                self.in_record = false;
            }
            Command::Record(_) => self.in_record = true,
            Command::Eof(_) => {
                self.file = None;
                self.in_record = false;
            }
            _ => {}
        }
        out.forward(Item::Command(command));
    }

    fn report(&self) -> Counters {
        self.counters.clone()
    }
}
