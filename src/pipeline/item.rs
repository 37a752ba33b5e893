//! Items flowing through the pipeline.
//!
//! Every channel carries [`Item`]s: either domain payload ([`Data`]) or a
//! control signal ([`Command`]). Commands travel in-band, so their position
//! relative to data is meaningful: `EOL(name)` follows the tokens of its line,
//! `EOF(name)` follows everything read from `name`.
//!
//! # Examples
//!
//! ```
//! use termflow::pipeline::{Command, Item};
//!
//! let item = Item::command(Command::Eol("notes.txt".to_string()));
//! assert!(item.is_command());
//!
//! let command = Command::Eol("notes.txt".to_string());
//! assert_eq!(command.name(), "EOL");
//! assert_eq!(command.param(), "notes.txt");
//! assert_eq!(command.to_string(), "*EOL('notes.txt')");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::analysis::word::Word;

/// Control signals understood by the stages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// A new logical source begins
    File(String),
    /// End of one input line of the named source
    Eol(String),
    /// Start of a new record in record-structured input
    Record(String),
    /// End of the named source
    Eof(String),
    /// Request to report counters
    Status,
    /// Non-fatal condition
    Warn(String),
    /// Fatal condition; the orchestrator stops admitting input
    Err(String),
}

impl Command {
    /// Upper-case command name.
    pub fn name(&self) -> &'static str {
        match self {
            Command::File(_) => "FILE",
            Command::Eol(_) => "EOL",
            Command::Record(_) => "RECORD",
            Command::Eof(_) => "EOF",
            Command::Status => "STATUS",
            Command::Warn(_) => "WARN",
            Command::Err(_) => "ERR",
        }
    }

    /// The command's parameter, empty for `STATUS`.
    pub fn param(&self) -> &str {
        match self {
            Command::File(param)
            | Command::Eol(param)
            | Command::Record(param)
            | Command::Eof(param)
            | Command::Warn(param)
            | Command::Err(param) => param,
            Command::Status => "",
        }
    }

    /// Whether this command is fatal.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Command::Err(_))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*{}('{}')", self.name(), self.param())
    }
}

/// Domain payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Data {
    /// A raw input line
    Line(String),
    /// A token cut by the tokenizer
    Token(Token),
    /// A word with its dictionary readings
    Word(Word),
}

impl Data {
    /// The stopper class of this payload: a token's rule name.
    pub fn stopper_class(&self) -> Option<&str> {
        match self {
            Data::Token(token) => Some(token.rule()),
            Data::Line(_) | Data::Word(_) => None,
        }
    }

    /// The word, if this payload is one.
    pub fn as_word(&self) -> Option<&Word> {
        match self {
            Data::Word(word) => Some(word),
            Data::Line(_) | Data::Token(_) => None,
        }
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Data::Line(line) => write!(f, "{line}"),
            Data::Token(token) => write!(f, "{token}"),
            Data::Word(word) => write!(f, "{word}"),
        }
    }
}

/// One element of a channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    /// Domain payload
    Data(Data),
    /// Control signal
    Command(Command),
}

impl Item {
    /// Wrap a payload.
    pub fn data(data: Data) -> Self {
        Item::Data(data)
    }

    /// Wrap a command.
    pub fn command(command: Command) -> Self {
        Item::Command(command)
    }

    /// Shorthand for a raw line item.
    pub fn line<S: Into<String>>(line: S) -> Self {
        Item::Data(Data::Line(line.into()))
    }

    /// Shorthand for a token item.
    pub fn token(token: Token) -> Self {
        Item::Data(Data::Token(token))
    }

    /// Shorthand for a word item.
    pub fn word(word: Word) -> Self {
        Item::Data(Data::Word(word))
    }

    /// Check if this item is a command.
    pub fn is_command(&self) -> bool {
        matches!(self, Item::Command(_))
    }

    /// The payload, if this item carries one.
    pub fn as_data(&self) -> Option<&Data> {
        match self {
            Item::Data(data) => Some(data),
            Item::Command(_) => None,
        }
    }

    /// The word, if this item carries one.
    pub fn as_word(&self) -> Option<&Word> {
        self.as_data().and_then(Data::as_word)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Data(data) => write!(f, "{data}"),
            Item::Command(command) => write!(f, "{command}"),
        }
    }
}
