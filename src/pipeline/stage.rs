//! The stage contract.
//!
//! A stage consumes items one at a time and forwards zero or more items to
//! its single downstream through an [`Emitter`]. Inside a [`Pipeline`]
//! forwarding is a synchronous call into the rest of the chain, so an item
//! has travelled all the way to the sink (or into some buffer) before
//! `forward` returns.
//!
//! # Examples
//!
//! ```
//! use termflow::pipeline::{Command, Counters, Data, Emitter, Item, Stage};
//!
//! /// Upper-cases raw lines.
//! struct Shout {
//!     counters: Counters,
//! }
//!
//! impl Stage for Shout {
//!     fn name(&self) -> &str {
//!         "shout"
//!     }
//!
//!     fn process_data(&mut self, data: Data, out: &mut dyn Emitter) {
//!         self.counters.increment("data");
//!         match data {
//!             Data::Line(line) => out.forward(Item::line(line.to_uppercase())),
//!             other => out.forward(Item::data(other)),
//!         }
//!     }
//!
//!     fn report(&self) -> Counters {
//!         self.counters.clone()
//!     }
//! }
//!
//! let mut stage = Shout { counters: Counters::new() };
//! let mut out: Vec<Item> = Vec::new();
//! stage.consume(Item::line("hallo"), &mut out);
//! stage.consume(Item::command(Command::Status), &mut out);
//!
//! assert_eq!(out, vec![Item::line("HALLO"), Item::command(Command::Status)]);
//! ```
//!
//! [`Pipeline`]: super::Pipeline

use super::counters::Counters;
use super::item::{Command, Data, Item};

/// Receiver of forwarded items.
pub trait Emitter {
    /// Push exactly one item downstream.
    fn forward(&mut self, item: Item);
}

impl Emitter for Vec<Item> {
    fn forward(&mut self, item: Item) {
        self.push(item);
    }
}

/// One processing unit of the pipeline.
pub trait Stage: Send {
    /// Stage name used in reports and logs.
    fn name(&self) -> &str;

    /// Handle a payload item.
    fn process_data(&mut self, data: Data, out: &mut dyn Emitter);

    /// Handle a control item. Forwards it unchanged by default.
    fn process_command(&mut self, command: Command, out: &mut dyn Emitter) {
        out.forward(Item::Command(command));
    }

    /// Entry point: dispatch an item by its kind.
    fn consume(&mut self, item: Item, out: &mut dyn Emitter) {
        match item {
            Item::Data(data) => self.process_data(data, out),
            Item::Command(command) => self.process_command(command, out),
        }
    }

    /// Current counters of this stage.
    fn report(&self) -> Counters;
}

/// Emitter that feeds the rest of a stage chain.
struct Downstream<'a> {
    stages: &'a mut [Box<dyn Stage>],
    sink: &'a mut dyn Emitter,
}

impl Emitter for Downstream<'_> {
    fn forward(&mut self, item: Item) {
        dispatch(self.stages, self.sink, item);
    }
}

/// Push an item through a chain of stages, depth first, ending in `sink`.
pub fn dispatch(stages: &mut [Box<dyn Stage>], sink: &mut dyn Emitter, item: Item) {
    match stages.split_first_mut() {
        Some((first, rest)) => {
            let mut downstream = Downstream { stages: rest, sink };
            first.consume(item, &mut downstream);
        }
        None => sink.forward(item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Emits every line twice.
    struct Echo {
        seen: u64,
    }

    impl Stage for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn process_data(&mut self, data: Data, out: &mut dyn Emitter) {
            self.seen += 1;
            out.forward(Item::data(data.clone()));
            out.forward(Item::data(data));
        }

        fn report(&self) -> Counters {
            let mut counters = Counters::new();
            counters.add("seen", self.seen);
            counters
        }
    }

    #[test]
    fn test_dispatch_without_stages_reaches_sink() {
        let mut sink: Vec<Item> = Vec::new();
        dispatch(&mut [], &mut sink, Item::line("a"));
        assert_eq!(sink, vec![Item::line("a")]);
    }

    #[test]
    fn test_dispatch_is_depth_first() {
        let mut stages: Vec<Box<dyn Stage>> =
            vec![Box::new(Echo { seen: 0 }), Box::new(Echo { seen: 0 })];
        let mut sink: Vec<Item> = Vec::new();

        dispatch(&mut stages, &mut sink, Item::line("x"));

        assert_eq!(sink.len(), 4);
        assert_eq!(stages[0].report().get("seen"), 1);
        assert_eq!(stages[1].report().get("seen"), 2);
    }

    #[test]
    fn test_commands_pass_by_default() {
        let mut stages: Vec<Box<dyn Stage>> = vec![Box::new(Echo { seen: 0 })];
        let mut sink: Vec<Item> = Vec::new();

        dispatch(&mut stages, &mut sink, Item::command(Command::Eof("f".into())));

        assert_eq!(sink, vec![Item::command(Command::Eof("f".into()))]);
        assert_eq!(stages[0].report().get("seen"), 0);
    }
}
