//! Buffering stages with deferred insertion.
//!
//! A [`Buffer`] withholds items until it is flushed. While items are held,
//! new items can be scheduled for insertion at a recorded position; at flush
//! time the insertions are applied in ascending position order, each one
//! against the buffer as already modified by the previous ones, and the
//! whole content is forwarded.
//!
//! [`BufferedStage`] composes a buffer with a [`BufferPolicy`] that decides
//! when to flush and which insertions to schedule.
//!
//! # Examples
//!
//! ```
//! use termflow::pipeline::{Buffer, Item};
//!
//! let mut buffer = Buffer::new();
//! buffer.enqueue(Item::line("a"));
//! buffer.enqueue(Item::line("b"));
//! buffer.deferred_insert(1, Item::line("x"));
//!
//! let mut out: Vec<Item> = Vec::new();
//! buffer.flush(&mut out);
//!
//! assert_eq!(out, vec![Item::line("a"), Item::line("x"), Item::line("b")]);
//! assert!(buffer.is_empty());
//! ```

use log::trace;

use super::counters::Counters;
use super::item::{Command, Data, Item};
use super::stage::{Emitter, Stage};

/// An item scheduled for insertion at flush time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeferredInsertion {
    /// Index in the buffer at which the item is inserted
    pub position: usize,
    /// The item to insert
    pub item: Item,
}

impl DeferredInsertion {
    /// Create a new deferred insertion.
    pub fn new(position: usize, item: Item) -> Self {
        DeferredInsertion { position, item }
    }
}

/// Ordered item buffer with pending insertions.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    items: Vec<Item>,
    pending: Vec<DeferredInsertion>,
}

impl Buffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Buffer::default()
    }

    /// Append an item.
    pub fn enqueue(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Schedule `item` for insertion at `position` when the buffer flushes.
    pub fn deferred_insert(&mut self, position: usize, item: Item) {
        self.pending.push(DeferredInsertion::new(position, item));
    }

    /// Buffered items in order, without pending insertions.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Pending insertions in registration order.
    pub fn pending(&self) -> &[DeferredInsertion] {
        &self.pending
    }

    /// Number of buffered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing is buffered or pending.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.pending.is_empty()
    }

    /// Apply pending insertions, forward every item and clear the buffer.
    ///
    /// Insertions are sorted by position (stable for equal positions) and
    /// applied one after another to the same buffer, so a recorded position
    /// refers to the buffer as left by the insertions before it. Positions
    /// past the end append.
    ///
    /// Returns the number of forwarded items.
    pub fn flush(&mut self, out: &mut dyn Emitter) -> usize {
        let mut pending = std::mem::take(&mut self.pending);
        pending.sort_by_key(|insertion| insertion.position);

        for insertion in pending {
            let position = insertion.position.min(self.items.len());
            self.items.insert(position, insertion.item);
        }

        let count = self.items.len();
        for item in self.items.drain(..) {
            out.forward(item);
        }
        count
    }
}

/// Flush behaviour of a [`BufferedStage`].
pub trait BufferPolicy: Send {
    /// Name of the stage built on this policy.
    fn name(&self) -> &str;

    /// Whether the buffer should flush after `items` grew by one.
    fn should_flush(&self, _items: &[Item]) -> bool {
        true
    }

    /// Compute insertions for the items about to be flushed.
    fn prepare_flush(&mut self, _items: &[Item], _counters: &mut Counters) -> Vec<DeferredInsertion> {
        Vec::new()
    }

    /// Observe a command after the buffer was flushed for it.
    fn on_command(&mut self, _command: &Command) {}
}

/// A stage that buffers its input according to a policy.
#[derive(Debug)]
pub struct BufferedStage<P: BufferPolicy> {
    policy: P,
    buffer: Buffer,
    counters: Counters,
}

impl<P: BufferPolicy> BufferedStage<P> {
    /// Create a stage around a policy.
    pub fn new(policy: P) -> Self {
        BufferedStage {
            policy,
            buffer: Buffer::new(),
            counters: Counters::new(),
        }
    }

    /// The policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// The buffer.
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Register the policy's insertions, then flush the buffer.
    pub fn flush(&mut self, out: &mut dyn Emitter) {
        if self.buffer.is_empty() {
            return;
        }

        let insertions = self
            .policy
            .prepare_flush(self.buffer.items(), &mut self.counters);
        for insertion in insertions {
            self.buffer.deferred_insert(insertion.position, insertion.item);
        }

        let forwarded = self.buffer.flush(out);
        self.counters.increment("flushes");
        trace!("{} flushed {} items", self.policy.name(), forwarded);
    }
}

impl<P: BufferPolicy> Stage for BufferedStage<P> {
    fn name(&self) -> &str {
        self.policy.name()
    }

    fn process_data(&mut self, data: Data, out: &mut dyn Emitter) {
        self.counters.increment("data");
        self.buffer.enqueue(Item::Data(data));
        if self.policy.should_flush(self.buffer.items()) {
            self.flush(out);
        }
    }

    fn process_command(&mut self, command: Command, out: &mut dyn Emitter) {
        self.counters.increment("commands");
        self.flush(out);
        self.policy.on_command(&command);
        out.forward(Item::Command(command));
    }

    fn report(&self) -> Counters {
        self.counters.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<Item> {
        texts.iter().map(|text| Item::line(*text)).collect()
    }

    /// Flushes when a line equal to "." arrives.
    struct Dot;

    impl BufferPolicy for Dot {
        fn name(&self) -> &str {
            "dot"
        }

        fn should_flush(&self, items: &[Item]) -> bool {
            items.last() == Some(&Item::line("."))
        }
    }

    /// Inserts a marker in front of every buffered item.
    struct Marker;

    impl BufferPolicy for Marker {
        fn name(&self) -> &str {
            "marker"
        }

        fn should_flush(&self, items: &[Item]) -> bool {
            items.len() == 3
        }

        fn prepare_flush(&mut self, items: &[Item], counters: &mut Counters) -> Vec<DeferredInsertion> {
            counters.add("markers", items.len() as u64);
            (0..items.len())
                .map(|position| DeferredInsertion::new(position, Item::line(format!("m{position}"))))
                .collect()
        }
    }

    #[test]
    fn test_flush_keeps_order() {
        let mut buffer = Buffer::new();
        for item in lines(&["a", "b", "c"]) {
            buffer.enqueue(item);
        }
        let mut out: Vec<Item> = Vec::new();
        assert_eq!(buffer.flush(&mut out), 3);
        assert_eq!(out, lines(&["a", "b", "c"]));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_insertion_lands_before_original_item() {
        for position in 0..=3 {
            let mut buffer = Buffer::new();
            for item in lines(&["a", "b", "c"]) {
                buffer.enqueue(item);
            }
            buffer.deferred_insert(position, Item::line("x"));

            let mut out: Vec<Item> = Vec::new();
            buffer.flush(&mut out);

            let mut expected = lines(&["a", "b", "c"]);
            expected.insert(position, Item::line("x"));
            assert_eq!(out, expected, "insertion at {position}");
        }
    }

    #[test]
    fn test_insertions_apply_ascending_against_mutated_buffer() {
        let mut buffer = Buffer::new();
        for item in lines(&["a", "b", "c"]) {
            buffer.enqueue(item);
        }
        buffer.deferred_insert(2, Item::line("y"));
        buffer.deferred_insert(0, Item::line("x"));
        buffer.deferred_insert(2, Item::line("z"));

        let mut out: Vec<Item> = Vec::new();
        buffer.flush(&mut out);

        // x at 0 shifts everything right, y and z then land at index 2 of the
        // grown buffer, z in front of y
        assert_eq!(out, lines(&["x", "a", "z", "y", "b", "c"]));
    }

    #[test]
    fn test_insertion_past_end_appends() {
        let mut buffer = Buffer::new();
        buffer.enqueue(Item::line("a"));
        buffer.deferred_insert(7, Item::line("x"));

        let mut out: Vec<Item> = Vec::new();
        buffer.flush(&mut out);
        assert_eq!(out, lines(&["a", "x"]));
    }

    #[test]
    fn test_policy_controls_flush() {
        let mut stage = BufferedStage::new(Dot);
        let mut out: Vec<Item> = Vec::new();

        stage.consume(Item::line("a"), &mut out);
        stage.consume(Item::line("b"), &mut out);
        assert!(out.is_empty());
        assert_eq!(stage.buffer().len(), 2);

        stage.consume(Item::line("."), &mut out);
        assert_eq!(out, lines(&["a", "b", "."]));

        let report = stage.report();
        assert_eq!(report.get("data"), 3);
        assert_eq!(report.get("flushes"), 1);
    }

    #[test]
    fn test_command_flushes_before_forwarding() {
        let mut stage = BufferedStage::new(Dot);
        let mut out: Vec<Item> = Vec::new();

        stage.consume(Item::line("a"), &mut out);
        stage.consume(Item::command(Command::Eol("f".into())), &mut out);
        stage.consume(Item::command(Command::Eof("f".into())), &mut out);

        assert_eq!(
            out,
            vec![
                Item::line("a"),
                Item::command(Command::Eol("f".into())),
                Item::command(Command::Eof("f".into())),
            ]
        );
        // the empty buffer does not count as a flush
        assert_eq!(stage.report().get("flushes"), 1);
        assert_eq!(stage.report().get("commands"), 2);
    }

    #[test]
    fn test_prepared_insertions_are_applied() {
        let mut stage = BufferedStage::new(Marker);
        let mut out: Vec<Item> = Vec::new();

        for item in lines(&["a", "b", "c"]) {
            stage.consume(item, &mut out);
        }

        // m0 lands at 0, m1 at 1 of the grown buffer, m2 at 2 of that one
        assert_eq!(out, lines(&["m0", "m1", "m2", "a", "b", "c"]));
        assert_eq!(stage.report().get("markers"), 3);
    }
}
