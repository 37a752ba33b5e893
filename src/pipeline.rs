//! The streaming pipeline: items, stages, buffering and orchestration.
//!
//! - [`item`] - the [`Item`] model shared by all stages
//! - [`stage`] - the [`Stage`] contract and depth-first [`dispatch`]
//! - [`buffered`] - [`Buffer`], deferred insertion and [`BufferedStage`]
//! - [`counters`] - named counters reported by stages
//! - [`runner`] - the [`Pipeline`] orchestrator

pub mod buffered;
pub mod counters;
pub mod item;
pub mod runner;
pub mod stage;

pub use buffered::{Buffer, BufferPolicy, BufferedStage, DeferredInsertion};
pub use counters::Counters;
pub use item::{Command, Data, Item};
pub use runner::{Pipeline, build, run};
pub use stage::{Emitter, Stage, dispatch};
