//! Named counters reported by stages and dictionaries.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Monotonic counters keyed by name, reported in name order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters(BTreeMap<String, u64>);

impl Counters {
    /// Create an empty counter set.
    pub fn new() -> Self {
        Counters(BTreeMap::new())
    }

    /// Increment a counter by one.
    pub fn increment(&mut self, name: &str) {
        self.add(name, 1);
    }

    /// Increment a counter by `amount`.
    pub fn add(&mut self, name: &str, amount: u64) {
        match self.0.get_mut(name) {
            Some(value) => *value += amount,
            None => {
                self.0.insert(name.to_string(), amount);
            }
        }
    }

    /// Current value of a counter, zero when never incremented.
    pub fn get(&self, name: &str) -> u64 {
        self.0.get(name).copied().unwrap_or(0)
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Check if no counter was ever incremented.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Counters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(name, value)| format!("{name} = {value}"))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
