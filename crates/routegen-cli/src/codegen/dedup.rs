//! Generated identifier disambiguation

use heck::ToSnakeCase;
use std::collections::HashMap;

/// Assigns collision numbers to synthesized names
///
/// Names are counted by their snake_case form, the shape templates turn
/// them into. `menuServiceGet` and `MenuServiceGet` therefore share one
/// counter while each keeps its own spelling.
///
/// One instance belongs to one generation pass. Numbering restarts with a
/// new instance, so passes never influence each other.
#[derive(Debug, Default)]
pub struct NameDeduper {
    counters: HashMap<String, u32>,
}

impl NameDeduper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number `candidate`: 0 the first time, then 1, 2, ...
    pub fn assign(&mut self, candidate: &str) -> (String, u32) {
        let counter = self.counters.entry(candidate.to_snake_case()).or_insert(0);
        let number = *counter;
        *counter += 1;
        (candidate.to_string(), number)
    }

    /// How many times `candidate`, in any casing, has been assigned
    pub fn seen(&self, candidate: &str) -> u32 {
        self.counters
            .get(&candidate.to_snake_case())
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct identifiers assigned so far
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
