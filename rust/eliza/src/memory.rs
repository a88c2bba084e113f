//! Deferred replies from the `MEMORY` rule.

use std::collections::VecDeque;

use eliza_script::ast::MemoryRule;
use tracing::trace;

use crate::hash::memory_slot;
use crate::matcher::{TagIndex, match_pattern};
use crate::reassembly::reassemble;
use crate::text::{format_reply, join_words};

/// Banks formatted replies whenever the memory keyword is applied, and
/// hands them back oldest first.
#[derive(Debug, Clone)]
pub struct MemoryManager {
    rule: MemoryRule,
    queue: VecDeque<String>,
}

impl MemoryManager {
    pub fn new(rule: MemoryRule) -> Self {
        Self {
            rule,
            queue: VecDeque::new(),
        }
    }

    /// Offer the words a keyword is about to be applied to.
    ///
    /// Only the memory keyword is considered. The last word selects one of
    /// the four transformations; if its decomposition matches and the
    /// reassembled reply is not blank, it is queued.
    pub fn consider(&mut self, keyword: &str, words: &[String], tags: &TagIndex) {
        if keyword != self.rule.keyword {
            return;
        }
        let Some(last) = words.last() else {
            return;
        };

        let slot = memory_slot(last);
        let transformation = &self.rule.transformations[slot];
        if let Some(fragments) = match_pattern(&transformation.decomposition, words, tags) {
            let memory = format_reply(&join_words(&reassemble(&transformation.reassembly, &fragments)));
            if memory.is_empty() {
                return;
            }
            trace!(slot, memory = %memory, "queued memory");
            self.queue.push_back(memory);
        }
    }

    /// Take the oldest queued memory.
    pub fn recall(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
