//! The conversation engine.

use std::collections::VecDeque;

use eliza_script::ScriptData;
use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::memory::MemoryManager;
use crate::reassembly::MISSING_FRAGMENT;
use crate::rules::{Outcome, RuleTable};
use crate::text::{format_reply, is_delimiter, join_words, normalize, split_words};

/// Render upper-case reply words as a sentence.
fn render<S: AsRef<str>>(words: &[S]) -> String {
    format_reply(&join_words(words))
}

/// One conversation with a script.
///
/// Each engine owns a copy of the script's rules, so reassembly rotation
/// and queued memories are private to the conversation.
///
/// ```
/// use eliza::{Engine, doctor};
///
/// let mut engine = Engine::new(doctor().unwrap());
/// assert_eq!(engine.greeting(), "How do you do. Please tell me your problem");
/// assert_eq!(engine.respond("I need a vacation"), "What would it mean to you if you got a vacation");
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    rules: RuleTable,
    memory: MemoryManager,
    greeting: String,
    config: EngineConfig,
    variety: usize,
}

impl Engine {
    pub fn new(script: &ScriptData) -> Self {
        Self::with_config(script, EngineConfig::default())
    }

    pub fn with_config(script: &ScriptData, config: EngineConfig) -> Self {
        Self {
            rules: RuleTable::new(script),
            memory: MemoryManager::new(script.memory().clone()),
            greeting: render(script.greeting()),
            config,
            variety: 1,
        }
    }

    /// The script's opening line.
    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// The variety counter's current phase, from 1 to 4.
    pub fn variety(&self) -> usize {
        self.variety
    }

    /// Number of memories waiting to be recalled.
    pub fn pending_memories(&self) -> usize {
        self.memory.len()
    }

    /// Reply to one line of input.
    pub fn respond(&mut self, input: &str) -> String {
        let mut words = split_words(&normalize(input));
        if words.is_empty() {
            return self.greeting.clone();
        }

        self.variety = self.variety % 4 + 1;

        let stack = self.collect_keywords(&mut words);
        debug!(?stack, variety = self.variety, "keyword stack");

        if stack.is_empty() && self.variety == 4 {
            if let Some(memory) = self.memory.recall() {
                debug!("reply from memory");
                return memory;
            }
        }

        if let Some(reply) = self.apply_keywords(stack, words.clone()) {
            return reply;
        }

        if let Outcome::Reply(reply) = self.rules.apply_catch_all(&words) {
            let reply = render(&reply);
            if !reply.is_empty() {
                debug!("reply from catch-all");
                return reply;
            }
        }

        debug!(variety = self.variety, "reply from stock phrases");
        let reply = render(&split_words(self.config.stock_phrase(self.variety)));
        if reply.is_empty() {
            return render(&[MISSING_FRAGMENT]);
        }
        reply
    }

    /// Substitute keywords in place and stack the ones with rules to apply.
    ///
    /// Scanning stops at the first delimiter after a keyword has been found,
    /// and the input is cut there. Clauses before it without keywords are
    /// dropped.
    fn collect_keywords(&self, words: &mut Vec<String>) -> VecDeque<String> {
        let mut stack = VecDeque::new();
        let mut top = 0;
        let mut start = 0;
        let mut i = 0;

        while i < words.len() {
            if is_delimiter(&words[i]) {
                if !stack.is_empty() {
                    words.truncate(i);
                    break;
                }
                start = i + 1;
                i += 1;
                continue;
            }

            if let Some(rule) = self.rules.get(&words[i]) {
                let keyword = words[i].clone();
                if let Some(substitute) = &rule.substitute {
                    words[i] = substitute.clone();
                }

                if rule.is_applicable() {
                    if rule.precedence > top {
                        top = rule.precedence;
                        stack.push_front(keyword);
                    } else {
                        stack.push_back(keyword);
                    }
                }
            }
            i += 1;
        }

        words.drain(..start);
        stack
    }

    /// Work through the keyword stack until a rule produces a reply.
    fn apply_keywords(&mut self, mut stack: VecDeque<String>, mut words: Vec<String>) -> Option<String> {
        let mut redirects = 0;

        while let Some(keyword) = stack.pop_front() {
            self.memory.consider(&keyword, &words, self.rules.tags());

            match self.rules.apply(&keyword, &words) {
                Outcome::Reply(reply) => {
                    let reply = render(&reply);
                    if reply.is_empty() {
                        trace!(keyword = %keyword, "empty reply");
                        return None;
                    }
                    debug!(keyword = %keyword, "reply from keyword");
                    return Some(reply);
                }
                Outcome::Link {
                    keyword: next,
                    words: rewritten,
                } => {
                    redirects += 1;
                    if redirects > self.config.max_redirects {
                        warn!(
                            keyword = %keyword,
                            next = %next,
                            limit = self.config.max_redirects,
                            "too many redirects"
                        );
                        return None;
                    }
                    trace!(from = %keyword, to = %next, "link");
                    if let Some(rewritten) = rewritten {
                        words = rewritten;
                    }
                    stack.push_front(next);
                }
                Outcome::NewKey => trace!(keyword = %keyword, "newkey"),
                Outcome::NoMatch => {
                    trace!(keyword = %keyword, "no match");
                    return None;
                }
            }
        }

        None
    }
}
