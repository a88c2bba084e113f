//! The per-session rule table and rule application.

use std::collections::HashMap;

use eliza_script::ScriptData;
use eliza_script::ast::{KeywordRule, Reassembly};

use crate::matcher::{TagIndex, match_pattern};
use crate::reassembly::reassemble;

/// The result of applying one keyword rule to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A reply, still as upper-case words.
    Reply(Vec<String>),
    /// Continue with another keyword, optionally on rewritten words.
    Link {
        keyword: String,
        words: Option<Vec<String>>,
    },
    /// Try the next keyword on the stack.
    NewKey,
    /// No transform matched and the rule has no link.
    NoMatch,
}

/// A session's own copy of a script's rules.
///
/// Reassembly cursors advance as rules are applied, so each session keeps
/// a separate table cloned from the shared [`ScriptData`].
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: HashMap<String, KeywordRule>,
    catch_all: KeywordRule,
    tags: TagIndex,
}

impl RuleTable {
    pub fn new(script: &ScriptData) -> Self {
        let rules = script
            .rules()
            .iter()
            .filter_map(|rule| Some((rule.keyword.as_word()?.to_string(), rule.clone())))
            .collect();
        Self {
            rules,
            catch_all: script.catch_all().clone(),
            tags: TagIndex::new(script.rules()),
        }
    }

    /// The rule for an upper-case input word.
    pub fn get(&self, word: &str) -> Option<&KeywordRule> {
        self.rules.get(word)
    }

    pub fn tags(&self) -> &TagIndex {
        &self.tags
    }

    /// Apply the rule for `keyword` to the words of an input.
    pub fn apply(&mut self, keyword: &str, words: &[String]) -> Outcome {
        match self.rules.get_mut(keyword) {
            Some(rule) => apply_rule(rule, words, &self.tags),
            None => Outcome::NoMatch,
        }
    }

    /// Apply the `NONE` rule.
    pub fn apply_catch_all(&mut self, words: &[String]) -> Outcome {
        apply_rule(&mut self.catch_all, words, &self.tags)
    }
}

/// Try each transform in order. The first one that matches and has a
/// reassembly decides the outcome; otherwise the rule's link is followed
/// if it has one.
fn apply_rule(rule: &mut KeywordRule, words: &[String], tags: &TagIndex) -> Outcome {
    for transform in &mut rule.transforms {
        let Some(fragments) = match_pattern(&transform.decomposition, words, tags) else {
            continue;
        };
        let Some(reassembly) = transform.next_reassembly() else {
            continue;
        };
        return match reassembly {
            Reassembly::Pattern(template) => Outcome::Reply(reassemble(template, &fragments)),
            Reassembly::Reference(keyword) => Outcome::Link {
                keyword: keyword.clone(),
                words: None,
            },
            Reassembly::Pre { template, keyword } => Outcome::Link {
                keyword: keyword.clone(),
                words: Some(reassemble(template, &fragments)),
            },
            Reassembly::NewKey => Outcome::NewKey,
        };
    }

    match &rule.link {
        Some(keyword) => Outcome::Link {
            keyword: keyword.clone(),
            words: None,
        },
        None => Outcome::NoMatch,
    }
}
