//! Decomposition matching.
//!
//! A decomposition is matched against the whole word list. Each element
//! captures exactly one fragment:
//!
//! - `0` captures any run of words, possibly empty
//! - `n` captures exactly `n` words
//! - a literal word captures itself
//! - `(* A B)` captures one word that is `A` or `B`
//! - `(/TAG)` captures one word whose rule carries `TAG`
//!
//! Unbounded wildcards are tried shortest first, and failed
//! `(element, word)` positions are remembered so no position is explored
//! twice. Fragments are tracked as word ranges and only joined once the
//! whole pattern has matched.

use std::collections::{HashMap, HashSet};

use eliza_script::ast::{Element, KeywordRule};

/// Tag name to the keywords declared with it in a `DLIST`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    tags: HashMap<String, Vec<String>>,
}

impl TagIndex {
    pub fn new<'a>(rules: impl IntoIterator<Item = &'a KeywordRule>) -> Self {
        let mut tags: HashMap<String, Vec<String>> = HashMap::new();
        for rule in rules {
            let Some(keyword) = rule.keyword.as_word() else {
                continue;
            };
            for tag in &rule.tags {
                tags.entry(tag.clone()).or_default().push(keyword.to_string());
            }
        }
        Self { tags }
    }

    /// Keywords tagged with `tag`, in script order.
    pub fn members(&self, tag: &str) -> &[String] {
        self.tags.get(tag).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, tag: &str, word: &str) -> bool {
        self.members(tag).iter().any(|member| member == word)
    }
}

/// Whether `word` belongs to a class written like `(* A B)` or `(/TAG)`.
///
/// A class with neither marker matches nothing.
fn class_contains(class: &str, word: &str, tags: &TagIndex) -> bool {
    let inner = class
        .strip_prefix('(')
        .and_then(|class| class.strip_suffix(')'))
        .unwrap_or(class)
        .trim_start();

    if let Some(alternatives) = inner.strip_prefix('*') {
        alternatives.split_whitespace().any(|alt| alt == word)
    } else if let Some(names) = inner.strip_prefix('/') {
        names.split_whitespace().any(|tag| tags.contains(tag, word))
    } else {
        false
    }
}

struct Matcher<'a> {
    pattern: &'a [Element],
    words: &'a [String],
    tags: &'a TagIndex,
    failed: HashSet<(usize, usize)>,
    spans: Vec<(usize, usize)>,
}

impl<'a> Matcher<'a> {
    /// Match `pattern[p..]` against `words[w..]`.
    fn matches_from(&mut self, p: usize, w: usize) -> bool {
        let (pattern, words) = (self.pattern, self.words);
        let Some(element) = pattern.get(p) else {
            return w == words.len();
        };
        if self.failed.contains(&(p, w)) {
            return false;
        }

        let matched = match element {
            Element::Count(0) => {
                (w..=words.len()).any(|end| self.can_start(p + 1, end) && self.capture(p, w, end))
            }
            Element::Count(n) => match w.checked_add(*n) {
                Some(end) if end <= words.len() => self.capture(p, w, end),
                _ => false,
            },
            Element::Word(literal) => {
                words.get(w).is_some_and(|word| word == literal) && self.capture(p, w, w + 1)
            }
            Element::Class(class) => {
                words
                    .get(w)
                    .is_some_and(|word| class_contains(class, word, self.tags))
                    && self.capture(p, w, w + 1)
            }
        };

        if !matched {
            self.failed.insert((p, w));
        }
        matched
    }

    /// Whether element `p` could begin at word `w`, judged by that word
    /// alone.
    fn can_start(&self, p: usize, w: usize) -> bool {
        let words = self.words;
        match self.pattern.get(p) {
            None => w == words.len(),
            Some(Element::Count(0)) => true,
            Some(Element::Count(n)) => w.checked_add(*n).is_some_and(|end| end <= words.len()),
            Some(Element::Word(literal)) => words.get(w).is_some_and(|word| word == literal),
            Some(Element::Class(class)) => words
                .get(w)
                .is_some_and(|word| class_contains(class, word, self.tags)),
        }
    }

    /// Capture `words[w..end]` for element `p` and match the rest.
    fn capture(&mut self, p: usize, w: usize, end: usize) -> bool {
        self.spans.push((w, end));
        if self.matches_from(p + 1, end) {
            true
        } else {
            self.spans.pop();
            false
        }
    }
}

/// Match a decomposition against the words of an input, returning one
/// fragment per element.
///
/// ```
/// use eliza::matcher::{match_pattern, TagIndex};
/// use eliza_script::ast::Element;
///
/// let pattern = [Element::Count(0), Element::Word("THINK".into()), Element::Count(0)];
/// let words: Vec<String> = ["I", "THINK", "SO"].map(String::from).to_vec();
///
/// let fragments = match_pattern(&pattern, &words, &TagIndex::default()).unwrap();
/// assert_eq!(fragments, ["I", "THINK", "SO"]);
/// ```
pub fn match_pattern(pattern: &[Element], words: &[String], tags: &TagIndex) -> Option<Vec<String>> {
    let mut matcher = Matcher {
        pattern,
        words,
        tags,
        failed: HashSet::new(),
        spans: Vec::with_capacity(pattern.len()),
    };
    if !matcher.matches_from(0, 0) {
        return None;
    }
    let fragments = matcher
        .spans
        .iter()
        .map(|&(start, end)| words[start..end].join(" "))
        .collect();
    Some(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eliza_script::parse;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    fn word(s: &str) -> Element {
        Element::Word(s.into())
    }

    fn family() -> TagIndex {
        let script = parse(
            "(HI)
             (MOTHER DLIST(/NOUN FAMILY))
             (FATHER DLIST(/NOUN FAMILY))
             (FEEL DLIST(/BELIEF))
             (NONE ((0) (GO ON)))
             (MEMORY MY (0 = A) (0 = B) (0 = C) (0 = D))",
        )
        .unwrap();
        TagIndex::new(script.rules())
    }

    #[test]
    fn test_tag_index_members() {
        let tags = family();
        assert_eq!(tags.members("FAMILY"), ["MOTHER", "FATHER"]);
        assert_eq!(tags.members("BELIEF"), ["FEEL"]);
        assert!(tags.members("PET").is_empty());
        assert!(tags.contains("NOUN", "FATHER"));
        assert!(!tags.contains("NOUN", "FEEL"));
    }

    #[test]
    fn test_unbounded_wildcard_captures_between_literals() {
        let pattern = [Element::Count(0), word("THINK"), Element::Count(0)];
        let tags = TagIndex::default();

        assert_eq!(
            match_pattern(&pattern, &words("I THINK ABOUT NOTHING AT ALL"), &tags),
            Some(vec!["I".into(), "THINK".into(), "ABOUT NOTHING AT ALL".into()])
        );
        assert_eq!(
            match_pattern(&pattern, &words("I THINK"), &tags),
            Some(vec!["I".into(), "THINK".into(), "".into()])
        );
    }

    #[test]
    fn test_wildcard_matches_empty_input() {
        let tags = TagIndex::default();
        assert_eq!(
            match_pattern(&[Element::Count(0)], &[], &tags),
            Some(vec![String::new()])
        );
        assert_eq!(match_pattern(&[], &[], &tags), Some(vec![]));
        assert_eq!(match_pattern(&[], &words("HELLO"), &tags), None);
    }

    #[test]
    fn test_shortest_split_wins() {
        let pattern = [Element::Count(0), word("A"), Element::Count(0)];
        assert_eq!(
            match_pattern(&pattern, &words("X A Y A Z"), &TagIndex::default()),
            Some(vec!["X".into(), "A".into(), "Y A Z".into()])
        );
    }

    #[test]
    fn test_bounded_count() {
        let pattern = [Element::Count(2), Element::Count(0)];
        let tags = TagIndex::default();
        assert_eq!(
            match_pattern(&pattern, &words("ONE TWO THREE"), &tags),
            Some(vec!["ONE TWO".into(), "THREE".into()])
        );
        assert_eq!(match_pattern(&pattern, &words("ONE"), &tags), None);
    }

    #[test]
    fn test_literal_must_consume_all_words() {
        let pattern = [word("HELLO")];
        let tags = TagIndex::default();
        assert!(match_pattern(&pattern, &words("HELLO"), &tags).is_some());
        assert_eq!(match_pattern(&pattern, &words("HELLO THERE"), &tags), None);
        assert_eq!(match_pattern(&pattern, &words("HELL"), &tags), None);
    }

    #[test]
    fn test_alternation_class() {
        let pattern = [
            Element::Count(0),
            word("YOU"),
            Element::Class("(* WANT NEED)".into()),
            Element::Count(0),
        ];
        let tags = TagIndex::default();
        assert_eq!(
            match_pattern(&pattern, &words("YOU NEED A VACATION"), &tags),
            Some(vec!["".into(), "YOU".into(), "NEED".into(), "A VACATION".into()])
        );
        assert_eq!(match_pattern(&pattern, &words("YOU HAVE A VACATION"), &tags), None);
    }

    #[test]
    fn test_alternation_class_with_attached_marker() {
        let pattern = [Element::Class("(*SAD UNHAPPY)".into())];
        let tags = TagIndex::default();
        assert!(match_pattern(&pattern, &words("SAD"), &tags).is_some());
        assert!(match_pattern(&pattern, &words("UNHAPPY"), &tags).is_some());
        assert!(match_pattern(&pattern, &words("*SAD"), &tags).is_none());
    }

    #[test]
    fn test_tag_class() {
        let pattern = [
            Element::Count(0),
            word("YOUR"),
            Element::Count(0),
            Element::Class("(/FAMILY)".into()),
            Element::Count(0),
        ];
        let tags = family();
        assert_eq!(
            match_pattern(&pattern, &words("YOUR OLD FATHER SNORES"), &tags),
            Some(vec![
                "".into(),
                "YOUR".into(),
                "OLD".into(),
                "FATHER".into(),
                "SNORES".into(),
            ])
        );
        assert_eq!(match_pattern(&pattern, &words("YOUR FEEL"), &tags), None);
    }

    #[test]
    fn test_unmarked_class_matches_nothing() {
        let pattern = [Element::Class("(HELLO)".into())];
        assert_eq!(match_pattern(&pattern, &words("HELLO"), &TagIndex::default()), None);
    }

    #[test]
    fn test_huge_bounded_count_does_not_overflow() {
        let pattern = [Element::Count(0), Element::Count(usize::MAX)];
        let tags = TagIndex::default();
        assert_eq!(match_pattern(&pattern, &words("ONE TWO"), &tags), None);
        assert_eq!(match_pattern(&[Element::Count(usize::MAX)], &[], &tags), None);
    }

    #[test]
    fn test_long_input_matches_quickly() {
        let mut input = words("YOU REMEMBER");
        for _ in 0..20_000 {
            input.extend(words("YOU THINK I"));
        }
        let pattern = [
            Element::Count(0),
            word("YOU"),
            word("REMEMBER"),
            Element::Count(0),
        ];
        let fragments = match_pattern(&pattern, &input, &TagIndex::default()).unwrap();
        assert_eq!(fragments[0], "");
        assert_eq!(fragments[3].split(' ').count(), 60_000);

        let missing = [Element::Count(0), word("NEVER"), Element::Count(0)];
        assert_eq!(match_pattern(&missing, &input, &TagIndex::default()), None);
    }

    proptest! {
        #[test]
        fn adversarial_wildcards_terminate(zeros in 1usize..24, length in 0usize..48) {
            // Many wildcards and a literal that never occurs.
            let mut pattern = vec![Element::Count(0); zeros];
            pattern.push(word("B"));
            pattern.extend(vec![Element::Count(0); zeros]);
            let input = vec!["A".to_string(); length];

            prop_assert_eq!(match_pattern(&pattern, &input, &TagIndex::default()), None);
        }

        #[test]
        fn wildcards_capture_every_word(length in 0usize..32) {
            let input: Vec<String> = (0..length).map(|i| i.to_string()).collect();
            let pattern = [Element::Count(0), Element::Count(0)];
            let fragments = match_pattern(&pattern, &input, &TagIndex::default()).unwrap();
            prop_assert_eq!(fragments.len(), 2);
            prop_assert_eq!(fragments[0].as_str(), "");
            prop_assert_eq!(fragments[1].clone(), input.join(" "));
        }
    }
}
