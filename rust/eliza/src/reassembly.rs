//! Reassembly template expansion.

use eliza_script::ast::TemplateToken;

/// Stands in for a placeholder that names no captured fragment.
pub const MISSING_FRAGMENT: &str = "HMM";

/// Expand a template against the fragments captured by a decomposition.
///
/// Placeholder `k` is replaced by the words of fragment `k` (1-indexed).
/// Placeholder `0`, or one past the last fragment, becomes
/// [`MISSING_FRAGMENT`].
pub fn reassemble(template: &[TemplateToken], fragments: &[String]) -> Vec<String> {
    let mut words = Vec::new();
    for token in template {
        match token {
            TemplateToken::Word(word) => words.push(word.clone()),
            TemplateToken::Slot(k) => match k.checked_sub(1).and_then(|i| fragments.get(i)) {
                Some(fragment) => words.extend(fragment.split_whitespace().map(String::from)),
                None => words.push(MISSING_FRAGMENT.to_string()),
            },
        }
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> TemplateToken {
        TemplateToken::Word(s.into())
    }

    fn fragments(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn test_slots_expand_to_fragment_words() {
        let template = [text("WHY"), text("DO"), text("YOU"), text("WANT"), TemplateToken::Slot(4)];
        let captured = fragments(&["", "YOU", "NEED", "A  VACATION"]);
        assert_eq!(
            reassemble(&template, &captured),
            vec!["WHY", "DO", "YOU", "WANT", "A", "VACATION"]
        );
    }

    #[test]
    fn test_empty_fragment_contributes_nothing() {
        let template = [text("OH"), TemplateToken::Slot(1), text("REALLY")];
        assert_eq!(reassemble(&template, &fragments(&[""])), vec!["OH", "REALLY"]);
    }

    #[test]
    fn test_out_of_range_slots_use_placeholder() {
        let template = [TemplateToken::Slot(0), TemplateToken::Slot(3)];
        assert_eq!(
            reassemble(&template, &fragments(&["A", "B"])),
            vec![MISSING_FRAGMENT, MISSING_FRAGMENT]
        );
    }
}
