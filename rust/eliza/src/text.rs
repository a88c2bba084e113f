//! Input normalization and reply formatting.
//!
//! Input is canonicalized and upper-cased before matching, so scripts only
//! ever see words like `DON'T` and the delimiters `,` and `.`. Replies are
//! assembled as upper-case word lists and turned back into sentence case on
//! the way out.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Canonicalize raw user input for matching.
///
/// Curly and angled quotes become plain ones, accents become apostrophes,
/// `!` and `?` end sentences like `.`, and `;`, `:`, en-dashes and
/// em-dashes separate clauses like `,`. The result is upper-cased.
pub fn normalize(input: &str) -> String {
    let canonical: String = input
        .chars()
        .filter(|ch| !matches!(ch, '¡' | '¿'))
        .map(|ch| match ch {
            '‘' | '’' | '‚' | '‛' | '´' | '`' => '\'',
            '“' | '”' | '„' | '‟' | '«' | '»' | '‹' | '›' => '"',
            '!' | '?' => '.',
            ';' | ':' | '–' | '—' => ',',
            ch => ch,
        })
        .collect();
    canonical.to_uppercase()
}

/// Whether a word is a clause delimiter.
pub fn is_delimiter(word: &str) -> bool {
    word == "," || word == "."
}

/// Split normalized input into words, keeping `,` and `.` as words of
/// their own.
pub fn split_words(normalized: &str) -> Vec<String> {
    let mut words = Vec::new();
    for chunk in normalized.split_whitespace() {
        let mut word = String::new();
        for ch in chunk.chars() {
            if ch == ',' || ch == '.' {
                if !word.is_empty() {
                    words.push(std::mem::take(&mut word));
                }
                words.push(ch.to_string());
            } else {
                word.push(ch);
            }
        }
        if !word.is_empty() {
            words.push(word);
        }
    }
    words
}

fn space_before_punctuation() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+([,.])").expect("valid regex"))
}

fn sentence_start() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(^|[.!?]\s*)(\p{Ll})").expect("valid regex"))
}

fn first_person() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\bi('m|'d|'ve|'ll)?\b").expect("valid regex"))
}

/// Join words with single spaces, attaching `,` and `.` to the word before.
pub fn join_words<S: AsRef<str>>(words: &[S]) -> String {
    let joined = words
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    space_before_punctuation()
        .replace_all(&joined, "$1")
        .into_owned()
}

/// Turn an upper-case reply into sentence case.
///
/// ```
/// use eliza::text::format_reply;
///
/// assert_eq!(
///     format_reply("I AM SORRY.  I'M SURE   ITS NOT PLEASANT"),
///     "I am sorry. I'm sure its not pleasant"
/// );
/// ```
pub fn format_reply(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let lowered = collapsed.to_lowercase();

    let capitalized = sentence_start().replace_all(&lowered, |caps: &Captures| {
        format!("{}{}", &caps[1], caps[2].to_uppercase())
    });

    first_person()
        .replace_all(&capitalized, |caps: &Captures| {
            let suffix = caps.get(1).map_or(String::new(), |m| m.as_str().to_lowercase());
            format!("I{suffix}")
        })
        .into_owned()
}
