//! Rule model for parsed ELIZA scripts.
//!
//! A script is a greeting, a set of keyword rules, a catch-all rule and a
//! memory rule. A keyword rule like
//!
//! ```text
//! (MY = YOUR 2 ((0 YOUR 0) (YOUR 3) (WHY DO YOU SAY YOUR 3)))
//! ```
//!
//! is represented as a [`KeywordRule`] with keyword `MY`, substitute `YOUR`,
//! precedence `2` and one [`Transform`] whose decomposition is
//! `[Count(0), Word("YOUR"), Count(0)]` and whose reassemblies are two
//! [`Reassembly::Pattern`] templates.
//!
//! Every type renders back to script notation through [`fmt::Display`].

use std::fmt;
use std::str::FromStr;

use crate::error::MalformedScript;

/// Write `items` separated by single spaces.
fn write_spaced<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// The canonical name of a keyword rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// An ordinary keyword, upper-cased.
    Word(String),
    /// The catch-all rule, written `NONE` in scripts. No input word selects it.
    CatchAll,
}

impl Keyword {
    /// Canonicalize a keyword as written in a script.
    pub fn parse(raw: &str) -> Self {
        let word = raw.to_uppercase();
        if word == "NONE" {
            Keyword::CatchAll
        } else {
            Keyword::Word(word)
        }
    }

    /// The keyword's word, or `None` for the catch-all.
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Keyword::Word(word) => Some(word),
            Keyword::CatchAll => None,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keyword::Word(word) => write!(f, "{word}"),
            Keyword::CatchAll => write!(f, "NONE"),
        }
    }
}

/// One element of a decomposition pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Matches exactly this word.
    Word(String),
    /// `0` matches any number of words; `n > 0` matches exactly `n` words.
    Count(usize),
    /// A parenthesized class kept in its written form, e.g. `(* WANT NEED)`
    /// or `(/FAMILY)`. The leading `*` or `/` is interpreted at match time.
    Class(String),
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Word(word) => write!(f, "{word}"),
            Element::Count(n) => write!(f, "{n}"),
            Element::Class(class) => write!(f, "{class}"),
        }
    }
}

/// One token of a reassembly template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    /// Emitted as written.
    Word(String),
    /// Replaced by the 1-indexed captured fragment.
    Slot(usize),
}

impl fmt::Display for TemplateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateToken::Word(word) => write!(f, "{word}"),
            TemplateToken::Slot(n) => write!(f, "{n}"),
        }
    }
}

/// What a matched decomposition does next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reassembly {
    /// Build a reply from the template.
    Pattern(Vec<TemplateToken>),
    /// `(=KEY)`: continue with the rule for `KEY`.
    Reference(String),
    /// `(NEWKEY)`: give up on this keyword and try the next one on the stack.
    NewKey,
    /// `(PRE (template) (=KEY))`: rewrite the input with the template, then
    /// continue with the rule for `KEY`.
    Pre {
        template: Vec<TemplateToken>,
        keyword: String,
    },
}

impl Reassembly {
    /// The keyword this reassembly redirects to, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Reassembly::Reference(keyword) | Reassembly::Pre { keyword, .. } => Some(keyword),
            Reassembly::Pattern(_) | Reassembly::NewKey => None,
        }
    }
}

impl fmt::Display for Reassembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reassembly::Pattern(template) => {
                write!(f, "(")?;
                write_spaced(f, template)?;
                write!(f, ")")
            }
            Reassembly::Reference(keyword) => write!(f, "(={keyword})"),
            Reassembly::NewKey => write!(f, "(NEWKEY)"),
            Reassembly::Pre { template, keyword } => {
                write!(f, "(PRE (")?;
                write_spaced(f, template)?;
                write!(f, ") (={keyword}))")
            }
        }
    }
}

/// A decomposition pattern with its reassemblies.
///
/// Reassemblies are used in rotation: each successful match takes the one
/// after the previous pick, wrapping around at the end of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transform {
    pub decomposition: Vec<Element>,
    pub reassemblies: Vec<Reassembly>,
    next_index: usize,
}

impl Transform {
    pub fn new(decomposition: Vec<Element>, reassemblies: Vec<Reassembly>) -> Self {
        Self {
            decomposition,
            reassemblies,
            next_index: 0,
        }
    }

    /// Index of the reassembly the next match will use.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Take the next reassembly in rotation and advance the cursor.
    ///
    /// Returns `None` when the reassembly list is empty.
    pub fn next_reassembly(&mut self) -> Option<&Reassembly> {
        if self.reassemblies.is_empty() {
            return None;
        }
        let index = self.next_index % self.reassemblies.len();
        self.next_index = (index + 1) % self.reassemblies.len();
        self.reassemblies.get(index)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "((")?;
        write_spaced(f, &self.decomposition)?;
        write!(f, ")")?;
        for reassembly in &self.reassemblies {
            write!(f, " {reassembly}")?;
        }
        write!(f, ")")
    }
}

/// Everything a script says about one keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub keyword: Keyword,
    /// The keyword exactly as written in the script.
    pub raw_keyword: String,
    /// Word that replaces the keyword in the input, e.g. `I` becomes `YOU`.
    pub substitute: Option<String>,
    /// Higher precedence keywords are tried first.
    pub precedence: usize,
    /// Tag classes from `DLIST(/...)`.
    pub tags: Vec<String>,
    /// `(=KEY)` in the rule body: used when no transform matches.
    pub link: Option<String>,
    pub transforms: Vec<Transform>,
}

impl KeywordRule {
    pub fn new(raw_keyword: impl Into<String>) -> Self {
        let raw_keyword = raw_keyword.into();
        Self {
            keyword: Keyword::parse(&raw_keyword),
            raw_keyword,
            substitute: None,
            precedence: 0,
            tags: Vec::new(),
            link: None,
            transforms: Vec::new(),
        }
    }

    /// Whether this rule can respond at all, i.e. it has transforms or a link.
    ///
    /// Rules without either only carry a substitute or tags.
    pub fn is_applicable(&self) -> bool {
        !self.transforms.is_empty() || self.link.is_some()
    }

    /// Every keyword this rule can redirect to.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        let from_transforms = self
            .transforms
            .iter()
            .flat_map(|transform| transform.reassemblies.iter())
            .filter_map(Reassembly::target);
        self.link.as_deref().into_iter().chain(from_transforms)
    }
}

impl fmt::Display for KeywordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.raw_keyword)?;
        if let Some(substitute) = &self.substitute {
            write!(f, " = {substitute}")?;
        }
        if self.precedence > 0 {
            write!(f, " {}", self.precedence)?;
        }
        if !self.tags.is_empty() {
            write!(f, " DLIST(/")?;
            write_spaced(f, &self.tags)?;
            write!(f, ")")?;
        }
        for transform in &self.transforms {
            write!(f, " {transform}")?;
        }
        if let Some(link) = &self.link {
            write!(f, " (={link})")?;
        }
        write!(f, ")")
    }
}

/// A decomposition paired with a single reassembly template, used by the
/// memory rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryTransformation {
    pub decomposition: Vec<Element>,
    pub reassembly: Vec<TemplateToken>,
}

impl fmt::Display for MemoryTransformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        write_spaced(f, &self.decomposition)?;
        write!(f, " = ")?;
        write_spaced(f, &self.reassembly)?;
        write!(f, ")")
    }
}

/// The `MEMORY` rule: a trigger keyword and four banked transformations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRule {
    pub keyword: String,
    pub transformations: [MemoryTransformation; 4],
}

impl fmt::Display for MemoryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(MEMORY {}", self.keyword)?;
        for transformation in &self.transformations {
            write!(f, " {transformation}")?;
        }
        write!(f, ")")
    }
}

/// A parsed and validated script.
///
/// Only the parser constructs these, so a `ScriptData` always has a
/// catch-all rule, a memory rule and no dangling keyword references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptData {
    pub(crate) greeting: Vec<String>,
    pub(crate) rules: Vec<KeywordRule>,
    pub(crate) catch_all: KeywordRule,
    pub(crate) memory: MemoryRule,
}

impl ScriptData {
    /// The greeting words, e.g. `HOW DO YOU DO . PLEASE TELL ME YOUR PROBLEM`.
    pub fn greeting(&self) -> &[String] {
        &self.greeting
    }

    /// Keyword rules in declaration order, without the catch-all.
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Look up the rule for a keyword.
    pub fn rule(&self, keyword: &str) -> Option<&KeywordRule> {
        self.rules
            .iter()
            .find(|rule| rule.keyword.as_word() == Some(keyword))
    }

    /// The `NONE` rule.
    pub fn catch_all(&self) -> &KeywordRule {
        &self.catch_all
    }

    pub fn memory(&self) -> &MemoryRule {
        &self.memory
    }
}

impl FromStr for ScriptData {
    type Err = MalformedScript;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s)
    }
}

impl fmt::Display for ScriptData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        write_spaced(f, &self.greeting)?;
        writeln!(f, ")")?;
        writeln!(f, "START")?;
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }
        writeln!(f, "{}", self.catch_all)?;
        writeln!(f, "{}", self.memory)?;
        write!(f, "()")
    }
}
