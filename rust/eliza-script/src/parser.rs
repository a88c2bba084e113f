//! Parser for ELIZA scripts.
//!
//! Consumes the token stream from [`crate::tokenizer`] and builds a
//! validated [`ScriptData`].
//!
//! ```text
//! script      = greeting 'START'? rule* '()'?
//! greeting    = '(' word* ')'
//! rule        = '(' 'MEMORY' KEY memory{4} ')'
//!             | '(' KEY body* ')'
//! body        = '=' KEY                       → substitute
//!             | NUMBER                        → precedence
//!             | 'DLIST' '(' tag* ')'          → tags
//!             | '(' '=' KEY ')'               → link
//!             | '(' pattern reassembly* ')'   → transform
//! pattern     = '(' (word | NUMBER | class)* ')'
//! class       = '(' word* ')'                 → kept as one element
//! reassembly  = '(' 'PRE' template '(' '=' KEY ')' ')'
//!             | '(' '=' KEY ')'
//!             | '(' 'NEWKEY' ')'
//!             | template
//! template    = '(' (word | NUMBER)* ')'
//! memory      = '(' (word | NUMBER | class)* '=' (word | NUMBER)* ')'
//! ```
//!
//! After parsing, every `(=KEY)` reference, `PRE` target and rule link must
//! name a keyword whose rule has transforms or a link of its own.

use std::collections::HashSet;
use std::iter;

use tracing::debug;

use crate::ast::*;
use crate::error::{MalformedScript, ScriptResult};
use crate::tokenizer::{Token, Tokenizer};

/// Build the error for an unexpected token. Running out of input inside a
/// list is always a parenthesis imbalance.
fn unexpected(expected: &str, found: Token) -> MalformedScript {
    match found {
        Token::End => MalformedScript::UnbalancedParentheses,
        found => MalformedScript::Expected {
            expected: expected.into(),
            found: found.to_string(),
        },
    }
}

/// A token-stream parser.
struct Parser<'a> {
    tokens: Tokenizer<'a>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            tokens: Tokenizer::new(input),
        }
    }

    fn expect_open(&mut self) -> ScriptResult<()> {
        match self.tokens.next() {
            Token::Open => Ok(()),
            other => Err(unexpected("`(`", other)),
        }
    }

    fn expect_close(&mut self) -> ScriptResult<()> {
        match self.tokens.next() {
            Token::Close => Ok(()),
            other => Err(unexpected("`)`", other)),
        }
    }

    fn expect_symbol(&mut self, expected: &str) -> ScriptResult<String> {
        match self.tokens.next() {
            Token::Symbol(symbol) => Ok(symbol),
            other => Err(unexpected(expected, other)),
        }
    }

    // --- Lists of plain words ---

    fn parse_greeting(&mut self) -> ScriptResult<Vec<String>> {
        if self.tokens.next() != Token::Open {
            return Err(MalformedScript::MissingGreeting);
        }
        let mut words = Vec::new();
        loop {
            match self.tokens.next() {
                Token::Close => return Ok(words),
                Token::Symbol(word) => words.push(word),
                Token::Number(n) => words.push(n.to_string()),
                other => return Err(unexpected("greeting word", other)),
            }
        }
    }

    /// Parse `(/TAG TAG ...)` after `DLIST`. The slash may stand alone.
    fn parse_tags(&mut self) -> ScriptResult<Vec<String>> {
        self.expect_open()?;
        let mut tags = Vec::new();
        loop {
            match self.tokens.next() {
                Token::Close => return Ok(tags),
                Token::Symbol(symbol) => {
                    let tag = symbol.trim_start_matches('/');
                    if !tag.is_empty() {
                        tags.push(tag.to_uppercase());
                    }
                }
                other => return Err(unexpected("tag name", other)),
            }
        }
    }

    /// Parse `KEY)` after the `=` of a reference.
    fn parse_reference_target(&mut self) -> ScriptResult<String> {
        let keyword = self.expect_symbol("keyword after `=`")?;
        self.expect_close()?;
        Ok(keyword.to_uppercase())
    }

    // --- Patterns and templates ---

    /// Parse a class such as `(* WANT NEED)` after its opening parenthesis,
    /// keeping it in written form.
    fn parse_class(&mut self) -> ScriptResult<Element> {
        let mut parts = Vec::new();
        loop {
            match self.tokens.next() {
                Token::Close => return Ok(Element::Class(format!("({})", parts.join(" ")))),
                Token::Symbol(symbol) => parts.push(symbol),
                Token::Number(n) => parts.push(n.to_string()),
                other => return Err(unexpected("class member", other)),
            }
        }
    }

    /// Parse decomposition elements up to `)`, or up to `=` in a memory
    /// transformation.
    fn parse_pattern(&mut self, until_equals: bool) -> ScriptResult<Vec<Element>> {
        let mut elements = Vec::new();
        loop {
            match self.tokens.next() {
                Token::Close if !until_equals => return Ok(elements),
                Token::Symbol(symbol) if until_equals && symbol == "=" => return Ok(elements),
                Token::Symbol(word) => elements.push(Element::Word(word)),
                Token::Number(n) => elements.push(Element::Count(n)),
                Token::Open => elements.push(self.parse_class()?),
                other if until_equals => return Err(unexpected("`=`", other)),
                other => return Err(unexpected("decomposition element", other)),
            }
        }
    }

    /// Parse template tokens up to `)`.
    fn parse_template(&mut self) -> ScriptResult<Vec<TemplateToken>> {
        let mut template = Vec::new();
        loop {
            match self.tokens.next() {
                Token::Close => return Ok(template),
                Token::Symbol(word) => template.push(TemplateToken::Word(word)),
                Token::Number(n) => template.push(TemplateToken::Slot(n)),
                other => return Err(unexpected("reassembly word", other)),
            }
        }
    }

    /// Parse one reassembly after its opening parenthesis.
    fn parse_reassembly(&mut self) -> ScriptResult<Reassembly> {
        if self.tokens.peek().is_symbol("PRE") {
            self.tokens.next();
            self.expect_open()?;
            let template = self.parse_template()?;
            self.expect_open()?;
            let equals = self.expect_symbol("`=`")?;
            if equals != "=" {
                return Err(unexpected("`=`", Token::Symbol(equals)));
            }
            let keyword = self.parse_reference_target()?;
            self.expect_close()?;
            return Ok(Reassembly::Pre { template, keyword });
        }

        if self.tokens.peek().is_symbol("=") {
            self.tokens.next();
            return Ok(Reassembly::Reference(self.parse_reference_target()?));
        }

        let template = self.parse_template()?;
        if matches!(template.as_slice(), [TemplateToken::Word(word)] if word == "NEWKEY") {
            Ok(Reassembly::NewKey)
        } else {
            Ok(Reassembly::Pattern(template))
        }
    }

    /// Parse a transform after its opening parenthesis.
    fn parse_transform(&mut self) -> ScriptResult<Transform> {
        self.expect_open()?;
        let decomposition = self.parse_pattern(false)?;
        let mut reassemblies = Vec::new();
        loop {
            match self.tokens.next() {
                Token::Close => return Ok(Transform::new(decomposition, reassemblies)),
                Token::Open => reassemblies.push(self.parse_reassembly()?),
                other => return Err(unexpected("reassembly", other)),
            }
        }
    }

    // --- Rules ---

    fn parse_rule(&mut self, raw_keyword: String) -> ScriptResult<KeywordRule> {
        let mut rule = KeywordRule::new(raw_keyword);
        loop {
            match self.tokens.next() {
                Token::Close => return Ok(rule),
                Token::Number(precedence) => rule.precedence = precedence,
                Token::Symbol(symbol) if symbol == "=" => {
                    let substitute = self.expect_symbol("substitute after `=`")?;
                    rule.substitute = Some(substitute.to_uppercase());
                }
                Token::Symbol(symbol) if symbol == "DLIST" => rule.tags = self.parse_tags()?,
                Token::Open => {
                    if *self.tokens.peek() == Token::Open {
                        rule.transforms.push(self.parse_transform()?);
                    } else if self.tokens.peek().is_symbol("=") {
                        self.tokens.next();
                        rule.link = Some(self.parse_reference_target()?);
                    } else {
                        let found = self.tokens.next();
                        return Err(unexpected("transformation or link", found));
                    }
                }
                other => return Err(unexpected("rule body", other)),
            }
        }
    }

    fn parse_memory(&mut self) -> ScriptResult<MemoryRule> {
        let keyword = self.expect_symbol("MEMORY keyword")?.to_uppercase();
        let mut transformations = Vec::new();
        loop {
            match self.tokens.next() {
                Token::Close => break,
                Token::Open => {
                    let decomposition = self.parse_pattern(true)?;
                    let reassembly = self.parse_template()?;
                    transformations.push(MemoryTransformation {
                        decomposition,
                        reassembly,
                    });
                }
                other => return Err(unexpected("memory transformation", other)),
            }
        }

        let found = transformations.len();
        let transformations = transformations
            .try_into()
            .map_err(|_| MalformedScript::MemoryArity { found })?;
        Ok(MemoryRule {
            keyword,
            transformations,
        })
    }

    // --- Script ---

    fn parse_script(&mut self) -> ScriptResult<ScriptData> {
        let greeting = self.parse_greeting()?;
        if self.tokens.peek().is_symbol("START") {
            self.tokens.next();
        }

        let mut rules = Vec::new();
        let mut seen = HashSet::new();
        let mut catch_all = None;
        let mut memory = None;

        loop {
            match self.tokens.next() {
                Token::End => break,
                Token::Open => {}
                Token::Close => return Err(MalformedScript::UnbalancedParentheses),
                other => return Err(unexpected("rule", other)),
            }

            match self.tokens.next() {
                // The empty list that closes a script.
                Token::Close => {}
                Token::Symbol(symbol) if symbol == "MEMORY" => {
                    if memory.is_some() {
                        return Err(MalformedScript::DuplicateMemory);
                    }
                    memory = Some(self.parse_memory()?);
                }
                Token::Symbol(raw_keyword) => {
                    let rule = self.parse_rule(raw_keyword)?;
                    let keyword = rule.keyword.to_string();
                    let duplicate = match rule.keyword {
                        Keyword::CatchAll => catch_all.is_some(),
                        Keyword::Word(_) => !seen.insert(keyword.clone()),
                    };
                    if duplicate {
                        return Err(MalformedScript::DuplicateKeyword { keyword });
                    }
                    if rule.keyword == Keyword::CatchAll {
                        catch_all = Some(rule);
                    } else {
                        rules.push(rule);
                    }
                }
                other => return Err(unexpected("keyword", other)),
            }
        }

        let script = ScriptData {
            greeting,
            rules,
            catch_all: catch_all.ok_or(MalformedScript::MissingCatchAll)?,
            memory: memory.ok_or(MalformedScript::MissingMemory)?,
        };
        check_references(&script)?;

        debug!(rules = script.rules.len(), "parsed script");
        Ok(script)
    }
}

/// Ensure every redirect names a rule that can respond.
fn check_references(script: &ScriptData) -> ScriptResult<()> {
    for rule in script.rules.iter().chain(iter::once(&script.catch_all)) {
        for target in rule.references() {
            if !script.rule(target).is_some_and(KeywordRule::is_applicable) {
                return Err(MalformedScript::DanglingReference {
                    keyword: rule.keyword.to_string(),
                    target: target.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Parse script text into a validated [`ScriptData`].
///
/// # Example
///
/// ```
/// use eliza_script::parse;
///
/// let script = parse(
///     "(HELLO)
///      (NONE ((0) (PLEASE GO ON)))
///      (MEMORY MY (0 = A) (0 = B) (0 = C) (0 = D))",
/// )
/// .unwrap();
/// assert_eq!(script.greeting(), ["HELLO"]);
/// assert!(script.rules().is_empty());
/// ```
pub fn parse(input: &str) -> ScriptResult<ScriptData> {
    Parser::new(input).parse_script()
}
