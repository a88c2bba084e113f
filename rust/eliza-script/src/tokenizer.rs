//! Tokenizer for ELIZA script text.
//!
//! Scripts are written as nested parenthesized lists of symbols and
//! numbers, in the style of the original MAD-SLIP scripts:
//!
//! ```text
//! (SORRY ((0) (PLEASE DON'T APOLOGIZE) (APOLOGIES ARE NOT NECESSARY)))
//! ```
//!
//! Token types:
//! - **Open** / **Close**: `(` and `)`
//! - **Symbol**: any maximal run of non-delimiter characters, plus the
//!   single-character symbols `=`, `,` and `.`
//! - **Number**: a run of decimal digits
//! - **End**: end of input, returned forever once reached
//!
//! Whitespace is skipped, and `;` starts a comment that runs to the end
//! of the line.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// A classified token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `(`
    Open,
    /// `)`
    Close,
    /// A word or punctuation symbol, e.g. `MOTHER`, `DON'T`, `*SAD`, `=`.
    Symbol(String),
    /// An unsigned decimal integer.
    Number(usize),
    /// The end of the script.
    End,
}

impl Token {
    /// Returns `true` if this token is the symbol `name`.
    pub fn is_symbol(&self, name: &str) -> bool {
        matches!(self, Token::Symbol(s) if s == name)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
            Token::Symbol(s) => write!(f, "{s}"),
            Token::Number(n) => write!(f, "{n}"),
            Token::End => write!(f, "end of script"),
        }
    }
}

fn is_single_symbol(ch: char) -> bool {
    matches!(ch, '=' | ',' | '.')
}

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '(' | ')' | ';') || is_single_symbol(ch)
}

/// A pull tokenizer with single-token lookahead.
pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    peeked: Option<Token>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            peeked: None,
        }
    }

    /// Return the next token without consuming it.
    pub fn peek(&mut self) -> &Token {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.read(),
        };
        self.peeked.insert(token)
    }

    /// Consume and return the next token.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Token {
        match self.peeked.take() {
            Some(token) => token,
            None => self.read(),
        }
    }

    fn skip_blank(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.chars.next();
            } else if ch == ';' {
                while let Some(c) = self.chars.next() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn read(&mut self) -> Token {
        self.skip_blank();

        let Some(ch) = self.chars.next() else {
            return Token::End;
        };

        match ch {
            '(' => Token::Open,
            ')' => Token::Close,
            c if is_single_symbol(c) => Token::Symbol(c.to_string()),
            c if c.is_ascii_digit() => {
                let mut digits = String::from(c);
                while let Some(&d) = self.chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    digits.push(d);
                    self.chars.next();
                }
                // Digit runs too long for a usize degrade to plain symbols.
                match digits.parse() {
                    Ok(n) => Token::Number(n),
                    Err(_) => Token::Symbol(digits),
                }
            }
            c => {
                let mut symbol = String::from(c);
                while let Some(&d) = self.chars.peek() {
                    if is_delimiter(d) {
                        break;
                    }
                    symbol.push(d);
                    self.chars.next();
                }
                Token::Symbol(symbol)
            }
        }
    }
}

/// Tokenize a whole script into a vector, without the trailing [`Token::End`].
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(input);
    let mut tokens = Vec::new();
    loop {
        match tokenizer.next() {
            Token::End => break,
            token => tokens.push(token),
        }
    }
    tokens
}
