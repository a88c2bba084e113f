//! # eliza-script
//!
//! Tokenizer, parser and rule model for ELIZA conversation scripts, in the
//! notation Joseph Weizenbaum used for the 1966 DOCTOR script.
//!
//! ## Syntax
//!
//! A script opens with the **greeting**:
//! ```text
//! (HOW DO YOU DO. PLEASE TELL ME YOUR PROBLEM)
//! ```
//!
//! **Keyword rules** name a keyword, then any of a substitute (`= YOUR`), a
//! precedence, a tag list (`DLIST(/FAMILY)`), a link (`(=WHAT)`) and
//! transformations. Each transformation is a decomposition pattern followed
//! by reassemblies:
//! ```text
//! (MY = YOUR 2 ((0 YOUR 0 (/FAMILY) 0) (TELL ME MORE ABOUT YOUR FAMILY))
//!              ((0 YOUR 0) (YOUR 3) (WHY DO YOU SAY YOUR 3)))
//! ```
//!
//! In a decomposition, `0` matches any number of words, `n` matches exactly
//! `n` words, `(* A B)` matches one of the listed words and `(/TAG)` matches
//! any keyword carrying that tag. In a reassembly, numbers refer back to
//! the matched parts.
//!
//! Reassemblies may also redirect: `(=KEY)` continues with another keyword,
//! `(PRE (I ARE 3) (=YOU))` rewrites the input before continuing, and
//! `(NEWKEY)` moves on to the next keyword found in the input.
//!
//! The **catch-all** rule is named `NONE`, and the **memory** rule banks
//! replies for later:
//! ```text
//! (NONE ((0) (PLEASE GO ON)))
//! (MEMORY MY (0 YOUR 0 = EARLIER YOU SAID YOUR 3) (0 YOUR 0 = BUT YOUR 3)
//!            (0 YOUR 0 = LETS DISCUSS FURTHER WHY YOUR 3)
//!            (0 YOUR 0 = DOES THAT HAVE ANYTHING TO DO WITH THE FACT THAT YOUR 3))
//! ```
//!
//! ## Example
//!
//! ```
//! use eliza_script::{parse, ast::*};
//!
//! let script = parse(
//!     "(HELLO)
//!      (SORRY ((0) (PLEASE DON'T APOLOGIZE)))
//!      (NONE ((0) (PLEASE GO ON)))
//!      (MEMORY MY (0 = A) (0 = B) (0 = C) (0 = D))",
//! )
//! .unwrap();
//!
//! let sorry = script.rule("SORRY").unwrap();
//! assert_eq!(sorry.transforms[0].decomposition, vec![Element::Count(0)]);
//! assert_eq!(script.catch_all().keyword, Keyword::CatchAll);
//! ```

pub mod ast;
pub mod error;
pub mod parser;
pub mod tokenizer;

pub use ast::ScriptData;
pub use error::{MalformedScript, ScriptResult};
pub use parser::parse;
