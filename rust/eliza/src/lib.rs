//! # eliza
//!
//! A conversation engine for ELIZA scripts, shipped with Joseph
//! Weizenbaum's 1966 DOCTOR script.
//!
//! Each line of input is normalized and scanned for keywords. Keywords are
//! stacked by precedence and their rules tried in turn: the first
//! decomposition that matches picks the next reassembly in its rotation,
//! which either builds the reply or redirects to another keyword. Inputs
//! with no usable keyword fall back to the `NONE` rule, or to a reply the
//! `MEMORY` rule banked earlier in the conversation.
//!
//! ## Example
//!
//! ```
//! let mut engine = eliza::create_engine().unwrap();
//!
//! assert_eq!(engine.greeting(), "How do you do. Please tell me your problem");
//! assert_eq!(engine.respond("My mother was kind"), "Tell me more about your family");
//! assert_eq!(engine.respond("Computers are scary"), "Do computers worry you");
//! ```
//!
//! Any other script can be parsed with [`eliza_script::parse`] and run with
//! [`Engine::new`].

pub mod config;
pub mod engine;
pub mod hash;
pub mod matcher;
pub mod memory;
pub mod reassembly;
pub mod rules;
pub mod script;
pub mod text;

pub use config::EngineConfig;
pub use engine::Engine;
pub use eliza_script::{MalformedScript, ScriptData};
pub use script::{DOCTOR_SCRIPT, create_engine, doctor};
