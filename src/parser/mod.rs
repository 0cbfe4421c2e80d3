//! Parser module for building a syntax tree from tokens.
//!
//! Grammars are declared as immutable productions through a fluent builder and
//! kept in a registry. The rule engine evaluates them top-down with ordered
//! choice, and the driver runs the root productions over a whole token stream.
//!
//! - `production`: element descriptions and the typed builder
//! - `registry`: productions grouped by rule tag
//! - `engine`: evaluation of productions against tokens
//! - `precedence`: generator for left-to-right binary operator levels
//! - `grammar`: the grammar of the language
//! - `parser`: the driver producing the final tree

pub mod engine;
pub mod grammar;
pub mod parser;
pub mod precedence;
pub mod production;
pub mod registry;
pub mod rules;
