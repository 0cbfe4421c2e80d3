//! Error types and error handling for the parser.
//!
//! This module defines the error types used throughout tokenizing and
//! parsing. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for the tokenizer, the rule engine and the driver
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
