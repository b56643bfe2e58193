//! Lexical analysis module for the interpreter.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source text using regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Row/column tracking for diagnostics
//! - Comments and whitespace handling
//! - An optional producer thread feeding the parser over a channel

pub mod lexer;
pub mod stream;
pub mod tokens;
