//! Error types for the interpreter.
//!
//! Two disjoint taxonomies live here:
//!
//! - Parse errors, positioned at a row and column and collected by the parser
//! - Runtime errors, carried through evaluation as first-class error values

pub mod errors;
