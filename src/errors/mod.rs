//! Error types and error handling for the front end.
//!
//! This module defines the error types used throughout the pipeline. It
//! includes:
//!
//! - Error structures with source position information
//! - The five-family taxonomy (lex, syntax, name, type, control flow)
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
