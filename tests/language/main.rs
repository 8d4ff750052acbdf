//! Integration tests for Layer 2: Language
//!
//! Tests for the scanner, the command parser, and normalization.

mod lexer;
