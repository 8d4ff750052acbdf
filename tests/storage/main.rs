//! Integration tests for Layer 1: Storage
//!
//! Tests for bricks, lookup tables, brick sets, and bounds.

mod bricks;
mod sets;
