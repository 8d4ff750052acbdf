//! Brick records, lookup tables, and bounds for brickfilter.
//!
//! This crate provides:
//! - [`Brick`] - One selectable, transformable record
//! - [`Tables`] - Owner, asset, material, and palette lookup tables
//! - [`BrickSet`] - Bricks plus the tables their indices point into
//! - [`Bounds`] - Axis-aligned extents and selection regions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bounds;
pub mod brick;
pub mod set;

pub use bounds::Bounds;
pub use brick::{Brick, BrickColor, Collision, Owner, Rgb};
pub use set::{BrickSet, Tables};
