//! The seam between the interpreter and whatever owns the world.
//!
//! A [`WorldHost`] supplies bricks and viewer state, gates destructive
//! commands, and persists results. The engine never touches a world
//! directly; it only calls through this trait.

use brickfilter_foundation::Result;
use brickfilter_storage::{Bounds, BrickSet, Rgb};

use crate::interpreter::Summary;

/// The player or session issuing a command.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Viewer {
    /// Display name.
    pub name: String,
}

impl Viewer {
    /// Creates a viewer.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Which part of the world a command covers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scope {
    /// The whole world.
    World,
    /// The viewer's selection.
    Region(Bounds),
}

/// Bricks handed to the engine for one command.
#[derive(Clone, Debug, PartialEq)]
pub struct Acquired {
    /// A working copy of the bricks in scope.
    pub records: BrickSet,
    /// The scope the bricks were taken from.
    pub scope: Scope,
    /// Bounds to use for center-relative filters, if the host knows them.
    pub bounds: Option<Bounds>,
}

/// Collaborators the engine needs to run a command.
pub trait WorldHost {
    /// Returns a working copy of the bricks a command applies to: the
    /// whole world when `everything` is set, else the viewer's selection.
    ///
    /// # Errors
    /// Returns `NoRecordsSelected` when there is nothing to work on, or
    /// `UnsupportedFormat` when the stored bricks cannot be read.
    fn acquire_records(&mut self, everything: bool, viewer: &Viewer) -> Result<Acquired>;

    /// Returns the viewer's yaw in degrees.
    fn viewer_orientation(&self, viewer: &Viewer) -> f64;

    /// Returns the viewer's active paint color.
    fn viewer_paint_color(&self, viewer: &Viewer) -> Option<Rgb>;

    /// Asks the viewer to confirm a world-wide destructive command.
    /// Returns false when declined or timed out.
    fn confirm(&mut self, viewer: &Viewer, prompt: &str) -> bool;

    /// Replaces the bricks in `scope` with `records`.
    ///
    /// # Errors
    /// Returns an error if the world cannot be written.
    fn commit_replace(&mut self, records: BrickSet, scope: Scope) -> Result<()>;

    /// Hands copied bricks to the viewer.
    ///
    /// # Errors
    /// Returns an error if the copy cannot be stored.
    fn commit_copy(&mut self, records: BrickSet, viewer: &Viewer) -> Result<()>;

    /// Hands `extracted` to the viewer and leaves `remaining` in `scope`.
    ///
    /// # Errors
    /// Returns an error if the world cannot be written.
    fn commit_extract(
        &mut self,
        extracted: BrickSet,
        remaining: BrickSet,
        scope: Scope,
        viewer: &Viewer,
    ) -> Result<()>;

    /// Shows the outcome of a command to the viewer.
    fn report(&mut self, viewer: &Viewer, summary: &Summary);

    /// Seed for the `chance` filter.
    fn rng_seed(&mut self) -> u64 {
        rand::random()
    }
}
