//! In-memory reference host.
//!
//! [`LocalHost`] keeps one world, one viewer's selection and orientation,
//! and a clipboard that receives copied and extracted bricks.

use std::fmt;
use std::time::{Duration, Instant};

use brickfilter_engine::{Acquired, Scope, Summary, Viewer, WorldHost};
use brickfilter_foundation::{Error, Result, boolean_word};
use brickfilter_storage::{Bounds, BrickSet, Rgb};
use tracing::{debug, warn};

use crate::config::RuntimeConfig;

/// Asks a question and returns the answer, or `None` if there was none.
pub type Prompter = Box<dyn FnMut(&str) -> Option<String>>;

/// How world-wide destructive commands are confirmed.
pub enum ConfirmPolicy {
    /// Always proceed.
    Accept,
    /// Never proceed.
    Decline,
    /// Ask, accepting only a yes that arrives within the timeout.
    ///
    /// The prompter is not interrupted. Its answer is checked once it
    /// returns, and a late one is rejected.
    Ask(Prompter),
}

impl fmt::Debug for ConfirmPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accept => f.write_str("Accept"),
            Self::Decline => f.write_str("Decline"),
            Self::Ask(_) => f.write_str("Ask"),
        }
    }
}

/// A world held in memory.
#[derive(Debug)]
pub struct LocalHost {
    world: BrickSet,
    selection: Option<Bounds>,
    yaw: f64,
    paint: Option<Rgb>,
    clipboard: BrickSet,
    seed: Option<u64>,
    confirm: ConfirmPolicy,
    confirm_timeout: Duration,
    messages: Vec<String>,
}

impl Default for LocalHost {
    fn default() -> Self {
        Self::new(&RuntimeConfig::default())
    }
}

impl LocalHost {
    /// Creates an empty world configured by `config`.
    ///
    /// Confirmations are declined unless `assume_yes` is set; use
    /// [`with_confirm`](Self::with_confirm) to ask interactively.
    #[must_use]
    pub fn new(config: &RuntimeConfig) -> Self {
        Self {
            world: BrickSet::new(),
            selection: None,
            yaw: config.yaw,
            paint: config.paint,
            clipboard: BrickSet::new(),
            seed: config.seed,
            confirm: if config.assume_yes {
                ConfirmPolicy::Accept
            } else {
                ConfirmPolicy::Decline
            },
            confirm_timeout: config.confirm_timeout,
            messages: Vec::new(),
        }
    }

    /// Sets the world.
    #[must_use]
    pub fn with_world(mut self, world: BrickSet) -> Self {
        self.world = world;
        self
    }

    /// Sets the confirmation policy.
    #[must_use]
    pub fn with_confirm(mut self, policy: ConfirmPolicy) -> Self {
        self.confirm = policy;
        self
    }

    /// Returns the world.
    #[must_use]
    pub const fn world(&self) -> &BrickSet {
        &self.world
    }

    /// Replaces the world and clears the selection.
    pub fn set_world(&mut self, world: BrickSet) {
        self.world = world;
        self.selection = None;
    }

    /// Returns the selection region.
    #[must_use]
    pub const fn selection(&self) -> Option<Bounds> {
        self.selection
    }

    /// Selects the bricks whose position lies inside `region`.
    pub fn select(&mut self, region: Bounds) {
        self.selection = Some(region);
    }

    /// Clears the selection.
    pub fn deselect(&mut self) {
        self.selection = None;
    }

    /// Returns the viewer's yaw in degrees.
    #[must_use]
    pub const fn yaw(&self) -> f64 {
        self.yaw
    }

    /// Sets the viewer's yaw in degrees.
    pub fn set_yaw(&mut self, yaw: f64) {
        self.yaw = yaw;
    }

    /// Returns the viewer's paint color.
    #[must_use]
    pub const fn paint(&self) -> Option<Rgb> {
        self.paint
    }

    /// Sets the viewer's paint color.
    pub fn set_paint(&mut self, paint: Rgb) {
        self.paint = Some(paint);
    }

    /// Returns the clipboard.
    #[must_use]
    pub const fn clipboard(&self) -> &BrickSet {
        &self.clipboard
    }

    /// Appends a copy of the clipboard to the world, returning how many
    /// bricks were added.
    pub fn paste(&mut self) -> usize {
        let count = self.clipboard.len();
        self.world.append(self.clipboard.clone());
        count
    }

    /// Takes the messages reported since the last call.
    pub fn drain_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    fn place(&mut self, records: BrickSet, scope: Scope) {
        match scope {
            Scope::World => self.world = records,
            Scope::Region(region) => {
                let removed = self.world.remove_within(&region);
                debug!(removed, added = records.len(), "replacing selection");
                self.world.append(records);
            }
        }
    }
}

impl WorldHost for LocalHost {
    fn acquire_records(&mut self, everything: bool, _viewer: &Viewer) -> Result<Acquired> {
        let acquired = if everything {
            Acquired {
                records: self.world.clone(),
                scope: Scope::World,
                bounds: None,
            }
        } else {
            let region = self.selection.ok_or(Error::NoRecordsSelected)?;
            Acquired {
                records: self.world.select(&region),
                scope: Scope::Region(region),
                bounds: Some(region),
            }
        };
        if acquired.records.is_empty() {
            return Err(Error::NoRecordsSelected);
        }
        Ok(acquired)
    }

    fn viewer_orientation(&self, _viewer: &Viewer) -> f64 {
        self.yaw
    }

    fn viewer_paint_color(&self, _viewer: &Viewer) -> Option<Rgb> {
        self.paint
    }

    fn confirm(&mut self, viewer: &Viewer, prompt: &str) -> bool {
        match &mut self.confirm {
            ConfirmPolicy::Accept => true,
            ConfirmPolicy::Decline => false,
            ConfirmPolicy::Ask(ask) => {
                let started = Instant::now();
                let answer = ask(prompt);
                if started.elapsed() > self.confirm_timeout {
                    warn!(viewer = %viewer.name, "confirmation timed out");
                    return false;
                }
                answer.is_some_and(|a| boolean_word(a.trim()) == Some(true) || a.trim() == "y")
            }
        }
    }

    fn commit_replace(&mut self, records: BrickSet, scope: Scope) -> Result<()> {
        self.place(records, scope);
        Ok(())
    }

    fn commit_copy(&mut self, records: BrickSet, _viewer: &Viewer) -> Result<()> {
        self.clipboard = records;
        Ok(())
    }

    fn commit_extract(
        &mut self,
        extracted: BrickSet,
        remaining: BrickSet,
        scope: Scope,
        _viewer: &Viewer,
    ) -> Result<()> {
        self.clipboard = extracted;
        self.place(remaining, scope);
        Ok(())
    }

    fn report(&mut self, _viewer: &Viewer, summary: &Summary) {
        let mut message = format!("{} of {} bricks matched", summary.filtered, summary.total);
        if summary.deleted > 0 {
            message.push_str(&format!(", {} deleted", summary.deleted));
        }
        if summary.extracted > 0 {
            message.push_str(&format!(", {} moved to clipboard", summary.extracted));
        }
        self.messages.push(message);
    }

    fn rng_seed(&mut self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
