//! Parse tree for one command.
//!
//! A command is an optional `all`, a list of filter calls, an operation
//! keyword, and a list of transform calls. [`ParseResult`] holds those
//! pieces; its `Display` renders a normalised command that parses back to
//! an equal result.

use std::fmt;

use brickfilter_foundation::Func;

/// What happens to the bricks after the filter and transform pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Write the transformed bricks back in place.
    #[default]
    Replace,
    /// Hand the transformed bricks to the viewer as a copy.
    Copy,
    /// Remove the matching bricks. Normalised to `Replace` plus `delete`.
    Delete,
    /// Report counts only.
    Count,
    /// Move the matching bricks out into a separate set.
    Extract,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Replace,
        Self::Copy,
        Self::Delete,
        Self::Count,
        Self::Extract,
    ];

    /// Maps an operation keyword to its operation, case-insensitively.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "replace" | "set" => Some(Self::Replace),
            "copy" | "cp" => Some(Self::Copy),
            "delete" | "remove" => Some(Self::Delete),
            "count" => Some(Self::Count),
            "extract" | "separate" | "split" => Some(Self::Extract),
            _ => None,
        }
    }

    /// Returns the canonical keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Copy => "copy",
            Self::Delete => "delete",
            Self::Count => "count",
            Self::Extract => "extract",
        }
    }

    /// Returns true for operations that change the world when committed.
    #[must_use]
    pub const fn is_destructive(self) -> bool {
        matches!(self, Self::Replace | Self::Delete | Self::Extract)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A parsed command.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParseResult {
    /// Operate over the whole world rather than the viewer's selection.
    pub apply_to_everything: bool,
    /// The operation.
    pub operation: Operation,
    /// Filter calls, in source order.
    pub filters: Vec<Func>,
    /// Transform calls, in source order.
    pub transforms: Vec<Func>,
}

impl ParseResult {
    /// Rewrites `Delete` as `Replace` with a single `delete` transform.
    ///
    /// Other operations are returned unchanged.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.operation != Operation::Delete {
            return self;
        }
        Self {
            operation: Operation::Replace,
            transforms: vec![Func::bare("delete")],
            ..self
        }
    }
}

impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if self.apply_to_everything {
            parts.push("all".to_string());
        }
        parts.extend(self.filters.iter().map(ToString::to_string));
        parts.push(self.operation.keyword().to_string());
        parts.extend(self.transforms.iter().map(ToString::to_string));
        f.write_str(&parts.join(" "))
    }
}
