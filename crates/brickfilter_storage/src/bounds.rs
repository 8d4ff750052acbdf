//! Axis-aligned bounds over brick extents.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::brick::Brick;

/// An axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    /// Lowest corner.
    pub min: [f64; 3],
    /// Highest corner.
    pub max: [f64; 3],
}

impl Bounds {
    /// Creates bounds from two opposite corners in any order.
    #[must_use]
    pub fn from_corners(a: [f64; 3], b: [f64; 3]) -> Self {
        Self {
            min: std::array::from_fn(|i| a[i].min(b[i])),
            max: std::array::from_fn(|i| a[i].max(b[i])),
        }
    }

    /// Returns the smallest box containing every brick's extent.
    ///
    /// Returns `None` for an empty slice.
    #[must_use]
    pub fn of(bricks: &[Brick]) -> Option<Self> {
        let (first, rest) = bricks.split_first()?;
        let mut bounds = Self {
            min: first.min_corner(),
            max: first.max_corner(),
        };
        for brick in rest {
            bounds.include(brick);
        }
        Some(bounds)
    }

    /// Grows these bounds to cover a brick's extent.
    pub fn include(&mut self, brick: &Brick) {
        let (lo, hi) = (brick.min_corner(), brick.max_corner());
        for i in 0..3 {
            self.min[i] = self.min[i].min(lo[i]);
            self.max[i] = self.max[i].max(hi[i]);
        }
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> [f64; 3] {
        std::array::from_fn(|i| (self.min[i] + self.max[i]) / 2.0)
    }

    /// Returns true if `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: [f64; 3]) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }
}
