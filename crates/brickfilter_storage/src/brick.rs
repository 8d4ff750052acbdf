//! The brick record and its field types.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An 8-bit RGB triple.
pub type Rgb = [u8; 3];

/// A brick's color: either stored directly or as an index into the palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BrickColor {
    /// A direct RGB value.
    Rgb(Rgb),
    /// An index into [`Tables::palette`](crate::Tables::palette).
    Palette(usize),
}

impl Default for BrickColor {
    fn default() -> Self {
        Self::Rgb([255, 255, 255])
    }
}

/// Independent collision channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct Collision {
    /// Blocks players.
    pub player: bool,
    /// Blocks projectiles.
    pub weapon: bool,
    /// Receives interaction traces.
    pub interaction: bool,
    /// Receives tool traces.
    pub tool: bool,
}

impl Collision {
    /// Every channel set to `enabled`.
    #[must_use]
    pub const fn all(enabled: bool) -> Self {
        Self {
            player: enabled,
            weapon: enabled,
            interaction: enabled,
            tool: enabled,
        }
    }
}

impl Default for Collision {
    fn default() -> Self {
        Self::all(true)
    }
}

/// A brick owner entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Owner {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Owner {
    /// Creates an owner entry.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One brick.
///
/// Table references (`asset`, `owner`, `material`, palette colors) index
/// into the [`Tables`](crate::Tables) of the set holding the brick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Brick {
    /// Index into the asset name table.
    pub asset: usize,
    /// Half-extents along x, y, z. A 1x1 brick is `[5, 5, 6]`.
    pub size: [f64; 3],
    /// Center position.
    pub position: [f64; 3],
    /// 1-based index into the owner table; 0 is public.
    pub owner: usize,
    /// Index into the material name table.
    pub material: usize,
    /// Material intensity, 0 to 10.
    pub material_intensity: u8,
    /// Color.
    pub color: BrickColor,
    /// Whether the brick renders.
    pub visible: bool,
    /// Collision channels.
    pub collision: Collision,
}

impl Default for Brick {
    fn default() -> Self {
        Self {
            asset: 0,
            size: [5.0, 5.0, 6.0],
            position: [0.0, 0.0, 0.0],
            owner: 0,
            material: 0,
            material_intensity: 5,
            color: BrickColor::default(),
            visible: true,
            collision: Collision::default(),
        }
    }
}

impl Brick {
    /// Creates a default 1x1 brick at `position`.
    #[must_use]
    pub fn at(position: [f64; 3]) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Sets the half-extents.
    #[must_use]
    pub const fn with_size(mut self, size: [f64; 3]) -> Self {
        self.size = size;
        self
    }

    /// Sets the color.
    #[must_use]
    pub const fn with_color(mut self, color: BrickColor) -> Self {
        self.color = color;
        self
    }

    /// Sets the material index.
    #[must_use]
    pub const fn with_material(mut self, material: usize) -> Self {
        self.material = material;
        self
    }

    /// Sets the material intensity.
    #[must_use]
    pub const fn with_intensity(mut self, intensity: u8) -> Self {
        self.material_intensity = intensity;
        self
    }

    /// Sets the owner index.
    #[must_use]
    pub const fn with_owner(mut self, owner: usize) -> Self {
        self.owner = owner;
        self
    }

    /// Sets the asset index.
    #[must_use]
    pub const fn with_asset(mut self, asset: usize) -> Self {
        self.asset = asset;
        self
    }

    /// Sets visibility.
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets the collision channels.
    #[must_use]
    pub const fn with_collision(mut self, collision: Collision) -> Self {
        self.collision = collision;
        self
    }

    /// Lowest corner of this brick's extent.
    #[must_use]
    pub fn min_corner(&self) -> [f64; 3] {
        std::array::from_fn(|i| self.position[i] - self.size[i])
    }

    /// Highest corner of this brick's extent.
    #[must_use]
    pub fn max_corner(&self) -> [f64; 3] {
        std::array::from_fn(|i| self.position[i] + self.size[i])
    }
}
