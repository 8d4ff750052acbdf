//! Brick collections and the lookup tables their indices point into.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::brick::{Brick, BrickColor, Owner, Rgb};

/// Name and palette tables shared by the bricks of one set.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tables {
    /// Owners, referenced 1-based by [`Brick::owner`].
    pub owners: Vec<Owner>,
    /// Asset type names such as `PB_DefaultBrick`.
    pub assets: Vec<String>,
    /// Material names such as `BMC_Plastic`.
    pub materials: Vec<String>,
    /// Colors referenced by [`BrickColor::Palette`].
    pub palette: Vec<Rgb>,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            owners: Vec::new(),
            assets: vec!["PB_DefaultBrick".to_string()],
            materials: vec!["BMC_Plastic".to_string()],
            palette: Vec::new(),
        }
    }
}

impl Tables {
    /// Resolves a brick color to RGB, looking palette indices up.
    #[must_use]
    pub fn resolve_color(&self, color: BrickColor) -> Option<Rgb> {
        match color {
            BrickColor::Rgb(rgb) => Some(rgb),
            BrickColor::Palette(index) => self.palette.get(index).copied(),
        }
    }

    /// Returns the material name at `index`.
    #[must_use]
    pub fn material_name(&self, index: usize) -> Option<&str> {
        self.materials.get(index).map(String::as_str)
    }

    /// Returns the asset name at `index`.
    #[must_use]
    pub fn asset_name(&self, index: usize) -> Option<&str> {
        self.assets.get(index).map(String::as_str)
    }

    /// Returns the owner for a 1-based owner reference; 0 and dangling
    /// references are public.
    #[must_use]
    pub fn owner(&self, reference: usize) -> Option<&Owner> {
        reference.checked_sub(1).and_then(|i| self.owners.get(i))
    }

    /// Finds a material by name, case-insensitively.
    #[must_use]
    pub fn find_material(&self, name: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.eq_ignore_ascii_case(name))
    }

    /// Returns the index of a material, adding it if missing.
    pub fn intern_material(&mut self, name: &str) -> usize {
        intern(&mut self.materials, name)
    }

    /// Returns the index of an asset, adding it if missing.
    pub fn intern_asset(&mut self, name: &str) -> usize {
        intern(&mut self.assets, name)
    }

    /// Finds an owner reference by id or name, case-insensitively.
    #[must_use]
    pub fn find_owner(&self, key: &str) -> Option<usize> {
        self.owners
            .iter()
            .position(|o| o.id.eq_ignore_ascii_case(key) || o.name.eq_ignore_ascii_case(key))
            .map(|i| i + 1)
    }

    /// Returns the 1-based reference of an owner, matched by id, adding it if missing.
    pub fn intern_owner(&mut self, owner: &Owner) -> usize {
        if let Some(i) = self.owners.iter().position(|o| o.id == owner.id) {
            return i + 1;
        }
        self.owners.push(owner.clone());
        self.owners.len()
    }

    /// Returns the palette index of a color, adding it if missing.
    pub fn intern_color(&mut self, rgb: Rgb) -> usize {
        if let Some(i) = self.palette.iter().position(|c| *c == rgb) {
            return i;
        }
        self.palette.push(rgb);
        self.palette.len() - 1
    }
}

fn intern(table: &mut Vec<String>, name: &str) -> usize {
    if let Some(i) = table.iter().position(|n| n.eq_ignore_ascii_case(name)) {
        return i;
    }
    table.push(name.to_string());
    table.len() - 1
}

/// An ordered brick collection with its tables.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BrickSet {
    /// Lookup tables for the bricks' references.
    pub tables: Tables,
    /// The bricks, in save order.
    pub bricks: Vec<Brick>,
}

impl BrickSet {
    /// Creates an empty set with default tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set from tables and bricks.
    #[must_use]
    pub const fn from_parts(tables: Tables, bricks: Vec<Brick>) -> Self {
        Self { tables, bricks }
    }

    /// Creates an empty set sharing this set's tables.
    #[must_use]
    pub fn empty_like(&self) -> Self {
        Self::from_parts(self.tables.clone(), Vec::new())
    }

    /// Number of bricks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    /// Returns true if there are no bricks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// Bounds of every brick's extent.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(&self.bricks)
    }

    /// Copies out the bricks whose position lies inside `region`.
    #[must_use]
    pub fn select(&self, region: &Bounds) -> Self {
        let bricks = self
            .bricks
            .iter()
            .filter(|b| region.contains(b.position))
            .cloned()
            .collect();
        Self::from_parts(self.tables.clone(), bricks)
    }

    /// Removes the bricks whose position lies inside `region`, returning how many.
    pub fn remove_within(&mut self, region: &Bounds) -> usize {
        let before = self.bricks.len();
        self.bricks.retain(|b| !region.contains(b.position));
        before - self.bricks.len()
    }

    /// Moves every brick of `other` into this set, rewriting table
    /// references into this set's tables.
    pub fn append(&mut self, other: Self) {
        let Self { tables, bricks } = other;
        let assets: Vec<usize> = tables
            .assets
            .iter()
            .map(|a| self.tables.intern_asset(a))
            .collect();
        let materials: Vec<usize> = tables
            .materials
            .iter()
            .map(|m| self.tables.intern_material(m))
            .collect();
        let owners: Vec<usize> = tables
            .owners
            .iter()
            .map(|o| self.tables.intern_owner(o))
            .collect();

        self.bricks.reserve(bricks.len());
        for mut brick in bricks {
            brick.asset = assets.get(brick.asset).copied().unwrap_or(0);
            brick.material = materials.get(brick.material).copied().unwrap_or(0);
            brick.owner = brick
                .owner
                .checked_sub(1)
                .and_then(|i| owners.get(i).copied())
                .unwrap_or(0);
            if let BrickColor::Palette(index) = brick.color {
                brick.color = match tables.palette.get(index) {
                    Some(rgb) => BrickColor::Palette(self.tables.intern_color(*rgb)),
                    None => BrickColor::default(),
                };
            }
            self.bricks.push(brick);
        }
    }
}
