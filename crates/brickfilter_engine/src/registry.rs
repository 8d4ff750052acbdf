//! Function registry.
//!
//! Maps lower-cased names to filter and transform factories. The builtin
//! catalog is one static table of aliases; [`Registry::builtin`] turns it
//! into a lookup map. Hosts build a registry once and pass it by
//! reference into every run.

use std::collections::HashMap;

use brickfilter_foundation::Value;

use crate::axis::EvalResult;
use crate::context::RunContext;
use crate::functions::fields::{
    ColorField, CollisionField, HiddenField, IntensityField, MaterialField, OwnerField,
    VisibleField, asset_filter, field_filter, field_transform, intensity_filter,
};
use crate::functions::logic::{and_filter, not_filter, or_filter};
use crate::functions::misc::{chance_filter, delete_transform};
use crate::functions::spatial::{
    center_filter, position_filter, resize_to_transform, resize_transform, size_filter,
    translate_transform,
};
use crate::functions::{Filter, Transform};

/// Builds a filter from compile context and arguments.
pub type FilterFactory = fn(&mut RunContext<'_>, &[Value]) -> EvalResult<Filter>;

/// Builds a transform from compile context and arguments.
pub type TransformFactory = fn(&mut RunContext<'_>, &[Value]) -> EvalResult<Transform>;

/// The implementations registered under one name.
#[derive(Clone, Copy, Default)]
pub struct FunctionEntry {
    /// Filter form, if the function can select bricks.
    pub filter: Option<FilterFactory>,
    /// Transform form, if the function can change bricks.
    pub transform: Option<TransformFactory>,
}

impl FunctionEntry {
    /// An entry with only a filter form.
    #[must_use]
    pub const fn filter(filter: FilterFactory) -> Self {
        Self {
            filter: Some(filter),
            transform: None,
        }
    }

    /// An entry with only a transform form.
    #[must_use]
    pub const fn transform(transform: TransformFactory) -> Self {
        Self {
            filter: None,
            transform: Some(transform),
        }
    }

    /// An entry with both forms.
    #[must_use]
    pub const fn both(filter: FilterFactory, transform: TransformFactory) -> Self {
        Self {
            filter: Some(filter),
            transform: Some(transform),
        }
    }
}

impl std::fmt::Debug for FunctionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionEntry")
            .field("filter", &self.filter.is_some())
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// Builtin functions: aliases, then implementations.
const BUILTINS: &[(&[&str], FunctionEntry)] = &[
    (
        &["visible", "visibility", "vis"],
        FunctionEntry::both(field_filter::<VisibleField>, field_transform::<VisibleField>),
    ),
    (
        &["hidden", "invisible"],
        FunctionEntry::both(field_filter::<HiddenField>, field_transform::<HiddenField>),
    ),
    (
        &["color", "colour", "paint"],
        FunctionEntry::both(field_filter::<ColorField>, field_transform::<ColorField>),
    ),
    (
        &["material", "mat"],
        FunctionEntry::both(field_filter::<MaterialField>, field_transform::<MaterialField>),
    ),
    (
        &["materialintensity", "intensity"],
        FunctionEntry::both(intensity_filter, field_transform::<IntensityField>),
    ),
    (
        &["collision", "collide"],
        FunctionEntry::both(field_filter::<CollisionField>, field_transform::<CollisionField>),
    ),
    (
        &["owner"],
        FunctionEntry::both(field_filter::<OwnerField>, field_transform::<OwnerField>),
    ),
    (&["asset", "type"], FunctionEntry::filter(asset_filter)),
    (&["position", "pos"], FunctionEntry::filter(position_filter)),
    (&["size"], FunctionEntry::filter(size_filter)),
    (
        &["centerposition", "centerpos", "cpos"],
        FunctionEntry::filter(center_filter),
    ),
    (&["chance", "random"], FunctionEntry::filter(chance_filter)),
    (&["not"], FunctionEntry::filter(not_filter)),
    (&["or", "any"], FunctionEntry::filter(or_filter)),
    (&["and", "every"], FunctionEntry::filter(and_filter)),
    (
        &["translate", "move", "shift"],
        FunctionEntry::transform(translate_transform),
    ),
    (&["resize", "grow"], FunctionEntry::transform(resize_transform)),
    (
        &["resizeto", "setsize"],
        FunctionEntry::transform(resize_to_transform),
    ),
    (&["delete", "kill"], FunctionEntry::transform(delete_transform)),
];

/// A name-to-function map.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: HashMap<String, FunctionEntry>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every builtin function.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (names, entry) in BUILTINS {
            registry.register(names, *entry);
        }
        registry
    }

    /// Registers `entry` under each name, replacing earlier entries.
    pub fn register(&mut self, names: &[&str], entry: FunctionEntry) {
        for name in names {
            self.entries.insert(name.to_lowercase(), entry);
        }
    }

    /// Looks up a function, case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FunctionEntry> {
        self.entries.get(&name.to_lowercase())
    }

    /// Returns true if a filter is registered under `name`.
    #[must_use]
    pub fn has_filter(&self, name: &str) -> bool {
        self.get(name).is_some_and(|e| e.filter.is_some())
    }

    /// Returns true if a transform is registered under `name`.
    #[must_use]
    pub fn has_transform(&self, name: &str) -> bool {
        self.get(name).is_some_and(|e| e.transform.is_some())
    }

    /// Returns every registered name, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
