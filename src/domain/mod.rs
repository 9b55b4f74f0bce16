// Domain layer: entity types and the Entity contract the stores are built on.

pub mod link;
pub mod offering;
pub mod person;

pub use link::LinkRecord;
pub use offering::{Offering, OfferingPatch, OfferingQuery};
pub use person::{Person, PersonPatch, PersonQuery};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Contract every store-managed entity fulfils: a natural key, field-level
/// validation, a partial-update overlay, and search criteria.
///
/// `validate` returns human-readable messages rather than failing, so callers
/// decide whether a non-empty result is fatal.
pub trait Entity: Clone + Serialize + DeserializeOwned + std::fmt::Display {
    type Patch;
    type Query;

    /// Display noun used in error messages ("person", "offering").
    fn kind() -> &'static str;

    /// The natural key this entity is looked up by.
    fn key(&self) -> &str;

    fn validate(&self) -> Vec<String>;

    /// Overlays the provided fields; unset patch fields keep current values.
    /// The natural key is not patchable.
    fn apply(&mut self, patch: Self::Patch);

    /// ANDed, case-insensitive substring criteria (exact where noted on the
    /// query type).
    fn matches(&self, query: &Self::Query) -> bool;
}
