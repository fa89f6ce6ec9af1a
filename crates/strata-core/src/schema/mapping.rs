mod discriminator;
pub use discriminator::{DiscriminatorSpec, DiscriminatorValue};

mod entity;
pub use entity::{EntityMapping, Source};

use super::app::EntityId;
use indexmap::IndexMap;

/// Defines the correspondence between entity types and database tables.
///
/// The mapping is constructed while the schema is built and remains
/// immutable afterwards. The planner reads it to decide how each query root
/// becomes a relation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    /// Per-entity mappings indexed by entity identifier.
    pub entities: IndexMap<EntityId, EntityMapping>,

    /// Discriminator specs, keyed by hierarchy root.
    pub discriminators: IndexMap<EntityId, DiscriminatorSpec>,
}

impl Mapping {
    /// Returns the mapping for the specified entity.
    ///
    /// # Panics
    ///
    /// Panics if the entity ID does not exist in the mapping.
    pub fn entity(&self, id: impl Into<EntityId>) -> &EntityMapping {
        self.entities.get(&id.into()).expect("invalid entity ID")
    }

    /// Returns the discriminator spec of the hierarchy rooted at `root`.
    pub fn discriminator(&self, root: impl Into<EntityId>) -> Option<&DiscriminatorSpec> {
        self.discriminators.get(&root.into())
    }
}
