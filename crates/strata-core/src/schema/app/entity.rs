use super::{MappingStrategy, Navigation, Property, PropertyId};
use crate::schema::Name;

use std::fmt;

/// One node of a type hierarchy.
///
/// A node references its parent only. Children are found by scanning the
/// schema, which keeps ownership a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityType {
    /// Uniquely identifies the entity type
    pub id: EntityId,

    /// Name of the entity type
    pub name: Name,

    pub parent: Option<EntityId>,

    /// Abstract types have no rows of their own
    pub is_abstract: bool,

    /// Properties declared on this node. Inherited properties live on the
    /// ancestors.
    pub properties: Vec<Property>,

    pub navigations: Vec<Navigation>,

    /// Explicit table name. When `None`, the name is synthesized from the
    /// type name.
    pub table_name: Option<String>,

    /// Only meaningful on the hierarchy root. A non-root node may restate the
    /// inherited strategy but may not change it.
    pub strategy: Option<MappingStrategy>,

    /// Explicit discriminator value for this type
    pub discriminator_value: Option<String>,

    /// Discriminator settings, declared on the root
    pub discriminator: Option<DiscriminatorConfig>,

    /// SQL defining a keyless type. Keyless types map to no table.
    pub defining_query: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscriminatorConfig {
    /// Name of the discriminator column
    pub column: String,

    /// When false, types without an explicit discriminator value are left
    /// unmapped.
    pub complete: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

impl EntityType {
    pub fn new(id: EntityId, name: &str) -> EntityType {
        EntityType {
            id,
            name: Name::new(name),
            parent: None,
            is_abstract: false,
            properties: vec![],
            navigations: vec![],
            table_name: None,
            strategy: None,
            discriminator_value: None,
            discriminator: None,
            defining_query: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_keyless(&self) -> bool {
        self.defining_query.is_some()
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name == name)
    }

    pub fn navigation(&self, name: &str) -> Option<&Navigation> {
        self.navigations
            .iter()
            .find(|navigation| navigation.name == name)
    }

    pub fn primary_key(&self) -> impl Iterator<Item = PropertyId> + '_ {
        self.properties
            .iter()
            .filter(|property| property.primary_key)
            .map(|property| property.id)
    }
}

impl DiscriminatorConfig {
    pub const DEFAULT_COLUMN: &'static str = "Discriminator";
}

impl Default for DiscriminatorConfig {
    fn default() -> Self {
        DiscriminatorConfig {
            column: Self::DEFAULT_COLUMN.to_string(),
            complete: true,
        }
    }
}

impl EntityId {
    pub fn property(self, index: usize) -> PropertyId {
        PropertyId {
            entity: self,
            index,
        }
    }
}

impl From<&EntityType> for EntityId {
    fn from(value: &EntityType) -> Self {
        value.id
    }
}

impl From<&EntityId> for EntityId {
    fn from(value: &EntityId) -> Self {
        *value
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "EntityId({})", self.0)
    }
}
