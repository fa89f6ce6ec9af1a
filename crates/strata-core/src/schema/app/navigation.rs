use super::{EntityId, PropertyId};

/// A relationship declared on an entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub name: String,

    /// The entity type on the other side
    pub target: EntityId,

    pub kind: NavigationKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavigationKind {
    /// One-to-many. `foreign_key` lists properties of the target referencing
    /// the declaring entity's primary key.
    Collection { foreign_key: Vec<PropertyId> },

    /// Many-to-one. `foreign_key` lists properties of the declaring entity
    /// referencing the target's primary key.
    Reference { foreign_key: Vec<PropertyId> },
}

impl Navigation {
    pub fn is_collection(&self) -> bool {
        matches!(self.kind, NavigationKind::Collection { .. })
    }

    pub fn foreign_key(&self) -> &[PropertyId] {
        match &self.kind {
            NavigationKind::Collection { foreign_key }
            | NavigationKind::Reference { foreign_key } => foreign_key,
        }
    }

    /// The entity whose key the foreign key references.
    pub fn principal(&self, declaring: EntityId) -> EntityId {
        match self.kind {
            NavigationKind::Collection { .. } => declaring,
            NavigationKind::Reference { .. } => self.target,
        }
    }
}
