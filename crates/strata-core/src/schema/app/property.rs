use super::EntityId;
use crate::stmt;

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Uniquely identifies the property within the schema
    pub id: PropertyId,

    /// Property name, also used as the column name
    pub name: String,

    pub ty: stmt::Type,

    pub nullable: bool,

    /// True if the property is part of the entity's primary key. Only the
    /// hierarchy root declares key properties.
    pub primary_key: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId {
    pub entity: EntityId,
    pub index: usize,
}

impl Property {
    pub fn new(id: PropertyId, name: impl Into<String>, ty: stmt::Type) -> Property {
        Property {
            id,
            name: name.into(),
            ty,
            nullable: false,
            primary_key: false,
        }
    }
}

impl From<&Property> for PropertyId {
    fn from(value: &Property) -> Self {
        value.id
    }
}

impl fmt::Debug for PropertyId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "PropertyId({}/{})", self.entity.0, self.index)
    }
}
