use crate::schema::{app::EntityId, db::ColumnId};
use indexmap::IndexMap;

/// Identifies the concrete type of each row of a hierarchy.
///
/// Table-per-hierarchy stores the value in a real column. Table-per-concrete
/// type renders it as a literal marker in each union branch.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscriminatorSpec {
    /// Column name, also the name the marker is projected under
    pub column: String,

    /// The stored column, `None` when the value is only rendered
    pub stored: Option<ColumnId>,

    /// Value of every concrete type in the hierarchy, pre-order
    pub values: IndexMap<EntityId, DiscriminatorValue>,

    /// Declared complete, and every concrete type has a known value. Only
    /// then can a query over the whole hierarchy skip the discriminator
    /// filter.
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiscriminatorValue {
    Known(String),

    /// The type has no configured value. Rows of this type cannot be
    /// identified and degrade instead of failing the query.
    Unknown,
}

impl DiscriminatorSpec {
    pub fn value(&self, id: EntityId) -> &DiscriminatorValue {
        self.values.get(&id).unwrap_or(&DiscriminatorValue::Unknown)
    }

    /// The concrete type a discriminator value identifies
    pub fn entity_for(&self, value: &str) -> Option<EntityId> {
        self.values.iter().find_map(|(id, known)| match known {
            DiscriminatorValue::Known(known) if known == value => Some(*id),
            _ => None,
        })
    }

    /// Known values of `types`, in the given order; unknown ones are skipped.
    pub fn known_values<'a>(
        &'a self,
        types: &'a [EntityId],
    ) -> impl Iterator<Item = (EntityId, &'a str)> + 'a {
        types.iter().filter_map(|id| match self.value(*id) {
            DiscriminatorValue::Known(value) => Some((*id, value.as_str())),
            DiscriminatorValue::Unknown => None,
        })
    }
}

impl DiscriminatorValue {
    pub fn as_known(&self) -> Option<&str> {
        match self {
            DiscriminatorValue::Known(value) => Some(value),
            DiscriminatorValue::Unknown => None,
        }
    }
}
