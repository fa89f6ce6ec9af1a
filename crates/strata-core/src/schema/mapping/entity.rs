use crate::schema::{
    app::{EntityId, MappingStrategy, PropertyId},
    db::{ColumnId, TableId},
};
use indexmap::IndexMap;

/// How a single entity type is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMapping {
    pub entity: EntityId,

    pub strategy: MappingStrategy,

    pub source: Source,

    /// Tables holding the entity's rows. For table-per-type this is the
    /// ancestor chain, root table first, ending with the entity's own table.
    pub tables: Vec<TableId>,

    /// The column storing each property of the entity, inherited ones
    /// included.
    pub columns: IndexMap<PropertyId, ColumnId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Rows live in `tables`
    Table,

    /// Rows are produced by a defining query. The entity is keyless.
    DefiningQuery(String),

    /// An abstract table-per-concrete-type node: no table of its own
    Unmapped,
}

impl EntityMapping {
    pub fn column(&self, property: PropertyId) -> Option<ColumnId> {
        self.columns.get(&property).copied()
    }

    /// The table that holds the entity's own row
    pub fn own_table(&self) -> Option<TableId> {
        self.tables.last().copied()
    }
}
