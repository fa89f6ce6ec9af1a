use strata_core::{schema::app::EntityId, stmt::Value};

use indexmap::IndexMap;

/// One materialized row.
///
/// `ty` is the row's dynamic entity type. It is `None` when the query
/// projects properties or aggregates instead of whole entities, and for
/// rows whose discriminator value maps to no known type.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub ty: Option<EntityId>,

    /// Field values by property (or aggregate) name, in projection order
    pub fields: IndexMap<String, Value>,

    /// Collections loaded with the row, in the order they were requested
    pub collections: IndexMap<String, Vec<Record>>,
}

impl Record {
    pub fn new(ty: Option<EntityId>) -> Record {
        Record {
            ty,
            fields: IndexMap::new(),
            collections: IndexMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns the named collection, or an empty slice if it was not loaded.
    pub fn collection(&self, name: &str) -> &[Record] {
        self.collections
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
