pub mod app;

mod builder;
pub use builder::Builder;

pub mod config;

pub mod db;

pub mod mapping;
use mapping::Mapping;

mod name;
pub use name::Name;

mod verify;

use crate::Result;
use app::EntityId;
use db::{Table, TableId};
use std::sync::Arc;

/// The resolved model: entity types, the physical tables they map to, and
/// the mapping between the two.
///
/// A `Schema` is built once and is immutable afterwards. It is shared by
/// every query planned against it.
#[derive(Debug)]
pub struct Schema {
    /// Application-level schema
    pub app: app::Schema,

    /// Database-level schema
    pub db: Arc<db::Schema>,

    /// Maps the app-level schema to the db-level schema
    pub mapping: Mapping,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Resolves `app` with the default builder options.
    pub fn from_app(app: app::Schema) -> Result<Schema> {
        Builder::default().build(app)
    }

    pub fn mapping_for(&self, id: impl Into<EntityId>) -> &mapping::EntityMapping {
        self.mapping.entity(id)
    }

    /// Tables backing `id`, root table first for table-per-type entities.
    pub fn tables_for(&self, id: impl Into<EntityId>) -> impl Iterator<Item = &Table> + '_ {
        self.mapping
            .entity(id)
            .tables
            .iter()
            .map(|table| self.db.table(*table))
    }

    pub fn table(&self, id: TableId) -> &Table {
        self.db.table(id)
    }
}
