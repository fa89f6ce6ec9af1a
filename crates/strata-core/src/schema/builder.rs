mod discriminator;
mod table;
mod tpc;
mod tph;
mod tpt;

use super::{app, db, Result};
use crate::schema::{
    app::{EntityId, EntityType, MappingStrategy},
    mapping::{EntityMapping, Source},
    Mapping, Name, Schema,
};
use crate::Error;
use indexmap::IndexMap;
use std::sync::Arc;

/// Resolves an application schema into tables and a mapping.
///
/// Resolution is a pure function of the builder options and the input
/// schema: building the same input twice yields equal tables and mappings.
#[derive(Debug, Clone)]
pub struct Builder {
    /// If set, prefix all table names with this string
    table_name_prefix: Option<String>,
}

/// Used to track state during the build process
struct BuildSchema<'a> {
    /// Build options
    builder: &'a Builder,

    app: &'a app::Schema,

    /// Maps table names to identifiers, with the entity type that claimed the
    /// name.
    table_lookup: IndexMap<String, (db::TableId, &'a Name)>,

    /// Tables as they are built
    tables: Vec<db::Table>,

    /// App-level to db-level schema mapping
    mapping: Mapping,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            table_name_prefix: None,
        }
    }

    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    pub fn build(&self, app: app::Schema) -> Result<Schema> {
        let mut builder = BuildSchema {
            builder: self,
            app: &app,
            table_lookup: IndexMap::new(),
            tables: vec![],
            mapping: Mapping::default(),
        };

        for root in app.roots() {
            builder.build_hierarchy(root)?;
        }

        // Keep the mapping in entity declaration order regardless of the
        // order hierarchies were resolved in.
        builder
            .mapping
            .entities
            .sort_by(|a, _, b, _| a.0.cmp(&b.0));

        let BuildSchema {
            tables, mapping, ..
        } = builder;

        let schema = Schema {
            app,
            db: Arc::new(db::Schema { tables }),
            mapping,
        };

        schema.verify()?;

        Ok(schema)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> BuildSchema<'a> {
    fn build_hierarchy(&mut self, root: &'a EntityType) -> Result<()> {
        let strategy = root.strategy.unwrap_or_default();

        // Keyless types bypass strategy resolution and become opaque
        // relations over their defining query.
        for id in self.app.self_and_descendants(root.id) {
            let entity = self.app.entity(id);
            if let Some(sql) = &entity.defining_query {
                self.mapping.entities.insert(
                    id,
                    EntityMapping {
                        entity: id,
                        strategy,
                        source: Source::DefiningQuery(sql.clone()),
                        tables: vec![],
                        columns: IndexMap::new(),
                    },
                );
            }
        }

        if root.is_keyless() {
            return Ok(());
        }

        let count = self.app.concrete_types(root.id).len();
        log::debug!(
            "resolving `{}` with {strategy}; concrete_types={count}",
            root.name
        );

        match strategy {
            MappingStrategy::Tph => self.build_tph(root),
            MappingStrategy::Tpt => self.build_tpt(root),
            MappingStrategy::Tpc => self.build_tpc(root),
        }
    }

    /// Mapped (not keyless) members of the hierarchy rooted at `root`, in
    /// pre-order.
    fn hierarchy(&self, root: EntityId) -> Vec<&'a EntityType> {
        let app = self.app;
        app.self_and_descendants(root)
            .into_iter()
            .map(|id| app.entity(id))
            .filter(|entity| !entity.is_keyless())
            .collect()
    }

    /// Rejects a hierarchy property that shadows the rendered type marker.
    fn verify_marker_name(&self, root: &EntityType, marker: &str) -> Result<()> {
        for entity in self.hierarchy(root.id) {
            if entity.property(marker).is_some() {
                return Err(Error::configuration(format!(
                    "property `{marker}` on `{}` collides with the discriminator of the `{}` \
                     hierarchy",
                    entity.name, root.name
                )));
            }
        }

        Ok(())
    }
}
