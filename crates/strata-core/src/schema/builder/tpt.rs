use super::BuildSchema;
use crate::schema::{
    app::{DiscriminatorConfig, EntityType, MappingStrategy},
    mapping::{EntityMapping, Source},
};
use crate::{Error, Result};
use indexmap::IndexMap;

impl<'a> BuildSchema<'a> {
    /// Gives every type of the hierarchy its own table.
    ///
    /// The root table holds the key and the root's properties. Each derived
    /// table repeats the key columns, references the root table through them,
    /// and holds the properties the type declares.
    pub(super) fn build_tpt(&mut self, root: &'a EntityType) -> Result<()> {
        let app = self.app;

        if root.discriminator.is_some() {
            return Err(Error::configuration(format!(
                "`{}` is mapped table-per-type and cannot configure a discriminator column",
                root.name
            )));
        }

        let mut own_tables = IndexMap::new();
        let mut columns = IndexMap::new();
        let members = self.hierarchy(root.id);

        for entity in &members {
            let table = self.create_table_for(entity)?;

            if !entity.is_root() {
                for property in root.properties.iter().filter(|property| property.primary_key) {
                    self.add_property_column(table, property, false)?;
                }

                self.add_foreign_key(table, own_tables[&root.id]);
            }

            for property in &entity.properties {
                let column = self.add_property_column(table, property, false)?;
                columns.insert(property.id, column);
            }

            own_tables.insert(entity.id, table);
        }

        // The rendered type marker reuses the discriminator spec so rows are
        // resolved the same way for every strategy.
        if app.concrete_types(root.id).len() > 1 {
            let config = DiscriminatorConfig::default();
            self.verify_marker_name(root, &config.column)?;

            let spec = self.build_discriminator(root, &config, None)?;
            self.mapping.discriminators.insert(root.id, spec);
        }

        for entity in members {
            let tables = app
                .ancestors(entity.id)
                .into_iter()
                .chain([entity.id])
                .map(|id| own_tables[&id])
                .collect();

            let columns = app
                .all_properties(entity.id)
                .into_iter()
                .map(|property| (property.id, columns[&property.id]))
                .collect();

            self.mapping.entities.insert(
                entity.id,
                EntityMapping {
                    entity: entity.id,
                    strategy: MappingStrategy::Tpt,
                    source: Source::Table,
                    tables,
                    columns,
                },
            );
        }

        Ok(())
    }
}
