use super::BuildSchema;
use crate::schema::{
    app::{EntityType, MappingStrategy},
    mapping::{EntityMapping, Source},
};
use crate::{stmt, Result};
use indexmap::IndexMap;

impl<'a> BuildSchema<'a> {
    /// Maps the whole hierarchy onto the root's table.
    ///
    /// Properties declared below the root become nullable columns since rows
    /// of sibling types leave them empty. When the hierarchy has more than
    /// one concrete type, or a discriminator is configured, a string
    /// discriminator column is added.
    pub(super) fn build_tph(&mut self, root: &'a EntityType) -> Result<()> {
        let app = self.app;
        let table = self.create_table_for(root)?;
        let members = self.hierarchy(root.id);

        let mut columns = IndexMap::new();

        for entity in &members {
            for property in &entity.properties {
                let column = self.add_property_column(table, property, !entity.is_root())?;
                columns.insert(property.id, column);
            }
        }

        let concrete = app.concrete_types(root.id);

        if concrete.len() > 1 || root.discriminator.is_some() {
            let config = root.discriminator.clone().unwrap_or_default();
            self.verify_marker_name(root, &config.column)?;

            let column = self.add_column(table, &config.column, stmt::Type::String, false, false)?;
            let spec = self.build_discriminator(root, &config, Some(column))?;
            self.mapping.discriminators.insert(root.id, spec);
        }

        for entity in members {
            let columns = app
                .all_properties(entity.id)
                .into_iter()
                .map(|property| (property.id, columns[&property.id]))
                .collect();

            self.mapping.entities.insert(
                entity.id,
                EntityMapping {
                    entity: entity.id,
                    strategy: MappingStrategy::Tph,
                    source: Source::Table,
                    tables: vec![table],
                    columns,
                },
            );
        }

        Ok(())
    }
}
