use super::BuildSchema;
use crate::schema::{
    app::{EntityType, MappingStrategy},
    mapping::{EntityMapping, Source},
};
use crate::{Error, Result};
use indexmap::IndexMap;

impl<'a> BuildSchema<'a> {
    /// Gives every concrete type a table holding all of its properties,
    /// inherited ones included. Abstract types have no table.
    pub(super) fn build_tpc(&mut self, root: &'a EntityType) -> Result<()> {
        let app = self.app;

        for entity in self.hierarchy(root.id) {
            if entity.is_abstract {
                if entity.table_name.is_some() {
                    return Err(Error::configuration(format!(
                        "abstract entity type `{}` is mapped table-per-concrete-type and \
                         cannot have a table",
                        entity.name
                    )));
                }

                self.mapping.entities.insert(
                    entity.id,
                    EntityMapping {
                        entity: entity.id,
                        strategy: MappingStrategy::Tpc,
                        source: Source::Unmapped,
                        tables: vec![],
                        columns: IndexMap::new(),
                    },
                );
                continue;
            }

            let table = self.create_table_for(entity)?;
            let mut columns = IndexMap::new();

            for property in app.all_properties(entity.id) {
                let column = self.add_property_column(table, property, false)?;
                columns.insert(property.id, column);
            }

            self.mapping.entities.insert(
                entity.id,
                EntityMapping {
                    entity: entity.id,
                    strategy: MappingStrategy::Tpc,
                    source: Source::Table,
                    tables: vec![table],
                    columns,
                },
            );
        }

        if app.concrete_types(root.id).len() > 1 || root.discriminator.is_some() {
            let config = root.discriminator.clone().unwrap_or_default();
            self.verify_marker_name(root, &config.column)?;

            let spec = self.build_discriminator(root, &config, None)?;
            self.mapping.discriminators.insert(root.id, spec);
        }

        Ok(())
    }
}
