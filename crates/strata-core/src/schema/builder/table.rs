use super::BuildSchema;
use crate::schema::{
    app::{EntityType, Property},
    db::{Column, ColumnId, ForeignKey, Table, TableId},
};
use crate::{stmt, Error, Result};

impl<'a> BuildSchema<'a> {
    /// Resolves the table name of `entity`: the configured name, or the
    /// pluralized type name.
    pub(super) fn table_name_for(&self, entity: &EntityType) -> Result<String> {
        let base = match &entity.table_name {
            Some(name) => name.clone(),
            None => entity.name.plural_upper_camel_case(),
        };

        if base.trim().is_empty() {
            return Err(Error::configuration(format!(
                "cannot synthesize a table name for entity type `{}`; configure one explicitly",
                entity.name
            )));
        }

        Ok(match &self.builder.table_name_prefix {
            Some(prefix) => format!("{prefix}{base}"),
            None => base,
        })
    }

    /// Creates an empty table owned by `entity`.
    pub(super) fn create_table_for(&mut self, entity: &'a EntityType) -> Result<TableId> {
        let name = self.table_name_for(entity)?;

        if let Some((_, owner)) = self.table_lookup.get(&name) {
            return Err(Error::configuration(format!(
                "entity types `{owner}` and `{}` both map to table `{name}`",
                entity.name
            )));
        }

        let id = TableId(self.tables.len());
        self.table_lookup.insert(name.clone(), (id, &entity.name));
        self.tables.push(Table::new(id, name));
        Ok(id)
    }

    pub(super) fn add_column(
        &mut self,
        table: TableId,
        name: &str,
        ty: stmt::Type,
        nullable: bool,
        primary_key: bool,
    ) -> Result<ColumnId> {
        let table = &mut self.tables[table.0];

        if table.column_by_name(name).is_some() {
            return Err(Error::configuration(format!(
                "column `{name}` is mapped twice on table `{}`",
                table.name
            )));
        }

        let id = ColumnId {
            table: table.id,
            index: table.columns.len(),
        };

        table.columns.push(Column {
            id,
            name: name.to_string(),
            ty,
            nullable,
            primary_key,
        });

        if primary_key {
            table.primary_key.push(id);
        }

        Ok(id)
    }

    pub(super) fn add_property_column(
        &mut self,
        table: TableId,
        property: &Property,
        force_nullable: bool,
    ) -> Result<ColumnId> {
        self.add_column(
            table,
            &property.name,
            property.ty,
            property.nullable || force_nullable,
            property.primary_key,
        )
    }

    pub(super) fn add_foreign_key(&mut self, table: TableId, references: TableId) {
        let references_columns = self.tables[references.0].primary_key.clone();
        let columns = self.tables[table.0].primary_key.clone();

        self.tables[table.0].foreign_keys.push(ForeignKey {
            columns,
            references,
            references_columns,
        });
    }
}
