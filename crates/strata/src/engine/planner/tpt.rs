use super::{hierarchy_properties, Marker, Planner, RootPlan, TypeResolver};

use strata_core::{
    schema::{app::EntityId, db::TableId},
    stmt::{CaseWhen, Expr, ExprCase, Join, TableFactor, TableWithJoins},
    Result,
};

use indexmap::IndexMap;

impl Planner<'_> {
    /// Starts at the root table, inner joins the tables of every ancestor
    /// and of `entity` itself, then left joins the tables of all
    /// descendants. The presence of a descendant's row identifies the
    /// row's type.
    pub(super) fn plan_tpt(&mut self, entity: EntityId) -> Result<RootPlan> {
        let schema = self.schema;
        let app = &schema.app;
        let chain = &schema.mapping_for(entity).tables;

        let Some((&root_table, ancestors)) = chain.split_first() else {
            strata_core::bail!("`{}` is not mapped to a table", app.entity(entity).name);
        };

        let mut aliases = IndexMap::<TableId, String>::new();
        let root_alias = self.table_alias(&mut aliases, root_table);

        let key: Vec<String> = schema
            .table(root_table)
            .primary_key_columns()
            .map(|column| column.name.clone())
            .collect();

        let on = |alias: &str| {
            Expr::and_from_vec(
                key.iter()
                    .map(|name| {
                        Expr::eq(Expr::column(&root_alias, name), Expr::column(alias, name))
                    })
                    .collect(),
            )
        };

        let mut source = TableWithJoins::from(TableFactor::Table {
            table: root_table,
            alias: root_alias.clone(),
        });

        for &table in ancestors {
            let alias = self.table_alias(&mut aliases, table);
            let relation = TableFactor::Table {
                table,
                alias: alias.clone(),
            };
            source.joins.push(Join::inner(relation, on(&alias)));
        }

        let descendants: Vec<EntityId> = app
            .descendants(entity)
            .into_iter()
            .filter(|id| !app.entity(*id).is_keyless())
            .collect();

        for &descendant in &descendants {
            let Some(table) = schema.mapping_for(descendant).own_table() else {
                continue;
            };

            let alias = self.table_alias(&mut aliases, table);
            let relation = TableFactor::Table {
                table,
                alias: alias.clone(),
            };
            source.joins.push(Join::left(relation, on(&alias)));
        }

        let mut columns = IndexMap::new();
        for property in hierarchy_properties(app, entity) {
            let column = self.column_of(property.id)?;
            let alias = &aliases[&column.table];
            columns.insert(property.id, Expr::column(alias, self.column_name(column)));
        }

        let root = app.root_of(entity);
        let concrete = app.concrete_types(entity);
        let resolver = TypeResolver::for_concrete_types(root, &concrete);

        let marker = match resolver {
            TypeResolver::ByMarker(_) => {
                let Some(spec) = schema.mapping.discriminator(root) else {
                    strata_core::bail!(
                        "hierarchy `{}` has several concrete types but no type marker",
                        app.entity(root).name
                    );
                };

                let value = |id: EntityId| match spec.value(id).as_known() {
                    Some(value) => Expr::literal(value),
                    None => Expr::null(),
                };

                // Most derived first: a row of a deeper type also has rows in
                // the tables of its ancestors.
                let branches = descendants
                    .iter()
                    .rev()
                    .filter(|id| concrete.contains(id))
                    .map(|&id| {
                        let alias = schema
                            .mapping_for(id)
                            .own_table()
                            .and_then(|table| aliases.get(&table))
                            .cloned()
                            .unwrap_or_default();
                        CaseWhen {
                            when: Expr::is_not_null(Expr::column(alias, &key[0])),
                            then: value(id),
                        }
                    })
                    .collect();

                let otherwise = if concrete.contains(&entity) {
                    value(entity)
                } else {
                    Expr::null()
                };

                Some(Marker {
                    expr: ExprCase {
                        branches,
                        otherwise: Some(Box::new(otherwise)),
                    }
                    .into(),
                    name: spec.column.clone(),
                })
            }
            _ => None,
        };

        Ok(RootPlan {
            source,
            columns,
            marker,
            resolver,
            filter: None,
        })
    }

    fn table_alias(&mut self, aliases: &mut IndexMap<TableId, String>, table: TableId) -> String {
        let alias = self.aliases.alias_for(&self.schema.table(table).name);
        aliases.insert(table, alias.clone());
        alias
    }
}
