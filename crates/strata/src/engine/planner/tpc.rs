use super::{hierarchy_properties, Marker, Planner, RootPlan, TypeResolver};

use strata_core::{
    schema::app::EntityId,
    stmt::{Expr, ExprSet, ExprSetOp, Query, Select, SelectItem, SetOp, TableFactor},
    Error, Result,
};

use indexmap::IndexMap;

impl Planner<'_> {
    /// Scans the single concrete table reachable from `entity`, or unions
    /// all of them. Each union branch projects the full property set, padding
    /// absent properties with `NULL`, and a literal marker naming the
    /// branch's type.
    pub(super) fn plan_tpc(&mut self, entity: EntityId) -> Result<RootPlan> {
        let schema = self.schema;
        let app = &schema.app;
        let properties = hierarchy_properties(app, entity);
        let concrete = app.concrete_types(entity);
        let root = app.root_of(entity);

        let scan = |planner: &mut Self, id: EntityId| -> Result<(TableFactor, Vec<Expr>)> {
            let mapping = schema.mapping_for(id);
            let Some(table) = mapping.own_table() else {
                strata_core::bail!("`{}` is not mapped to a table", app.entity(id).name);
            };

            let alias = planner.aliases.alias_for(&schema.table(table).name);
            let exprs = properties
                .iter()
                .map(|property| match mapping.column(property.id) {
                    Some(column) => Expr::column(&alias, planner.column_name(column)),
                    None => Expr::null(),
                })
                .collect();

            Ok((TableFactor::Table { table, alias }, exprs))
        };

        let (relation, columns, marker) = match concrete[..] {
            [] => {
                return Err(Error::unsupported_operation(format!(
                    "`{}` has no concrete types to query",
                    app.entity(entity).name
                )))
            }
            [only] => {
                let (relation, exprs) = scan(self, only)?;
                (relation, exprs, None)
            }
            _ => {
                let Some(spec) = schema.mapping.discriminator(root) else {
                    strata_core::bail!(
                        "hierarchy `{}` has several concrete types but no type marker",
                        app.entity(root).name
                    );
                };

                let mut operands = vec![];

                for &id in &concrete {
                    let (relation, exprs) = scan(self, id)?;

                    let mut select = Select::new(relation);
                    select.projection = properties
                        .iter()
                        .zip(exprs)
                        .map(|(property, expr)| SelectItem {
                            expr,
                            alias: property.name.clone(),
                        })
                        .collect();

                    let marker = match spec.value(id).as_known() {
                        Some(value) => Expr::literal(value),
                        None => Expr::null(),
                    };

                    select.projection.push(SelectItem {
                        expr: marker,
                        alias: spec.column.clone(),
                    });

                    operands.push(ExprSet::from(select));
                }

                let union = ExprSetOp {
                    op: SetOp::UnionAll,
                    operands,
                };

                let alias = self.aliases.reserve("u");
                let columns = properties
                    .iter()
                    .map(|property| Expr::column(&alias, &property.name))
                    .collect();

                let marker = Marker {
                    expr: Expr::column(&alias, &spec.column),
                    name: spec.column.clone(),
                };

                let relation = TableFactor::Derived {
                    query: Box::new(Query::new(union)),
                    alias,
                };

                (relation, columns, Some(marker))
            }
        };

        let columns: IndexMap<_, _> = properties
            .iter()
            .map(|property| property.id)
            .zip(columns)
            .collect();

        Ok(RootPlan {
            source: relation.into(),
            columns,
            resolver: TypeResolver::for_concrete_types(root, &concrete),
            marker,
            filter: None,
        })
    }
}
