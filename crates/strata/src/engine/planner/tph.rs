use super::{hierarchy_properties, Marker, Planner, RootPlan, TypeResolver};

use strata_core::{
    schema::{app::EntityId, mapping::DiscriminatorSpec},
    stmt::{Expr, TableFactor, TableWithJoins},
    Result,
};

impl Planner<'_> {
    /// Scans the shared table, filtered to the concrete types reachable
    /// from `entity`.
    pub(super) fn plan_tph(&mut self, entity: EntityId) -> Result<RootPlan> {
        let Some(table) = self.schema.mapping_for(entity).own_table() else {
            strata_core::bail!(
                "`{}` is not mapped to a table",
                self.schema.app.entity(entity).name
            );
        };

        let alias = self.aliases.alias_for(&self.schema.table(table).name);
        self.plan_tph_over(entity, TableFactor::Table { table, alias })
    }

    /// Plans a table-per-hierarchy root over `relation`, which exposes the
    /// columns of the shared table.
    pub(super) fn plan_tph_over(
        &mut self,
        entity: EntityId,
        relation: TableFactor,
    ) -> Result<RootPlan> {
        let schema = self.schema;
        let app = &schema.app;
        let alias = relation.alias().to_string();

        let mut columns = indexmap::IndexMap::new();
        for property in hierarchy_properties(app, entity) {
            let column = self.column_of(property.id)?;
            columns.insert(property.id, Expr::column(&alias, self.column_name(column)));
        }

        let root = app.root_of(entity);
        let reachable = app.concrete_types(entity);

        let (marker, resolver, filter) = match schema.mapping.discriminator(root) {
            Some(spec) => {
                let column = Expr::column(&alias, &spec.column);
                let all = app.concrete_types(root);
                let filter = discriminator_filter(spec, &column, &reachable, &all);

                let marker = Marker {
                    expr: column,
                    name: spec.column.clone(),
                };

                (Some(marker), TypeResolver::ByMarker(root), filter)
            }
            None => match reachable[..] {
                [only] => (None, TypeResolver::Fixed(only), None),
                _ => (None, TypeResolver::Unresolvable, Some(Expr::contradiction())),
            },
        };

        Ok(RootPlan {
            source: TableWithJoins::from(relation),
            columns,
            marker,
            resolver,
            filter,
        })
    }
}

/// The discriminator predicate restricting a scan to `reachable`.
///
/// Returns `None` when the mapping is complete and every concrete type of
/// the hierarchy is reachable: all rows qualify.
fn discriminator_filter(
    spec: &DiscriminatorSpec,
    column: &Expr,
    reachable: &[EntityId],
    all: &[EntityId],
) -> Option<Expr> {
    if spec.complete && reachable == all {
        return None;
    }

    let mut values: Vec<_> = spec
        .known_values(reachable)
        .map(|(_, value)| Expr::literal(value))
        .collect();

    Some(match values.len() {
        0 => Expr::contradiction(),
        1 => Expr::eq(column.clone(), values.remove(0)),
        _ => Expr::in_list(column.clone(), values),
    })
}
