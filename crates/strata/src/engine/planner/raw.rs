use super::{hierarchy_properties, Marker, Planner, RootPlan, TypeResolver};

use strata_core::{
    schema::app::{EntityId, MappingStrategy},
    stmt::{Expr, TableFactor, TableWithJoins},
    Error, Result,
};

impl Planner<'_> {
    /// Reads the root from user-provided SQL.
    ///
    /// Under table-per-hierarchy the SQL stands in for the shared table and
    /// any type of the hierarchy may be queried. Under the other strategies
    /// the SQL must return the flattened hierarchy, and only the hierarchy
    /// root may be queried: a derived type's rows could not be joined or
    /// unioned with its siblings.
    pub(super) fn plan_raw(&mut self, entity: EntityId, sql: &str) -> Result<RootPlan> {
        let schema = self.schema;
        let app = &schema.app;

        let alias = self.aliases.reserve("m");
        let relation = TableFactor::Raw {
            sql: sql.to_string(),
            alias: alias.clone(),
        };

        let strategy = app.strategy_of(entity);

        if strategy == MappingStrategy::Tph {
            return self.plan_tph_over(entity, relation);
        }

        if !app.entity(entity).is_root() {
            log::debug!(
                "rejecting raw SQL for `{}`; strategy={strategy}",
                app.entity(entity).name
            );

            return Err(Error::unsupported_operation(
                "raw SQL queries are only legal at the hierarchy root",
            ));
        }

        let columns = hierarchy_properties(app, entity)
            .into_iter()
            .map(|property| (property.id, Expr::column(&alias, &property.name)))
            .collect();

        let concrete = app.concrete_types(entity);
        let resolver = TypeResolver::for_concrete_types(entity, &concrete);

        let marker = match (resolver, schema.mapping.discriminator(entity)) {
            (TypeResolver::ByMarker(_), Some(spec)) => Some(Marker {
                expr: Expr::column(&alias, &spec.column),
                name: spec.column.clone(),
            }),
            _ => None,
        };

        Ok(RootPlan {
            source: TableWithJoins::from(relation),
            columns,
            marker,
            resolver,
            filter: None,
        })
    }

    /// Keyless types read their defining query and have no identifier.
    pub(super) fn plan_keyless(&mut self, entity: EntityId, sql: &str) -> RootPlan {
        let app = &self.schema.app;
        let alias = self.aliases.reserve("m");

        let columns = app
            .all_properties(entity)
            .into_iter()
            .map(|property| (property.id, Expr::column(&alias, &property.name)))
            .collect();

        RootPlan {
            source: TableWithJoins::from(TableFactor::Raw {
                sql: sql.to_string(),
                alias,
            }),
            columns,
            marker: None,
            resolver: TypeResolver::Fixed(entity),
            filter: None,
        }
    }
}
