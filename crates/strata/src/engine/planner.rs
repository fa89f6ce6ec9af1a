//! Turns a query root type into a source relation.
//!
//! Each mapping strategy gets its own planner. The result is a [`RootPlan`]:
//! the relation to read from, the expression reading every property of the
//! hierarchy below the root, and how a row's dynamic type is recovered.

mod raw;
mod tpc;
mod tph;
mod tpt;

use super::alias::AliasTable;

use strata_core::{
    schema::{
        app::{self, EntityId, MappingStrategy, Property, PropertyId},
        db::ColumnId,
    },
    stmt::{Expr, TableWithJoins},
    Result, Schema,
};

use indexmap::IndexMap;

#[derive(Debug)]
pub(crate) struct RootPlan {
    pub(crate) source: TableWithJoins,

    /// Expression reading each property, the root type's own and inherited
    /// properties first, then those of its descendants in pre-order.
    pub(crate) columns: IndexMap<PropertyId, Expr>,

    /// Marker identifying the concrete type of each row
    pub(crate) marker: Option<Marker>,

    pub(crate) resolver: TypeResolver,

    /// Filter imposed by the mapping, such as a discriminator predicate
    pub(crate) filter: Option<Expr>,
}

#[derive(Debug, Clone)]
pub(crate) struct Marker {
    pub(crate) expr: Expr,

    /// Name the marker is projected under
    pub(crate) name: String,
}

/// Recovers the dynamic type of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeResolver {
    /// Every row has this type
    Fixed(EntityId),

    /// The marker holds a discriminator value of the hierarchy rooted at the
    /// given type
    ByMarker(EntityId),

    /// No row can be identified
    Unresolvable,
}

struct Planner<'a> {
    schema: &'a Schema,
    aliases: &'a mut AliasTable,
}

/// Plans the source relation of a query rooted at `entity`, optionally read
/// from raw SQL instead of the mapped tables.
pub(crate) fn plan_root(
    schema: &Schema,
    aliases: &mut AliasTable,
    entity: EntityId,
    from_sql: Option<&str>,
) -> Result<RootPlan> {
    let mut planner = Planner { schema, aliases };
    let entity_ty = schema.app.entity(entity);

    if let Some(defining_query) = &entity_ty.defining_query {
        return Ok(planner.plan_keyless(entity, from_sql.unwrap_or(defining_query)));
    }

    if let Some(sql) = from_sql {
        return planner.plan_raw(entity, sql);
    }

    match schema.app.strategy_of(entity) {
        MappingStrategy::Tph => planner.plan_tph(entity),
        MappingStrategy::Tpt => planner.plan_tpt(entity),
        MappingStrategy::Tpc => planner.plan_tpc(entity),
    }
}

/// Properties readable from a query rooted at `entity`: its own and
/// inherited ones, then those declared by its mapped descendants.
pub(crate) fn hierarchy_properties(schema: &app::Schema, entity: EntityId) -> Vec<&Property> {
    let mut ret = schema.all_properties(entity);

    for id in schema.descendants(entity) {
        let descendant = schema.entity(id);
        if !descendant.is_keyless() {
            ret.extend(descendant.properties.iter());
        }
    }

    ret
}

impl TypeResolver {
    /// Resolves the type of a row given its marker value.
    pub(crate) fn resolve(
        self,
        schema: &Schema,
        marker: Option<&strata_core::stmt::Value>,
    ) -> Option<EntityId> {
        match self {
            TypeResolver::Fixed(id) => Some(id),
            TypeResolver::ByMarker(root) => {
                let value = marker?.as_str()?;
                schema.mapping.discriminator(root)?.entity_for(value)
            }
            TypeResolver::Unresolvable => None,
        }
    }

    /// Chooses a resolver for rows reachable from a type with the given
    /// concrete types.
    fn for_concrete_types(root: EntityId, concrete: &[EntityId]) -> TypeResolver {
        match concrete {
            [] => TypeResolver::Unresolvable,
            [only] => TypeResolver::Fixed(*only),
            _ => TypeResolver::ByMarker(root),
        }
    }
}

impl Planner<'_> {
    /// The column storing `property` under table-per-hierarchy and
    /// table-per-type mapping.
    fn column_of(&self, property: PropertyId) -> Result<ColumnId> {
        self.schema
            .mapping_for(property.entity)
            .column(property)
            .ok_or_else(|| {
                strata_core::err!(
                    "property `{}` is not mapped to a column",
                    self.schema.app.property(property).name
                )
            })
    }

    fn column_name(&self, column: ColumnId) -> &str {
        &self.schema.db.column(column).name
    }
}
