//! Decides how every collection of a query is loaded.
//!
//! The query is first planned in joined mode: each level records the key
//! identifying its rows and the properties its rows expose. A collection can
//! only be regrouped under its parent when both sides carry a key; when a
//! reshape drops the parent key, planning fails instead of returning rows
//! under the wrong parent. When the query runs in split mode, a rewrite pass
//! then marks every collection that did not choose its own mode as split.

mod split;

mod visit;
use visit::VisitMut;

use super::planner::hierarchy_properties;

use strata_core::{
    query::{CollectionAccess, Projection, Query, Reshape, Splitting},
    schema::app::{EntityId, PropertyId},
    stmt::{Expr, OrderByExpr},
    Error, Result, Schema,
};

/// One level of the materialization tree: the root query or a collection.
#[derive(Debug, Clone)]
pub(crate) struct Level {
    /// `Parent.Collection` for collections, the entity name at the root
    pub(crate) path: String,

    pub(crate) entity: EntityId,

    pub(crate) from_sql: Option<String>,

    pub(crate) filter: Option<Expr>,

    pub(crate) reshape: Option<Reshape>,

    pub(crate) projection: Projection,

    pub(crate) order_by: Vec<OrderByExpr>,

    pub(crate) limit: Option<u64>,

    /// Properties identifying a row of this level after the reshape.
    pub(crate) identifier: Vec<PropertyId>,

    /// Properties readable from a row of this level after the reshape
    pub(crate) available: Vec<PropertyId>,

    pub(crate) children: Vec<Child>,
}

#[derive(Debug, Clone)]
pub(crate) struct Child {
    pub(crate) name: String,

    /// `(outer, inner)` property pairs
    pub(crate) correlation: Vec<(PropertyId, PropertyId)>,

    pub(crate) mode: Splitting,

    /// True when the collection chose its own mode
    pub(crate) pinned: bool,

    pub(crate) level: Level,
}

/// Builds the materialization tree of `query`.
pub(crate) fn apply(schema: &Schema, query: &Query, default: Splitting) -> Result<Level> {
    let mut root = Materialize { schema }.root(query)?;

    if query.splitting.unwrap_or(default).is_split() {
        split::apply(&mut root);
    }

    WarnCartesian.visit_level_mut(&mut root);

    Ok(root)
}

struct Materialize<'a> {
    schema: &'a Schema,
}

impl Materialize<'_> {
    fn root(&self, query: &Query) -> Result<Level> {
        let app = &self.schema.app;
        let entity = app.entity(query.root);
        let all = self.properties(query.root);

        self.verify_expr(query.root, query.filter.as_ref())?;
        for order_by in &query.order_by {
            self.verify_expr(query.root, Some(&order_by.expr))?;
        }

        if let Projection::Properties(properties) = &query.projection {
            self.verify_properties(query.root, properties)?;
        }

        let key = if entity.is_keyless() {
            vec![]
        } else {
            app.primary_key(query.root)
        };

        let (identifier, available) = match &query.reshape {
            None => (key, all),
            Some(Reshape::Distinct) => {
                let projected = match &query.projection {
                    Projection::Entity => all,
                    Projection::Properties(properties) => properties.clone(),
                };

                let keeps_key = !key.is_empty() && key.iter().all(|id| projected.contains(id));
                (if keeps_key { key } else { vec![] }, projected)
            }
            Some(Reshape::GroupBy {
                keys,
                aggregates,
                project_key,
            }) => {
                self.verify_properties(query.root, keys)?;
                let aggregated: Vec<_> = aggregates.iter().filter_map(|agg| agg.property).collect();
                self.verify_properties(query.root, &aggregated)?;

                if *project_key {
                    (keys.clone(), keys.clone())
                } else {
                    (vec![], vec![])
                }
            }
            Some(Reshape::SetOp { other, .. }) => self.set_op(query, other, key, all)?,
        };

        let mut level = Level {
            path: entity.name.to_string(),
            entity: query.root,
            from_sql: query.from_sql.clone(),
            filter: query.filter.clone(),
            reshape: query.reshape.clone(),
            projection: query.projection.clone(),
            order_by: query.order_by.clone(),
            limit: query.limit,
            identifier,
            available,
            children: vec![],
        };

        level.children = self.children(&level, &query.collections)?;
        Ok(level)
    }

    fn set_op(
        &self,
        query: &Query,
        other: &Query,
        key: Vec<PropertyId>,
        all: Vec<PropertyId>,
    ) -> Result<(Vec<PropertyId>, Vec<PropertyId>)> {
        let app = &self.schema.app;

        if other.reshape.is_some() || !other.collections.is_empty() {
            return Err(Error::translation_failure(
                "the operand of a set operation cannot be reshaped or load collections",
            ));
        }

        if !other.order_by.is_empty() || other.limit.is_some() {
            return Err(Error::translation_failure(
                "the operand of a set operation cannot be ordered or limited",
            ));
        }

        self.verify_expr(other.root, other.filter.as_ref())?;

        match (&query.projection, &other.projection) {
            (Projection::Entity, Projection::Entity) => {
                if query.root != other.root {
                    return Err(Error::translation_failure(format!(
                        "set operation combines `{}` and `{}`; both operands must project the \
                         same entity type",
                        app.entity(query.root).name,
                        app.entity(other.root).name
                    )));
                }

                Ok((key, all))
            }
            (Projection::Properties(lhs), Projection::Properties(rhs)) => {
                self.verify_properties(other.root, rhs)?;

                if lhs.len() != rhs.len() {
                    return Err(Error::translation_failure(format!(
                        "set operation operands project {} and {} columns",
                        lhs.len(),
                        rhs.len()
                    )));
                }

                Ok((vec![], lhs.clone()))
            }
            _ => Err(Error::translation_failure(
                "set operation mixes an entity projection with a property projection",
            )),
        }
    }

    fn children(&self, parent: &Level, collections: &[CollectionAccess]) -> Result<Vec<Child>> {
        collections
            .iter()
            .map(|access| self.child(parent, access))
            .collect()
    }

    fn child(&self, parent: &Level, access: &CollectionAccess) -> Result<Child> {
        let app = &self.schema.app;
        let parent_name = &app.entity(parent.entity).name;
        let target = app.entity(access.target);
        let path = format!("{parent_name}.{}", access.name);

        if parent.identifier.is_empty() {
            let detail = match &parent.reshape {
                Some(Reshape::GroupBy { .. }) => {
                    "the grouping does not project its key, so child rows cannot be matched to \
                     their group"
                        .to_string()
                }
                Some(Reshape::Distinct) => {
                    format!("the distinct projection drops the key of `{parent_name}`")
                }
                Some(Reshape::SetOp { .. }) => format!(
                    "the set operation does not preserve the key of `{parent_name}`"
                ),
                None => format!("`{parent_name}` is keyless and has no key to regroup rows by"),
            };

            return Err(Error::insufficient_key_information(path, detail));
        }

        if target.is_keyless() {
            return Err(Error::insufficient_key_information(
                path,
                format!("`{}` is keyless and its rows cannot be identified", target.name),
            ));
        }

        if access.correlation.is_empty() {
            return Err(Error::insufficient_key_information(
                path,
                "the collection is not correlated with its parent",
            ));
        }

        let child_properties = self.properties(access.target);

        for (outer, inner) in &access.correlation {
            if !parent.available.contains(outer) {
                return Err(Error::insufficient_key_information(
                    path,
                    format!(
                        "the outer query does not project `{}`",
                        app.property(*outer).name
                    ),
                ));
            }

            if !child_properties.contains(inner) {
                return Err(Error::translation_failure(format!(
                    "`{}` is not a property of `{}`",
                    app.property(*inner).name,
                    target.name
                )));
            }
        }

        self.verify_expr(access.target, access.filter.as_ref())?;
        for order_by in &access.order_by {
            self.verify_expr(access.target, Some(&order_by.expr))?;
        }

        let mut level = Level {
            path,
            entity: access.target,
            from_sql: None,
            filter: access.filter.clone(),
            reshape: None,
            projection: Projection::Entity,
            order_by: access.order_by.clone(),
            limit: None,
            identifier: app.primary_key(access.target),
            available: child_properties,
            children: vec![],
        };

        level.children = self.children(&level, &access.collections)?;

        Ok(Child {
            name: access.name.clone(),
            correlation: access.correlation.clone(),
            mode: access.splitting.unwrap_or_default(),
            pinned: access.splitting.is_some(),
            level,
        })
    }

    fn properties(&self, entity: EntityId) -> Vec<PropertyId> {
        hierarchy_properties(&self.schema.app, entity)
            .into_iter()
            .map(|property| property.id)
            .collect()
    }

    fn verify_properties(&self, entity: EntityId, properties: &[PropertyId]) -> Result<()> {
        let readable = self.properties(entity);

        for property in properties {
            if !readable.contains(property) {
                return Err(self.not_readable(entity, *property));
            }
        }

        Ok(())
    }

    /// Rejects expressions with no SQL translation.
    fn verify_expr(&self, entity: EntityId, expr: Option<&Expr>) -> Result<()> {
        let Some(expr) = expr else {
            return Ok(());
        };

        let readable = self.properties(entity);
        let mut ret = Ok(());

        walk(expr, &mut |expr| {
            if ret.is_err() {
                return;
            }

            match expr {
                Expr::Client(name) => {
                    ret = Err(Error::translation_failure(format!(
                        "client-only expression `{name}` cannot be translated to SQL"
                    )));
                }
                Expr::Property(property) if !readable.contains(property) => {
                    ret = Err(self.not_readable(entity, *property));
                }
                Expr::Column(_) => {
                    ret = Err(Error::translation_failure(
                        "column references are not valid in a model-level query",
                    ));
                }
                _ => {}
            }
        });

        ret
    }

    fn not_readable(&self, entity: EntityId, property: PropertyId) -> Error {
        let app = &self.schema.app;
        Error::translation_failure(format!(
            "`{}` is not a property of `{}`",
            app.property(property).name,
            app.entity(entity).name
        ))
    }
}

/// Calls `f` on `expr` and every nested expression.
fn walk(expr: &Expr, f: &mut impl FnMut(&Expr)) {
    f(expr);

    match expr {
        Expr::And(expr) => expr.operands.iter().for_each(|operand| walk(operand, f)),
        Expr::Or(expr) => expr.operands.iter().for_each(|operand| walk(operand, f)),
        Expr::BinaryOp(expr) => {
            walk(&expr.lhs, f);
            walk(&expr.rhs, f);
        }
        Expr::Case(expr) => {
            for branch in &expr.branches {
                walk(&branch.when, f);
                walk(&branch.then, f);
            }

            if let Some(otherwise) = &expr.otherwise {
                walk(otherwise, f);
            }
        }
        Expr::Func(expr) => {
            if let Some(arg) = &expr.arg {
                walk(arg, f);
            }
        }
        Expr::InList(expr) => {
            walk(&expr.expr, f);
            expr.list.iter().for_each(|item| walk(item, f));
        }
        Expr::IsNull(expr) => walk(&expr.expr, f),
        Expr::Not(expr) => walk(expr, f),
        Expr::Client(_)
        | Expr::Column(_)
        | Expr::Literal(_)
        | Expr::Property(_)
        | Expr::Value(_) => {}
    }
}

/// Warns when a level joins two or more collections: their rows multiply.
struct WarnCartesian;

impl VisitMut for WarnCartesian {
    fn visit_level_mut(&mut self, i: &mut Level) {
        let joined: Vec<&str> = i
            .children
            .iter()
            .filter(|child| !child.mode.is_split())
            .map(|child| child.name.as_str())
            .collect();

        if joined.len() > 1 {
            log::warn!(
                "`{}` joins {} collections ({}); their rows multiply, consider split queries",
                i.path,
                joined.len(),
                joined.join(", ")
            );
        }

        visit::visit_level_mut(self, i);
    }
}
