//! Model-level query input.
//!
//! A [`Query`] is the already-parsed expression tree handed to the engine:
//! a root entity type, predicates and projections over its properties, and
//! the correlated collections to load with each row.

mod collection;
pub use collection::CollectionAccess;

mod projection;
pub use projection::Projection;

mod reshape;
pub use reshape::{Aggregate, Reshape};

mod splitting;
pub use splitting::Splitting;

use crate::{
    schema::app::{EntityId, PropertyId},
    stmt::{self, Expr, OrderByExpr},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Entity type the query is rooted at
    pub root: EntityId,

    /// Raw SQL replacing the mapped source of the root type
    pub from_sql: Option<String>,

    /// Predicate over the root's properties
    pub filter: Option<Expr>,

    /// Operator applied to the filtered rows before projection
    pub reshape: Option<Reshape>,

    pub projection: Projection,

    pub order_by: Vec<OrderByExpr>,

    pub limit: Option<u64>,

    /// Collections loaded with each row
    pub collections: Vec<CollectionAccess>,

    /// Overrides the configured loading mode for this query
    pub splitting: Option<Splitting>,
}

impl Query {
    pub fn new(root: impl Into<EntityId>) -> Query {
        Query {
            root: root.into(),
            from_sql: None,
            filter: None,
            reshape: None,
            projection: Projection::Entity,
            order_by: vec![],
            limit: None,
            collections: vec![],
            splitting: None,
        }
    }

    /// Reads the root from `sql` instead of its mapped tables.
    pub fn from_sql(mut self, sql: impl Into<String>) -> Self {
        self.from_sql = Some(sql.into());
        self
    }

    /// ANDs `expr` into the filter.
    pub fn filter(mut self, expr: impl Into<Expr>) -> Self {
        let expr = expr.into();
        self.filter = Some(match self.filter.take() {
            Some(filter) => Expr::and(filter, expr),
            None => expr,
        });
        self
    }

    pub fn select(mut self, properties: impl IntoIterator<Item = PropertyId>) -> Self {
        self.projection = Projection::Properties(properties.into_iter().collect());
        self
    }

    pub fn distinct(mut self) -> Self {
        self.reshape = Some(Reshape::Distinct);
        self
    }

    pub fn group_by(
        mut self,
        keys: impl IntoIterator<Item = PropertyId>,
        aggregates: impl IntoIterator<Item = Aggregate>,
        project_key: bool,
    ) -> Self {
        self.reshape = Some(Reshape::GroupBy {
            keys: keys.into_iter().collect(),
            aggregates: aggregates.into_iter().collect(),
            project_key,
        });
        self
    }

    pub fn union_all(mut self, other: Query) -> Self {
        self.reshape = Some(Reshape::SetOp {
            op: stmt::SetOp::UnionAll,
            other: Box::new(other),
        });
        self
    }

    pub fn union(mut self, other: Query) -> Self {
        self.reshape = Some(Reshape::SetOp {
            op: stmt::SetOp::Union,
            other: Box::new(other),
        });
        self
    }

    pub fn order_by(mut self, order_by: OrderByExpr) -> Self {
        self.order_by.push(order_by);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Loads `collection` with every row.
    pub fn include(mut self, collection: CollectionAccess) -> Self {
        self.collections.push(collection);
        self
    }

    pub fn splitting(mut self, splitting: Splitting) -> Self {
        self.splitting = Some(splitting);
        self
    }

    /// Loads collections with separate commands.
    pub fn split(self) -> Self {
        self.splitting(Splitting::Split)
    }
}
