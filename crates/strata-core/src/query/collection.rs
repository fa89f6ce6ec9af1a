use super::Splitting;
use crate::{
    schema::app::{self, EntityId, PropertyId},
    stmt::{Expr, OrderByExpr},
    Error, Result,
};

/// A correlated collection read inside a query.
///
/// Child rows belong to the parent row whose `outer` properties equal the
/// child's `inner` properties, pairwise.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionAccess {
    /// Name the collection is returned under
    pub name: String,

    /// Entity type of the child rows
    pub target: EntityId,

    /// `(outer, inner)` property pairs
    pub correlation: Vec<(PropertyId, PropertyId)>,

    pub filter: Option<Expr>,

    pub order_by: Vec<OrderByExpr>,

    /// Collections loaded with each child row
    pub collections: Vec<CollectionAccess>,

    /// Pins the loading mode. When `None` the mode of the enclosing query
    /// applies.
    pub splitting: Option<Splitting>,
}

impl CollectionAccess {
    pub fn new(name: impl Into<String>, target: impl Into<EntityId>) -> CollectionAccess {
        CollectionAccess {
            name: name.into(),
            target: target.into(),
            correlation: vec![],
            filter: None,
            order_by: vec![],
            collections: vec![],
            splitting: None,
        }
    }

    /// Builds an access for the collection navigation `name` declared on
    /// `entity` or one of its ancestors.
    pub fn navigation(
        schema: &app::Schema,
        entity: impl Into<EntityId>,
        name: &str,
    ) -> Result<CollectionAccess> {
        let entity = entity.into();

        let Some((declaring, navigation)) = schema.find_navigation(entity, name) else {
            return Err(Error::translation_failure(format!(
                "`{}` has no navigation named `{name}`",
                schema.entity(entity).name
            )));
        };

        if !navigation.is_collection() {
            return Err(Error::translation_failure(format!(
                "navigation `{}.{name}` is a reference, not a collection",
                schema.entity(declaring).name
            )));
        }

        let correlation = schema
            .primary_key(declaring)
            .into_iter()
            .zip(navigation.foreign_key().iter().copied())
            .collect();

        Ok(CollectionAccess {
            correlation,
            ..CollectionAccess::new(name, navigation.target)
        })
    }

    pub fn correlate(mut self, outer: PropertyId, inner: PropertyId) -> Self {
        self.correlation.push((outer, inner));
        self
    }

    pub fn filter(mut self, expr: impl Into<Expr>) -> Self {
        let expr = expr.into();
        self.filter = Some(match self.filter.take() {
            Some(filter) => Expr::and(filter, expr),
            None => expr,
        });
        self
    }

    pub fn order_by(mut self, order_by: OrderByExpr) -> Self {
        self.order_by.push(order_by);
        self
    }

    pub fn include(mut self, collection: CollectionAccess) -> Self {
        self.collections.push(collection);
        self
    }

    pub fn splitting(mut self, splitting: Splitting) -> Self {
        self.splitting = Some(splitting);
        self
    }

    pub fn split(self) -> Self {
        self.splitting(Splitting::Split)
    }

    pub fn joined(self) -> Self {
        self.splitting(Splitting::Joined)
    }
}
