use super::Query;
use crate::{
    schema::app::PropertyId,
    stmt::{FuncKind, SetOp},
};

/// An operator that changes the row set of a query, and with it which key
/// identifies each row.
#[derive(Debug, Clone, PartialEq)]
pub enum Reshape {
    /// `SELECT DISTINCT` over the projection
    Distinct,

    /// Groups rows by `keys` and computes `aggregates` per group. When
    /// `project_key` is false the keys are not returned.
    GroupBy {
        keys: Vec<PropertyId>,
        aggregates: Vec<Aggregate>,
        project_key: bool,
    },

    /// Combines the query with `other`
    SetOp { op: SetOp, other: Box<Query> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    /// Name the value is returned under
    pub name: String,

    pub kind: FuncKind,

    /// Aggregated property, `None` for `COUNT(*)`
    pub property: Option<PropertyId>,
}

impl Aggregate {
    pub fn count(name: impl Into<String>) -> Aggregate {
        Aggregate {
            name: name.into(),
            kind: FuncKind::Count,
            property: None,
        }
    }

    pub fn new(name: impl Into<String>, kind: FuncKind, property: PropertyId) -> Aggregate {
        Aggregate {
            name: name.into(),
            kind,
            property: Some(property),
        }
    }
}
