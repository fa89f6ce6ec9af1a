use super::{ExprSet, OrderByExpr, Select};

/// A complete query: a set expression plus ordering and row limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub body: ExprSet,

    pub order_by: Vec<OrderByExpr>,

    pub limit: Option<u64>,
}

impl Query {
    pub fn new(body: impl Into<ExprSet>) -> Query {
        Query {
            body: body.into(),
            order_by: vec![],
            limit: None,
        }
    }

    /// Returns the body as a `SELECT`, if it is one.
    pub fn as_select(&self) -> Option<&Select> {
        match &self.body {
            ExprSet::Select(select) => Some(select),
            ExprSet::SetOp(_) => None,
        }
    }

    pub fn as_select_mut(&mut self) -> Option<&mut Select> {
        match &mut self.body {
            ExprSet::Select(select) => Some(select),
            ExprSet::SetOp(_) => None,
        }
    }

    /// Number of columns the query returns.
    pub fn width(&self) -> usize {
        self.body.width()
    }
}

impl From<Select> for Query {
    fn from(value: Select) -> Self {
        Query::new(value)
    }
}
