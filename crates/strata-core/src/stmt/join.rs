use super::{Expr, TableFactor};

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// The relation being joined
    pub relation: TableFactor,

    /// Join type and condition
    pub constraint: JoinOp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinOp {
    Inner(Expr),
    Left(Expr),
}

impl Join {
    pub fn inner(relation: TableFactor, on: Expr) -> Join {
        Join {
            relation,
            constraint: JoinOp::Inner(on),
        }
    }

    pub fn left(relation: TableFactor, on: Expr) -> Join {
        Join {
            relation,
            constraint: JoinOp::Left(on),
        }
    }
}
