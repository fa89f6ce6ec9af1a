use super::{
    BinaryOp, ExprAnd, ExprBinaryOp, ExprCase, ExprColumn, ExprFunc, ExprInList, ExprIsNull,
    ExprOr, Value,
};
use crate::schema::app::PropertyId;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// AND a set of binary expressions
    And(ExprAnd),

    /// Binary expression
    BinaryOp(ExprBinaryOp),

    /// `CASE WHEN ... THEN ... END`
    Case(ExprCase),

    /// A computation that only exists on the client and has no SQL
    /// translation. Planning a query containing one fails.
    Client(String),

    /// References a column of a table alias in the statement being built.
    Column(ExprColumn),

    /// Aggregate function call
    Func(ExprFunc),

    /// `expr IN (list)`
    InList(ExprInList),

    /// `expr IS [NOT] NULL`
    IsNull(ExprIsNull),

    /// A constant rendered inline in the SQL text rather than bound as a
    /// parameter. Used for discriminator values and union padding.
    Literal(Value),

    /// Negates a boolean expression
    Not(Box<Expr>),

    /// OR a set of binary expressions
    Or(ExprOr),

    /// References a property of the queried entity. Only valid before
    /// lowering.
    Property(PropertyId),

    /// A value bound as a statement parameter
    Value(Value),
}

impl Expr {
    pub fn property(id: impl Into<PropertyId>) -> Expr {
        Expr::Property(id.into())
    }

    pub fn value(value: impl Into<Value>) -> Expr {
        Expr::Value(value.into())
    }

    pub fn literal(value: impl Into<Value>) -> Expr {
        Expr::Literal(value.into())
    }

    pub fn null() -> Expr {
        Expr::Literal(Value::Null)
    }

    pub fn client(name: impl Into<String>) -> Expr {
        Expr::Client(name.into())
    }

    /// A predicate no row satisfies, rendered as `1 = 0`.
    pub fn contradiction() -> Expr {
        Expr::binary_op(Expr::literal(1), BinaryOp::Eq, Expr::literal(0))
    }

    pub fn binary_op(lhs: impl Into<Expr>, op: BinaryOp, rhs: impl Into<Expr>) -> Expr {
        ExprBinaryOp {
            lhs: Box::new(lhs.into()),
            op,
            rhs: Box::new(rhs.into()),
        }
        .into()
    }

    pub fn eq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Eq, rhs)
    }

    pub fn ne(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Ne, rhs)
    }

    pub fn gt(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Gt, rhs)
    }

    pub fn ge(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Ge, rhs)
    }

    pub fn lt(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Lt, rhs)
    }

    pub fn le(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Le, rhs)
    }

    pub fn not(expr: impl Into<Expr>) -> Expr {
        Expr::Not(Box::new(expr.into()))
    }

    pub fn is_null(expr: impl Into<Expr>) -> Expr {
        ExprIsNull {
            expr: Box::new(expr.into()),
            negate: false,
        }
        .into()
    }

    pub fn is_not_null(expr: impl Into<Expr>) -> Expr {
        ExprIsNull {
            expr: Box::new(expr.into()),
            negate: true,
        }
        .into()
    }

    pub fn in_list(expr: impl Into<Expr>, list: Vec<Expr>) -> Expr {
        ExprInList {
            expr: Box::new(expr.into()),
            list,
        }
        .into()
    }

    /// Joins `operands` with AND, flattening nested conjunctions. A single
    /// operand is returned as is.
    pub fn and_from_vec(operands: Vec<Expr>) -> Expr {
        let mut flat = vec![];
        for operand in operands {
            match operand {
                Expr::And(and) => flat.extend(and.operands),
                operand => flat.push(operand),
            }
        }

        match flat.len() {
            1 => flat.remove(0),
            _ => Expr::And(ExprAnd { operands: flat }),
        }
    }

    pub fn and(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::and_from_vec(vec![lhs.into(), rhs.into()])
    }

    /// Joins `operands` with OR. A single operand is returned as is.
    pub fn or_from_vec(mut operands: Vec<Expr>) -> Expr {
        match operands.len() {
            1 => operands.remove(0),
            _ => Expr::Or(ExprOr { operands }),
        }
    }

    pub fn or(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::or_from_vec(vec![lhs.into(), rhs.into()])
    }

    pub fn is_value_null(&self) -> bool {
        matches!(self, Expr::Value(Value::Null) | Expr::Literal(Value::Null))
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}

impl From<PropertyId> for Expr {
    fn from(value: PropertyId) -> Self {
        Expr::Property(value)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::Value(value.into())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::Value(value.into())
    }
}
