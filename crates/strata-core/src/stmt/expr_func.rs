use super::Expr;

/// An aggregate function call. `arg` is `None` only for `COUNT(*)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprFunc {
    pub kind: FuncKind,
    pub arg: Option<Box<Expr>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuncKind {
    Count,
    Sum,
    Min,
    Max,
}

impl Expr {
    pub fn count_star() -> Expr {
        Expr::Func(ExprFunc {
            kind: FuncKind::Count,
            arg: None,
        })
    }

    pub fn func(kind: FuncKind, arg: impl Into<Expr>) -> Expr {
        Expr::Func(ExprFunc {
            kind,
            arg: Some(Box::new(arg.into())),
        })
    }
}

impl FuncKind {
    pub fn name(self) -> &'static str {
        match self {
            FuncKind::Count => "COUNT",
            FuncKind::Sum => "SUM",
            FuncKind::Min => "MIN",
            FuncKind::Max => "MAX",
        }
    }
}
