use super::Expr;

/// `CASE WHEN <when> THEN <then> ... [ELSE <otherwise>] END`
///
/// Branches are evaluated in order; the first matching one wins.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprCase {
    pub branches: Vec<CaseWhen>,
    pub otherwise: Option<Box<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseWhen {
    pub when: Expr,
    pub then: Expr,
}

impl From<ExprCase> for Expr {
    fn from(value: ExprCase) -> Self {
        Expr::Case(value)
    }
}
