use super::Expr;

/// A reference to a column through a table alias, `"alias"."column"`.
///
/// `table` is `None` when the column is referenced by its output name alone,
/// as in the `ORDER BY` of a set operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExprColumn {
    pub table: Option<String>,
    pub column: String,
}

impl Expr {
    pub fn column(table: impl Into<String>, column: impl Into<String>) -> Expr {
        Expr::Column(ExprColumn {
            table: Some(table.into()),
            column: column.into(),
        })
    }

    pub fn output_column(column: impl Into<String>) -> Expr {
        Expr::Column(ExprColumn {
            table: None,
            column: column.into(),
        })
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Expr::Column(value)
    }
}
