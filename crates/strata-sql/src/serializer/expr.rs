use super::{Comma, Delimited, Ident, Params, ToSql};

use strata_core::stmt::{self, Expr};

impl ToSql for &stmt::Expr {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            Expr::And(expr) => {
                let operands = Delimited(expr.operands.iter().map(Operand::in_and), " AND ");
                fmt!(f, operands);
            }
            Expr::BinaryOp(expr) => {
                let lhs = Operand::in_binary_op(&expr.lhs);
                let rhs = Operand::in_binary_op(&expr.rhs);
                fmt!(f, lhs " " expr.op " " rhs);
            }
            Expr::Case(expr) => {
                fmt!(f, "CASE");
                for branch in &expr.branches {
                    let (when, then) = (&branch.when, &branch.then);
                    fmt!(f, " WHEN " when " THEN " then);
                }
                if let Some(otherwise) = expr.otherwise.as_deref() {
                    fmt!(f, " ELSE " otherwise);
                }
                fmt!(f, " END");
            }
            Expr::Column(expr) => {
                let table = expr.table.as_ref().map(|table| (Ident(table), "."));
                fmt!(f, table Ident(&expr.column));
            }
            Expr::Func(expr) => {
                fmt!(f, expr.kind.name() "(");
                match expr.arg.as_deref() {
                    Some(arg) => fmt!(f, arg),
                    None => fmt!(f, "*"),
                }
                fmt!(f, ")");
            }
            Expr::InList(expr) => {
                let list = Comma(&expr.list);
                fmt!(f, Operand::in_binary_op(&expr.expr) " IN (" list ")");
            }
            Expr::IsNull(expr) => {
                let operand = Operand::in_binary_op(&expr.expr);
                let op = if expr.negate { " IS NOT NULL" } else { " IS NULL" };
                fmt!(f, operand op);
            }
            Expr::Literal(value) => {
                super::value::Literal(value).to_sql(f);
            }
            Expr::Not(expr) => {
                let expr: &Expr = expr;
                fmt!(f, "NOT (" expr ")");
            }
            Expr::Or(expr) => {
                let operands = Delimited(expr.operands.iter().map(Operand::in_or), " OR ");
                fmt!(f, operands);
            }
            Expr::Value(value) => {
                value.to_sql(f);
            }
            Expr::Property(id) => panic!("property {id:?} was not lowered to a column"),
            Expr::Client(name) => panic!("client expression `{name}` reached the serializer"),
        }
    }
}

/// An operand of a compound expression, parenthesized when its own
/// connective binds looser than the enclosing one.
struct Operand<'a> {
    expr: &'a Expr,
    parens: bool,
}

impl<'a> Operand<'a> {
    fn in_and(expr: &'a Expr) -> Operand<'a> {
        Operand {
            expr,
            parens: matches!(expr, Expr::Or(_)),
        }
    }

    fn in_or(expr: &'a Expr) -> Operand<'a> {
        Operand {
            expr,
            parens: matches!(expr, Expr::And(_)),
        }
    }

    fn in_binary_op(expr: &'a Expr) -> Operand<'a> {
        Operand {
            expr,
            parens: matches!(expr, Expr::And(_) | Expr::Or(_) | Expr::BinaryOp(_)),
        }
    }
}

impl ToSql for Operand<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        if self.parens {
            fmt!(f, "(" self.expr ")");
        } else {
            fmt!(f, self.expr);
        }
    }
}

impl ToSql for stmt::BinaryOp {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(
            f,
            match self {
                stmt::BinaryOp::Eq => "=",
                stmt::BinaryOp::Ne => "<>",
                stmt::BinaryOp::Ge => ">=",
                stmt::BinaryOp::Gt => ">",
                stmt::BinaryOp::Le => "<=",
                stmt::BinaryOp::Lt => "<",
            }
        );
    }
}
