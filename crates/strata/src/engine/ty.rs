use strata_core::{
    schema::app,
    stmt::{Expr, FuncKind, Type},
};

/// Infers the type of a model-level expression.
///
/// The engine needs a type for every column it asks the driver to return,
/// including the hidden ones it adds for ordering.
pub(crate) fn infer_expr_ty(schema: &app::Schema, expr: &Expr) -> Type {
    match expr {
        Expr::Property(id) => schema.property(*id).ty,
        Expr::Value(value) | Expr::Literal(value) => value.ty().unwrap_or(Type::String),
        Expr::And(_)
        | Expr::Or(_)
        | Expr::BinaryOp(_)
        | Expr::InList(_)
        | Expr::IsNull(_)
        | Expr::Not(_) => Type::Bool,
        Expr::Case(expr) => expr
            .branches
            .first()
            .map(|branch| infer_expr_ty(schema, &branch.then))
            .unwrap_or(Type::String),
        Expr::Func(func) => match (func.kind, &func.arg) {
            (FuncKind::Count, _) | (_, None) => Type::I64,
            (_, Some(arg)) => infer_expr_ty(schema, arg),
        },
        Expr::Column(_) | Expr::Client(_) => Type::String,
    }
}
