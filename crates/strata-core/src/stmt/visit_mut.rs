#![allow(unused_variables)]

use super::*;

pub trait VisitMut {
    fn visit_expr_mut(&mut self, i: &mut Expr) {
        visit_expr_mut(self, i);
    }

    fn visit_expr_column_mut(&mut self, i: &mut ExprColumn) {}

    fn visit_expr_set_mut(&mut self, i: &mut ExprSet) {
        visit_expr_set_mut(self, i);
    }

    fn visit_join_mut(&mut self, i: &mut Join) {
        visit_join_mut(self, i);
    }

    fn visit_order_by_mut(&mut self, i: &mut OrderByExpr) {
        visit_order_by_mut(self, i);
    }

    fn visit_query_mut(&mut self, i: &mut Query) {
        visit_query_mut(self, i);
    }

    fn visit_select_mut(&mut self, i: &mut Select) {
        visit_select_mut(self, i);
    }

    fn visit_table_factor_mut(&mut self, i: &mut TableFactor) {
        visit_table_factor_mut(self, i);
    }

    fn visit_table_with_joins_mut(&mut self, i: &mut TableWithJoins) {
        visit_table_with_joins_mut(self, i);
    }
}

impl<V: VisitMut> VisitMut for &mut V {
    fn visit_expr_mut(&mut self, i: &mut Expr) {
        VisitMut::visit_expr_mut(&mut **self, i);
    }

    fn visit_expr_column_mut(&mut self, i: &mut ExprColumn) {
        VisitMut::visit_expr_column_mut(&mut **self, i);
    }

    fn visit_expr_set_mut(&mut self, i: &mut ExprSet) {
        VisitMut::visit_expr_set_mut(&mut **self, i);
    }

    fn visit_join_mut(&mut self, i: &mut Join) {
        VisitMut::visit_join_mut(&mut **self, i);
    }

    fn visit_order_by_mut(&mut self, i: &mut OrderByExpr) {
        VisitMut::visit_order_by_mut(&mut **self, i);
    }

    fn visit_query_mut(&mut self, i: &mut Query) {
        VisitMut::visit_query_mut(&mut **self, i);
    }

    fn visit_select_mut(&mut self, i: &mut Select) {
        VisitMut::visit_select_mut(&mut **self, i);
    }

    fn visit_table_factor_mut(&mut self, i: &mut TableFactor) {
        VisitMut::visit_table_factor_mut(&mut **self, i);
    }

    fn visit_table_with_joins_mut(&mut self, i: &mut TableWithJoins) {
        VisitMut::visit_table_with_joins_mut(&mut **self, i);
    }
}

pub fn visit_expr_mut<V>(v: &mut V, node: &mut Expr)
where
    V: VisitMut + ?Sized,
{
    match node {
        Expr::And(expr) => {
            for operand in &mut expr.operands {
                v.visit_expr_mut(operand);
            }
        }
        Expr::BinaryOp(expr) => {
            v.visit_expr_mut(&mut expr.lhs);
            v.visit_expr_mut(&mut expr.rhs);
        }
        Expr::Case(expr) => {
            for branch in &mut expr.branches {
                v.visit_expr_mut(&mut branch.when);
                v.visit_expr_mut(&mut branch.then);
            }
            if let Some(otherwise) = &mut expr.otherwise {
                v.visit_expr_mut(otherwise);
            }
        }
        Expr::Column(expr) => v.visit_expr_column_mut(expr),
        Expr::Func(expr) => {
            if let Some(arg) = &mut expr.arg {
                v.visit_expr_mut(arg);
            }
        }
        Expr::InList(expr) => {
            v.visit_expr_mut(&mut expr.expr);
            for item in &mut expr.list {
                v.visit_expr_mut(item);
            }
        }
        Expr::IsNull(expr) => v.visit_expr_mut(&mut expr.expr),
        Expr::Not(expr) => v.visit_expr_mut(expr),
        Expr::Or(expr) => {
            for operand in &mut expr.operands {
                v.visit_expr_mut(operand);
            }
        }
        Expr::Client(_) | Expr::Literal(_) | Expr::Property(_) | Expr::Value(_) => {}
    }
}

pub fn visit_expr_set_mut<V>(v: &mut V, node: &mut ExprSet)
where
    V: VisitMut + ?Sized,
{
    match node {
        ExprSet::Select(select) => v.visit_select_mut(select),
        ExprSet::SetOp(set_op) => {
            for operand in &mut set_op.operands {
                v.visit_expr_set_mut(operand);
            }
        }
    }
}

pub fn visit_join_mut<V>(v: &mut V, node: &mut Join)
where
    V: VisitMut + ?Sized,
{
    v.visit_table_factor_mut(&mut node.relation);
    match &mut node.constraint {
        JoinOp::Inner(on) | JoinOp::Left(on) => v.visit_expr_mut(on),
    }
}

pub fn visit_order_by_mut<V>(v: &mut V, node: &mut OrderByExpr)
where
    V: VisitMut + ?Sized,
{
    v.visit_expr_mut(&mut node.expr);
}

pub fn visit_query_mut<V>(v: &mut V, node: &mut Query)
where
    V: VisitMut + ?Sized,
{
    v.visit_expr_set_mut(&mut node.body);
    for order_by in &mut node.order_by {
        v.visit_order_by_mut(order_by);
    }
}

pub fn visit_select_mut<V>(v: &mut V, node: &mut Select)
where
    V: VisitMut + ?Sized,
{
    for item in &mut node.projection {
        v.visit_expr_mut(&mut item.expr);
    }
    v.visit_table_with_joins_mut(&mut node.source);
    if let Some(filter) = &mut node.filter {
        v.visit_expr_mut(filter);
    }
    for expr in &mut node.group_by {
        v.visit_expr_mut(expr);
    }
}

pub fn visit_table_factor_mut<V>(v: &mut V, node: &mut TableFactor)
where
    V: VisitMut + ?Sized,
{
    if let TableFactor::Derived { query, .. } = node {
        v.visit_query_mut(query);
    }
}

pub fn visit_table_with_joins_mut<V>(v: &mut V, node: &mut TableWithJoins)
where
    V: VisitMut + ?Sized,
{
    v.visit_table_factor_mut(&mut node.relation);
    for join in &mut node.joins {
        v.visit_join_mut(join);
    }
}

/// Calls `f` on every expression reachable from `node`, parents before
/// children.
pub fn for_each_expr_mut<F>(node: &mut Expr, f: F)
where
    F: FnMut(&mut Expr),
{
    struct ForEach<F> {
        f: F,
    }

    impl<F> VisitMut for ForEach<F>
    where
        F: FnMut(&mut Expr),
    {
        fn visit_expr_mut(&mut self, node: &mut Expr) {
            (self.f)(node);
            visit_expr_mut(self, node);
        }
    }

    ForEach { f }.visit_expr_mut(node);
}
