//! Relation algebra produced by the planner and consumed by the SQL
//! serializer.
//!
//! Expressions start out at the model level (`Expr::Property`) and are
//! lowered to column references (`Expr::Column`) against the table aliases of
//! the statement being built.

mod expr;
pub use expr::Expr;

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_case;
pub use expr_case::{CaseWhen, ExprCase};

mod expr_column;
pub use expr_column::ExprColumn;

mod expr_func;
pub use expr_func::{ExprFunc, FuncKind};

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_is_null;
pub use expr_is_null::ExprIsNull;

mod expr_or;
pub use expr_or::ExprOr;

mod expr_set;
pub use expr_set::ExprSet;

mod expr_set_op;
pub use expr_set_op::{ExprSetOp, SetOp};

mod join;
pub use join::{Join, JoinOp};

mod op_binary;
pub use op_binary::BinaryOp;

mod order_by;
pub use order_by::{Direction, OrderByExpr};

mod query;
pub use query::Query;

mod select;
pub use select::{Select, SelectItem};

mod table_factor;
pub use table_factor::TableFactor;

mod table_with_joins;
pub use table_with_joins::TableWithJoins;

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;

pub mod visit_mut;
pub use visit_mut::VisitMut;
