use super::ExprSet;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprSetOp {
    pub op: SetOp,
    pub operands: Vec<ExprSet>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SetOp {
    Union,
    UnionAll,
}

impl SetOp {
    pub fn keyword(self) -> &'static str {
        match self {
            SetOp::Union => "UNION",
            SetOp::UnionAll => "UNION ALL",
        }
    }
}
