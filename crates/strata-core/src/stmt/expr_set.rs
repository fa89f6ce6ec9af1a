use super::{ExprSetOp, Select};

#[derive(Debug, Clone, PartialEq)]
pub enum ExprSet {
    /// A select query, possibly with a filter.
    Select(Box<Select>),

    /// A set operation (union, ...) over selects
    SetOp(ExprSetOp),
}

impl ExprSet {
    pub fn width(&self) -> usize {
        match self {
            ExprSet::Select(select) => select.projection.len(),
            ExprSet::SetOp(set_op) => set_op
                .operands
                .first()
                .map(ExprSet::width)
                .unwrap_or_default(),
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, ExprSet::Select(_))
    }
}

impl From<Select> for ExprSet {
    fn from(value: Select) -> Self {
        ExprSet::Select(Box::new(value))
    }
}

impl From<ExprSetOp> for ExprSet {
    fn from(value: ExprSetOp) -> Self {
        ExprSet::SetOp(value)
    }
}
