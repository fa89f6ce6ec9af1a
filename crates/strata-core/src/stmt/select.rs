use super::{Expr, TableWithJoins};

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub distinct: bool,

    /// Projected expressions, each with the name it is returned under
    pub projection: Vec<SelectItem>,

    /// The `FROM` clause
    pub source: TableWithJoins,

    /// Query filter
    pub filter: Option<Expr>,

    pub group_by: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub expr: Expr,
    pub alias: String,
}

impl Select {
    pub fn new(source: impl Into<TableWithJoins>) -> Select {
        Select {
            distinct: false,
            projection: vec![],
            source: source.into(),
            filter: None,
            group_by: vec![],
        }
    }

    /// ANDs `expr` into the filter.
    pub fn and_filter(&mut self, expr: Expr) {
        self.filter = Some(match self.filter.take() {
            Some(filter) => Expr::and(filter, expr),
            None => expr,
        });
    }

    pub fn position(&self, alias: &str) -> Option<usize> {
        self.projection.iter().position(|item| item.alias == alias)
    }
}
