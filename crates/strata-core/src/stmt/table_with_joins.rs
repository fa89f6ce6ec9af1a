use super::{Join, TableFactor};

#[derive(Debug, Clone, PartialEq)]
pub struct TableWithJoins {
    pub relation: TableFactor,
    pub joins: Vec<Join>,
}

impl From<TableFactor> for TableWithJoins {
    fn from(value: TableFactor) -> Self {
        TableWithJoins {
            relation: value,
            joins: vec![],
        }
    }
}
