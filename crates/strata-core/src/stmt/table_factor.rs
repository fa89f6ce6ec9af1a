use super::Query;
use crate::schema::db::TableId;

/// A relation in a `FROM` or `JOIN` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum TableFactor {
    /// A mapped table
    Table { table: TableId, alias: String },

    /// A parenthesized subquery
    Derived { query: Box<Query>, alias: String },

    /// User-provided SQL text, wrapped as a subquery
    Raw { sql: String, alias: String },
}

impl TableFactor {
    pub fn alias(&self) -> &str {
        match self {
            TableFactor::Table { alias, .. }
            | TableFactor::Derived { alias, .. }
            | TableFactor::Raw { alias, .. } => alias,
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, TableFactor::Table { .. })
    }
}
