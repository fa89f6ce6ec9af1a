use super::Operation;

use crate::stmt;

#[derive(Debug, Clone)]
pub struct QuerySql {
    /// The SQL query to execute
    pub sql: String,

    /// Values bound to the query placeholders, in placeholder order
    pub params: Vec<stmt::Value>,

    /// The type of each returned column
    pub ret: Vec<stmt::Type>,
}

impl From<QuerySql> for Operation {
    fn from(value: QuerySql) -> Self {
        Self::QuerySql(value)
    }
}
