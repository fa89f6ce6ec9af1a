mod execute;
pub use execute::Execute;

mod query_sql;
pub use query_sql::QuerySql;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Run a statement that returns no rows
    Execute(Execute),

    /// Run a query and return its rows
    QuerySql(QuerySql),
}

impl Operation {
    pub fn sql(&self) -> &str {
        match self {
            Operation::Execute(op) => &op.sql,
            Operation::QuerySql(op) => &op.sql,
        }
    }

    pub fn params(&self) -> &[crate::stmt::Value] {
        match self {
            Operation::Execute(op) => &op.params,
            Operation::QuerySql(op) => &op.params,
        }
    }
}
