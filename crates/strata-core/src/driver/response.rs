use crate::{stmt::Value, Result};

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Returned rows, one value per column
    Values(Vec<Vec<Value>>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(rows: Vec<Vec<Value>>) -> Self {
        Self {
            rows: Rows::Values(rows),
        }
    }

    pub fn into_values(self) -> Result<Vec<Vec<Value>>> {
        match self.rows {
            Rows::Values(rows) => Ok(rows),
            Rows::Count(_) => Err(crate::err!("expected rows, the driver returned a count")),
        }
    }

    /// Rows affected by a statement. A statement that returned rows
    /// reports how many.
    pub fn into_count(self) -> Result<u64> {
        match self.rows {
            Rows::Count(count) => Ok(count),
            Rows::Values(rows) => Ok(rows.len() as u64),
        }
    }
}
