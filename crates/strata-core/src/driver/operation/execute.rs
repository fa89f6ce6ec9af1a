use super::Operation;

use crate::stmt;

#[derive(Debug, Clone)]
pub struct Execute {
    pub sql: String,
    pub params: Vec<stmt::Value>,
}

impl From<Execute> for Operation {
    fn from(value: Execute) -> Self {
        Self::Execute(value)
    }
}
