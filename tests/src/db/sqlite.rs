use strata::driver::{Capability, Driver};

use crate::Setup;

#[derive(Debug, Default)]
pub struct SetupSqlite;

impl SetupSqlite {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Setup for SetupSqlite {
    async fn connect(&self) -> strata::Result<Box<dyn Driver>> {
        // Every connection gets its own private in-memory database.
        Ok(Box::new(strata::db::Connect::new("sqlite::memory:")?))
    }

    fn capability(&self) -> &Capability {
        &Capability::SQLITE
    }
}
