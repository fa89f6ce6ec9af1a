use crate::SqlLog;

use strata::driver::{Capability, Driver, Operation, Response};
use strata_core::{async_trait, schema::db::Schema, Result};

/// A driver wrapper that records every command sent to the database.
#[derive(Debug)]
pub struct LoggingDriver {
    /// The underlying driver that actually executes operations
    inner: Box<dyn Driver>,

    log: SqlLog,
}

impl LoggingDriver {
    pub fn new(driver: Box<dyn Driver>, log: SqlLog) -> Self {
        Self { inner: driver, log }
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    fn capability(&self) -> &Capability {
        self.inner.capability()
    }

    async fn register_schema(&mut self, schema: &Schema) -> Result<()> {
        self.inner.register_schema(schema).await
    }

    async fn exec(&self, operation: Operation) -> Result<Response> {
        // Commands are logged even when they fail.
        self.log.push(&operation);
        self.inner.exec(operation).await
    }
}
