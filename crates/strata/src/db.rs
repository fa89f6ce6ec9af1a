mod builder;
pub use builder::Builder;

mod connect;
pub use connect::Connect;

use crate::{engine::Engine, Query, Record, Result};

use strata_core::{
    driver::{operation::Execute, Driver},
    stmt::Value,
    Schema,
};

use std::sync::Arc;

/// A database handle.
///
/// Cloning is cheap; all clones share the resolved schema and the driver.
/// Planning reads the schema only, so queries may be planned and executed
/// concurrently from many tasks.
#[derive(Debug, Clone)]
pub struct Db {
    pub(crate) engine: Arc<Engine>,
}

/// The SQL of a query's root command, as it would be sent to the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.engine.schema
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.engine.driver
    }

    /// Plans `query` and renders its root command without executing it.
    ///
    /// Commands loading split collections depend on the parent rows and are
    /// only rendered during execution.
    pub fn plan(&self, query: &Query) -> Result<PreparedQuery> {
        let plan = self.engine.plan(query)?;
        let (sql, params) = self.engine.render(&plan.root.query);
        Ok(PreparedQuery { sql, params })
    }

    /// Executes `query`, returning the materialized rows with their
    /// collections.
    ///
    /// Dropping the returned future abandons any command still in flight and
    /// no partial result is produced.
    pub async fn query(&self, query: &Query) -> Result<Vec<Record>> {
        let plan = self.engine.plan(query)?;
        self.engine.exec(&plan).await
    }

    /// Executes a statement that returns no rows, such as an `INSERT`.
    pub async fn execute(&self, sql: impl Into<String>, params: Vec<Value>) -> Result<u64> {
        let op = Execute {
            sql: sql.into(),
            params,
        };

        self.engine.driver.exec(op.into()).await?.into_count()
    }
}
