mod alias;
mod exec;
mod lower;
mod materialize;
mod plan;
use plan::ExecPlan;
mod planner;
mod ty;

use strata_core::{
    driver::Driver,
    query::{Query, Splitting},
    stmt::{self, Value},
    Result, Schema,
};
use strata_sql::Serializer;

use std::sync::Arc;

/// Plans queries against the resolved schema and runs them on the driver.
#[derive(Debug)]
pub(crate) struct Engine {
    /// The resolved schema
    pub(crate) schema: Arc<Schema>,

    /// Handle to the database
    pub(crate) driver: Arc<dyn Driver>,

    pub(crate) settings: Settings,
}

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    /// Loading mode for collections of queries that do not pick one
    pub(crate) splitting: Splitting,

    /// Maximum number of parent keys per split command
    pub(crate) split_batch_size: usize,
}

impl Engine {
    pub(crate) fn plan(&self, query: &Query) -> Result<ExecPlan> {
        let tree = materialize::apply(&self.schema, query, self.settings.splitting)?;
        lower::apply(&self.schema, &tree)
    }

    /// Renders `query` in the driver's SQL flavor.
    pub(crate) fn render(&self, query: &stmt::Query) -> (String, Vec<Value>) {
        let dialect = self.driver.capability().dialect;
        let (sql, params) = Serializer::for_dialect(&self.schema.db, dialect).render(query);

        log::trace!("rendered SQL; sql={sql}; params={params:?}");
        (sql, params)
    }
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            splitting: Splitting::Joined,
            split_batch_size: 500,
        }
    }
}
