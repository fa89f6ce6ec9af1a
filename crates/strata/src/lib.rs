pub mod db;
pub use db::{Db, PreparedQuery};

mod engine;

mod record;
pub use record::Record;

pub use strata_core::{
    driver,
    query::{self, Aggregate, CollectionAccess, Projection, Query, Splitting},
    schema::{
        self,
        config::{EntityConfig, ModelConfig},
    },
    stmt, Error, Result, Schema,
};
