#[macro_use]
mod macros;


mod db_test;
pub use db_test::DbTest;

pub mod fixtures;

pub mod prelude;

mod logging_driver;
pub use logging_driver::LoggingDriver;

mod sql_log;
pub use sql_log::SqlLog;

use strata::driver::{Capability, Driver};

#[async_trait::async_trait]
pub trait Setup: Send + Sync + 'static {
    /// Opens a fresh, empty database.
    async fn connect(&self) -> strata::Result<Box<dyn Driver>>;

    fn capability(&self) -> &Capability;
}
