use crate::{LoggingDriver, Setup, SqlLog};

use std::{future::Future, pin::Pin};
use strata::{db, driver::Driver, Db};

/// Runs one test case against a fresh database on its own runtime.
pub struct DbTest {
    runtime: Option<tokio::runtime::Runtime>,
    setup: Box<dyn Setup>,
    log: SqlLog,
}

impl DbTest {
    /// Create a new DbTest with a current-thread runtime.
    pub fn new(setup: Box<dyn Setup>) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create Tokio runtime");

        Self {
            runtime: Some(runtime),
            setup,
            log: SqlLog::new(),
        }
    }

    /// Builds a database from `builder`, logging every command it runs.
    pub async fn try_setup_db(&mut self, mut builder: db::Builder) -> strata::Result<Db> {
        let driver = self.setup.connect().await?;
        builder
            .build(LoggingDriver::new(driver, self.log.clone()))
            .await
    }

    pub async fn setup_db(&mut self, builder: db::Builder) -> Db {
        self.try_setup_db(builder).await.unwrap()
    }

    /// Opens a raw driver, for tests that wrap it themselves.
    pub async fn connect(&self) -> Box<dyn Driver> {
        self.setup.connect().await.unwrap()
    }

    /// The SQL logged by databases created with [`DbTest::setup_db`].
    pub fn log(&self) -> &SqlLog {
        &self.log
    }

    pub fn capability(&self) -> &strata::driver::Capability {
        self.setup.capability()
    }

    /// Run a test function with a mutable reference to self, using our
    /// managed runtime.
    pub fn run_test<F>(&mut self, test_fn: F)
    where
        F: for<'a> FnOnce(&'a mut DbTest) -> Pin<Box<dyn Future<Output = ()> + 'a>>,
    {
        let runtime = self.runtime.take().expect("test already running");
        runtime.block_on(test_fn(self));
        self.runtime = Some(runtime);
    }
}
