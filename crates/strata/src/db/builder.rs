use super::Db;
use crate::{
    engine::{Engine, Settings},
    Error, ModelConfig, Result, Splitting,
};

use strata_core::{
    driver::Driver,
    schema::{self, app},
    Schema,
};

use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    /// Registered model configurations, merged in registration order
    models: Vec<ModelConfig>,

    /// Schema builder
    core: schema::Builder,

    /// Engine options
    settings: Settings,
}

impl Builder {
    pub fn register(&mut self, config: ModelConfig) -> &mut Self {
        self.models.push(config);
        self
    }

    /// Set the table name prefix for all tables
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.core.table_name_prefix(prefix);
        self
    }

    /// Sets how collections are loaded when a query does not choose.
    pub fn query_splitting(&mut self, splitting: Splitting) -> &mut Self {
        self.settings.splitting = splitting;
        self
    }

    /// Maximum number of parent keys bound by one split collection command.
    pub fn split_batch_size(&mut self, size: usize) -> &mut Self {
        self.settings.split_batch_size = size;
        self
    }

    pub fn build_app_schema(&self) -> Result<app::Schema> {
        let merged = ModelConfig {
            entities: self
                .models
                .iter()
                .flat_map(|model| model.entities.iter().cloned())
                .collect(),
        };

        merged.into_app()
    }

    /// Resolves the registered models without connecting to a database.
    pub fn build_schema(&self) -> Result<Schema> {
        self.core.build(self.build_app_schema()?)
    }

    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(super::Connect::new(url)?).await
    }

    pub async fn build(&mut self, mut driver: impl Driver) -> Result<Db> {
        if self.settings.split_batch_size == 0 {
            return Err(Error::configuration("split batch size must be at least 1"));
        }

        let schema = self.build_schema()?;

        log::debug!(
            "schema resolved; entities={} tables={}",
            schema.app.entities.len(),
            schema.db.tables.len()
        );

        driver.register_schema(&schema.db).await?;

        Ok(Db {
            engine: Arc::new(Engine {
                schema: Arc::new(schema),
                driver: Arc::new(driver),
                settings: self.settings.clone(),
            }),
        })
    }
}
