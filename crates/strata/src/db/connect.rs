use crate::{Error, Result};

use strata_core::{
    async_trait,
    driver::{Capability, Driver, Operation, Response},
    schema::db::Schema,
};

use url::Url;

/// A driver selected by connection URL scheme. Only `sqlite:` URLs are
/// recognized.
#[derive(Debug)]
pub struct Connect {
    driver: Box<dyn Driver>,
}

impl Connect {
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|err| strata_core::err!("invalid connection URL `{url}`: {err}"))?;

        let driver = match url.scheme() {
            "sqlite" => connect_sqlite(&url)?,
            scheme => {
                return Err(Error::unsupported_operation(format!(
                    "unsupported database; scheme={scheme}; url={url}"
                )))
            }
        };

        log::debug!("connected; scheme={}", url.scheme());
        Ok(Self { driver })
    }
}

#[async_trait]
impl Driver for Connect {
    fn capability(&self) -> &Capability {
        self.driver.capability()
    }

    async fn register_schema(&mut self, schema: &Schema) -> Result<()> {
        self.driver.register_schema(schema).await
    }

    async fn exec(&self, op: Operation) -> Result<Response> {
        self.driver.exec(op).await
    }
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &Url) -> Result<Box<dyn Driver>> {
    Ok(Box::new(strata_driver_sqlite::Sqlite::new(url.as_str())?))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &Url) -> Result<Box<dyn Driver>> {
    Err(Error::unsupported_operation("`sqlite` feature not enabled"))
}
