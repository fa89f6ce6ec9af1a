mod value;
pub(crate) use value::Value;

use rusqlite::Connection;
use std::{path::Path, sync::Mutex};
use strata_core::{
    async_trait,
    driver::{Capability, Driver, Operation, Response},
    schema::db::Schema,
    Error, Result,
};
use strata_sql::Serializer;
use url::Url;

/// A single SQLite connection.
///
/// Commands are serialized on the connection; concurrent callers wait for
/// their turn.
#[derive(Debug)]
pub struct Sqlite {
    connection: Mutex<Connection>,
}

impl Sqlite {
    /// Opens a connection from a `sqlite:` URL. `sqlite::memory:` opens a
    /// private in-memory database, any other path names a database file.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver_operation_failed)?;

        if url.scheme() != "sqlite" {
            return Err(Error::unsupported_operation(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Self::in_memory()
        } else {
            Self::open(url.path())
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(Error::driver_operation_failed)?;
        Ok(Self::from_connection(connection))
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).map_err(Error::driver_operation_failed)?;
        Ok(Self::from_connection(connection))
    }

    fn from_connection(connection: Connection) -> Self {
        Self {
            connection: Mutex::new(connection),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| strata_core::err!("the SQLite connection is poisoned"))
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn capability(&self) -> &Capability {
        &Capability::SQLITE
    }

    async fn register_schema(&mut self, schema: &Schema) -> Result<()> {
        let serializer = Serializer::sqlite(schema);
        let connection = self.lock()?;

        for table in &schema.tables {
            let sql = serializer.create_table(table);
            log::debug!("creating table `{}`", table.name);

            connection
                .execute(&sql, [])
                .map_err(Error::driver_operation_failed)?;
        }

        Ok(())
    }

    async fn exec(&self, op: Operation) -> Result<Response> {
        let connection = self.lock()?;

        match op {
            Operation::Execute(op) => {
                let params: Vec<Value> = op.params.into_iter().map(Value::from).collect();
                let count = connection
                    .execute(&op.sql, rusqlite::params_from_iter(params.iter()))
                    .map_err(Error::driver_operation_failed)?;

                Ok(Response::count(count as u64))
            }
            Operation::QuerySql(op) => {
                let mut stmt = connection
                    .prepare_cached(&op.sql)
                    .map_err(Error::driver_operation_failed)?;

                if stmt.column_count() != op.ret.len() {
                    strata_core::bail!(
                        "query returns {} columns but {} were expected; sql={}",
                        stmt.column_count(),
                        op.ret.len(),
                        op.sql
                    );
                }

                let params: Vec<Value> = op.params.into_iter().map(Value::from).collect();
                let mut rows = stmt
                    .query(rusqlite::params_from_iter(params.iter()))
                    .map_err(Error::driver_operation_failed)?;

                let mut ret = vec![];

                while let Some(row) = rows.next().map_err(Error::driver_operation_failed)? {
                    let mut items = Vec::with_capacity(op.ret.len());

                    for (index, ty) in op.ret.iter().enumerate() {
                        items.push(Value::from_sql(row, index, ty)?.into_inner());
                    }

                    ret.push(items);
                }

                Ok(Response::values(ret))
            }
        }
    }
}
