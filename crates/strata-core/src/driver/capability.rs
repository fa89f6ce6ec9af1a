#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    /// SQL flavor the driver understands
    pub dialect: SqlDialect,

    /// Maximum number of bound parameters in one command
    pub max_params: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlDialect {
    Sqlite,
    Postgresql,
    Mysql,
    SqlServer,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        dialect: SqlDialect::Sqlite,
        max_params: 32_766,
    };

    /// PostgreSQL capabilities
    pub const POSTGRESQL: Self = Self {
        dialect: SqlDialect::Postgresql,
        max_params: 65_535,
    };

    /// MySQL capabilities
    pub const MYSQL: Self = Self {
        dialect: SqlDialect::Mysql,
        max_params: 65_535,
    };

    /// SQL Server capabilities
    pub const SQL_SERVER: Self = Self {
        dialect: SqlDialect::SqlServer,
        max_params: 2_100,
    };
}
