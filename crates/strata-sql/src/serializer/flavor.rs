use super::Serializer;

use strata_core::{driver::SqlDialect, schema::db};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flavor {
    Postgresql,
    Sqlite,
    Mysql,
    SqlServer,
}

impl<'a> Serializer<'a> {
    pub fn sqlite(schema: &'a db::Schema) -> Serializer<'a> {
        Serializer {
            schema,
            flavor: Flavor::Sqlite,
        }
    }

    pub fn postgresql(schema: &'a db::Schema) -> Serializer<'a> {
        Serializer {
            schema,
            flavor: Flavor::Postgresql,
        }
    }

    pub fn mysql(schema: &'a db::Schema) -> Serializer<'a> {
        Serializer {
            schema,
            flavor: Flavor::Mysql,
        }
    }

    pub fn sql_server(schema: &'a db::Schema) -> Serializer<'a> {
        Serializer {
            schema,
            flavor: Flavor::SqlServer,
        }
    }

    pub fn for_dialect(schema: &'a db::Schema, dialect: SqlDialect) -> Serializer<'a> {
        match dialect {
            SqlDialect::Sqlite => Serializer::sqlite(schema),
            SqlDialect::Postgresql => Serializer::postgresql(schema),
            SqlDialect::Mysql => Serializer::mysql(schema),
            SqlDialect::SqlServer => Serializer::sql_server(schema),
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.flavor == Flavor::Sqlite
    }

    pub fn is_sql_server(&self) -> bool {
        self.flavor == Flavor::SqlServer
    }
}
