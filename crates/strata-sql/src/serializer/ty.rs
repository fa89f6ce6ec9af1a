use super::{Flavor, Params, ToSql};

use strata_core::stmt;

impl ToSql for stmt::Type {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let flavor = f.serializer.flavor;

        fmt!(
            f,
            match (self, flavor) {
                (stmt::Type::Bool, Flavor::Sqlite) => "INTEGER",
                (stmt::Type::Bool, Flavor::SqlServer) => "BIT",
                (stmt::Type::Bool, _) => "BOOLEAN",
                (stmt::Type::I64, Flavor::Sqlite) => "INTEGER",
                (stmt::Type::I64, _) => "BIGINT",
                (stmt::Type::F64, Flavor::Sqlite) => "REAL",
                (stmt::Type::F64, Flavor::Postgresql) => "DOUBLE PRECISION",
                (stmt::Type::F64, Flavor::Mysql) => "DOUBLE",
                (stmt::Type::F64, Flavor::SqlServer) => "FLOAT",
                (stmt::Type::String, Flavor::Mysql) => "VARCHAR(255)",
                (stmt::Type::String, Flavor::SqlServer) => "NVARCHAR(450)",
                (stmt::Type::String, _) => "TEXT",
            }
        );
    }
}
