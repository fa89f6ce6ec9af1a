use super::{Flavor, Params, ToSql};

use strata_core::stmt;

impl ToSql for &stmt::Value {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let placeholder = f.params.push(self);
        fmt!(f, placeholder);
    }
}

/// A value written inline into the SQL text
pub(super) struct Literal<'a>(pub(super) &'a stmt::Value);

impl ToSql for Literal<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        use stmt::Value::*;

        match self.0 {
            Null => f.dst.push_str("NULL"),
            Bool(value) => f.dst.push_str(match (f.serializer.flavor, *value) {
                (Flavor::Postgresql, true) => "TRUE",
                (Flavor::Postgresql, false) => "FALSE",
                (_, true) => "1",
                (_, false) => "0",
            }),
            I64(value) => f.dst.push_str(&value.to_string()),
            F64(value) => f.dst.push_str(&format!("{value:?}")),
            String(value) => {
                if f.serializer.flavor == Flavor::SqlServer {
                    f.dst.push('N');
                }
                f.dst.push('\'');
                f.dst.push_str(&value.replace('\'', "''"));
                f.dst.push('\'');
            }
        }
    }
}
