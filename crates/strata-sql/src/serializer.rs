#[macro_use]
mod fmt;
use fmt::{Newline, ToSql};

mod delim;
use delim::{Comma, Delimited};

mod flavor;
use flavor::Flavor;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod create_table;
mod expr;
mod statement;
mod ty;
mod value;

use strata_core::{
    schema::db,
    stmt::{Query, Value},
};

/// Serialize a statement to a SQL string
///
/// Output is a pure function of the statement and the flavor: clauses start
/// on their own line and derived tables are indented by four spaces per
/// nesting level.
#[derive(Debug)]
pub struct Serializer<'a> {
    /// Schema against which the statement is to be serialized
    schema: &'a db::Schema,

    /// The database flavor handles the differences between SQL dialects and
    /// supported features.
    flavor: Flavor,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,

    /// Current subquery depth, used to indent derived tables
    depth: usize,
}

impl<'a> Serializer<'a> {
    pub fn serialize(&self, query: &Query, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
            depth: 0,
        };

        query.to_sql(&mut fmt);

        ret
    }

    /// Renders `query` to SQL text and its ordered parameter list.
    pub fn render(&self, query: &Query) -> (String, Vec<Value>) {
        let mut params = vec![];
        let sql = self.serialize(query, &mut params);
        (sql, params)
    }

    fn table_name(&self, id: impl Into<db::TableId>) -> Ident<&'a str> {
        let table = self.schema.table(id.into());
        Ident(&table.name)
    }
}

impl<T> Formatter<'_, T> {
    fn newline(&mut self) {
        self.dst.push('\n');
        for _ in 0..self.depth {
            self.dst.push_str("    ");
        }
    }
}
