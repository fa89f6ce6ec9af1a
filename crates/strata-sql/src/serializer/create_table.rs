use super::{Comma, Formatter, Ident, Newline, Params, Serializer, ToSql};

use strata_core::{schema::db, stmt};

impl Serializer<'_> {
    /// Renders the `CREATE TABLE` statement for a resolved table.
    pub fn create_table(&self, table: &db::Table) -> String {
        let mut ret = String::new();
        let mut params: Vec<stmt::Value> = vec![];

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params: &mut params,
            depth: 0,
        };

        CreateTable(table).to_sql(&mut fmt);

        ret
    }
}

struct CreateTable<'a>(&'a db::Table);

impl ToSql for CreateTable<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = self.0;
        let schema = f.serializer.schema;
        let name = Ident(&table.name);

        fmt!(f, "CREATE TABLE " name " (");
        f.depth += 1;

        let mut s = "";
        for column in &table.columns {
            let not_null = if column.nullable { "" } else { " NOT NULL" };
            fmt!(f, s Newline Ident(&column.name) " " column.ty not_null);
            s = ",";
        }

        if !table.primary_key.is_empty() {
            let columns = Comma(table.primary_key_columns().map(|column| Ident(&column.name)));
            fmt!(f, s Newline "PRIMARY KEY (" columns ")");
        }

        for foreign_key in &table.foreign_keys {
            let references = schema.table(foreign_key.references);
            let columns = Comma(
                foreign_key
                    .columns
                    .iter()
                    .map(|column| Ident(&table.column(*column).name)),
            );
            let references_columns = Comma(
                foreign_key
                    .references_columns
                    .iter()
                    .map(|column| Ident(&references.column(*column).name)),
            );

            fmt!(
                f,
                "," Newline "FOREIGN KEY (" columns ") REFERENCES " Ident(&references.name)
                " (" references_columns ")"
            );
        }

        f.depth -= 1;
        fmt!(f, Newline ")");
    }
}
