use super::{Comma, Flavor, Ident, Newline, Params, ToSql};

use strata_core::stmt::{self, Expr};

impl ToSql for &stmt::Query {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, &self.body);

        let order_by = (!self.order_by.is_empty()).then(|| Comma(&self.order_by));

        match (order_by, self.limit, f.serializer.flavor) {
            (order_by, Some(limit), Flavor::SqlServer) => {
                // OFFSET ... FETCH requires an ORDER BY clause
                match order_by {
                    Some(order_by) => fmt!(f, Newline "ORDER BY " order_by),
                    None => fmt!(f, Newline "ORDER BY (SELECT NULL)"),
                }
                fmt!(f, Newline "OFFSET 0 ROWS FETCH NEXT " limit " ROWS ONLY");
            }
            (order_by, limit, _) => {
                if let Some(order_by) = order_by {
                    fmt!(f, Newline "ORDER BY " order_by);
                }
                if let Some(limit) = limit {
                    fmt!(f, Newline "LIMIT " limit);
                }
            }
        }
    }
}

impl ToSql for &stmt::ExprSet {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            stmt::ExprSet::Select(select) => {
                let select: &stmt::Select = select;
                select.to_sql(f);
            }
            stmt::ExprSet::SetOp(set_op) => {
                for (index, operand) in set_op.operands.iter().enumerate() {
                    if index > 0 {
                        fmt!(f, Newline set_op.op.keyword() Newline);
                    }
                    operand.to_sql(f);
                }
            }
        }
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let distinct = if self.distinct { "DISTINCT " } else { "" };
        let projection = Comma(&self.projection);

        let source = &self.source;

        fmt!(f, "SELECT " distinct projection Newline "FROM " source);

        if let Some(filter) = &self.filter {
            fmt!(f, Newline "WHERE " filter);
        }

        if !self.group_by.is_empty() {
            fmt!(f, Newline "GROUP BY " Comma(&self.group_by));
        }
    }
}

impl ToSql for &stmt::SelectItem {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, &self.expr);

        // A column projected under its own name needs no alias
        let named = matches!(&self.expr, Expr::Column(column) if column.column == self.alias);
        if !named {
            fmt!(f, " AS " Ident(&self.alias));
        }
    }
}

impl ToSql for &stmt::TableWithJoins {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, &self.relation);

        for join in &self.joins {
            fmt!(f, Newline join);
        }
    }
}

impl ToSql for &stmt::Join {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let (keyword, on) = match &self.constraint {
            stmt::JoinOp::Inner(on) => ("INNER JOIN ", on),
            stmt::JoinOp::Left(on) => ("LEFT JOIN ", on),
        };

        let relation = &self.relation;
        fmt!(f, keyword relation " ON " on);
    }
}

impl ToSql for &stmt::TableFactor {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            stmt::TableFactor::Table { table, alias } => {
                let table_name = f.serializer.table_name(*table);
                fmt!(f, table_name " AS " Ident(alias));
            }
            stmt::TableFactor::Derived { query, alias } => {
                let query: &stmt::Query = query;

                fmt!(f, "(");
                f.depth += 1;
                fmt!(f, Newline query);
                f.depth -= 1;
                fmt!(f, Newline ") AS " Ident(alias));
            }
            stmt::TableFactor::Raw { sql, alias } => {
                fmt!(f, "(");
                f.depth += 1;
                for line in sql.trim().lines() {
                    fmt!(f, Newline line.trim_end());
                }
                f.depth -= 1;
                fmt!(f, Newline ") AS " Ident(alias));
            }
        }
    }
}

impl ToSql for &stmt::OrderByExpr {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let direction = self.direction.map(|direction| match direction {
            stmt::Direction::Asc => " ASC",
            stmt::Direction::Desc => " DESC",
        });

        fmt!(f, &self.expr direction);
    }
}
