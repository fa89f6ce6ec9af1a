//! Runs a plan and regroups the returned rows into records.

mod regroup;
mod split;

use super::{
    plan::{Command, ExecPlan, Shape},
    Engine,
};
use crate::Record;

use strata_core::{
    driver::operation::QuerySql,
    stmt::{Expr, Value},
    Result,
};

use async_recursion::async_recursion;

/// A record while its collections are loaded.
#[derive(Debug, Clone)]
struct Node {
    record: Record,

    /// Values matching the node to its parent's outer values
    inner: Vec<Value>,

    /// Per collection, the values its rows are matched on
    outer: Vec<Vec<Value>>,

    /// Per collection, the loaded nodes
    children: Vec<Vec<Node>>,
}

impl Engine {
    pub(crate) async fn exec(&self, plan: &ExecPlan) -> Result<Vec<Record>> {
        let nodes = self.load(&plan.root, None).await?;

        Ok(nodes
            .into_iter()
            .map(|node| node.into_record(&plan.root.shape))
            .collect())
    }

    /// Runs `command`, with `batch` ANDed into its filter, and loads the
    /// collections of the returned records.
    #[async_recursion]
    async fn load(&self, command: &Command, batch: Option<Expr>) -> Result<Vec<Node>> {
        let mut query = command.query.clone();

        if let Some(batch) = batch {
            let Some(select) = query.as_select_mut() else {
                strata_core::bail!("a batched command must be a plain `SELECT`");
            };
            select.and_filter(batch);
        }

        let (sql, params) = self.render(&query);
        let op = QuerySql {
            sql,
            params,
            ret: command.ret.clone(),
        };

        let rows = self.driver.exec(op.into()).await?.into_values()?;

        for row in &rows {
            if row.len() != command.ret.len() {
                strata_core::bail!(
                    "the driver returned {} columns, expected {}",
                    row.len(),
                    command.ret.len()
                );
            }
        }

        log::debug!("command returned {} rows", rows.len());

        let rows: Vec<&[Value]> = rows.iter().map(Vec::as_slice).collect();
        let mut nodes = regroup::regroup(&self.schema, &command.shape, &rows, false);

        self.load_children(&command.shape, nodes.iter_mut().collect())
            .await?;

        Ok(nodes)
    }
}

impl Node {
    fn into_record(self, shape: &Shape) -> Record {
        let mut record = self.record;

        for (child, nodes) in shape.children.iter().zip(self.children) {
            let shape = child.shape();
            record.collections.insert(
                child.name.clone(),
                nodes.into_iter().map(|node| node.into_record(shape)).collect(),
            );
        }

        record
    }
}
