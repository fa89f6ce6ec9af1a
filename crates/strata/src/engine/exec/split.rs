use super::Node;
use crate::engine::{
    plan::{Load, Shape, SplitLoad},
    Engine,
};

use strata_core::{
    stmt::{Expr, Value},
    Result,
};

use async_recursion::async_recursion;
use futures_util::future::try_join_all;
use indexmap::{IndexMap, IndexSet};

impl Engine {
    /// Loads the collections of `nodes`, which all have the shape `shape`.
    ///
    /// Split collections of the same level run concurrently. The first
    /// failure aborts the whole load.
    #[async_recursion]
    pub(super) async fn load_children(
        &self,
        shape: &Shape,
        mut nodes: Vec<&mut Node>,
    ) -> Result<()> {
        if nodes.is_empty() {
            return Ok(());
        }

        let mut splits = vec![];

        for (index, child) in shape.children.iter().enumerate() {
            if let Load::Split(load) = &child.load {
                let keys: IndexSet<Vec<Value>> = nodes
                    .iter()
                    .map(|node| node.outer[index].clone())
                    .filter(|key| !key.iter().any(Value::is_null))
                    .collect();

                splits.push(async move {
                    let loaded = self.load_split(load, keys.into_iter().collect()).await?;
                    Ok::<_, strata_core::Error>((index, loaded))
                });
            }
        }

        for (index, loaded) in try_join_all(splits).await? {
            let mut by_key = IndexMap::<Vec<Value>, Vec<Node>>::new();

            for node in loaded {
                by_key.entry(node.inner.clone()).or_default().push(node);
            }

            for node in nodes.iter_mut() {
                node.children[index] = by_key
                    .get(&node.outer[index])
                    .cloned()
                    .unwrap_or_default();
            }
        }

        for (index, child) in shape.children.iter().enumerate() {
            if let Load::Joined(shape) = &child.load {
                let nested: Vec<&mut Node> = nodes
                    .iter_mut()
                    .flat_map(|node| node.children[index].iter_mut())
                    .collect();

                self.load_children(shape, nested).await?;
            }
        }

        Ok(())
    }

    /// Runs a split command once per batch of parent keys.
    async fn load_split(&self, load: &SplitLoad, keys: Vec<Vec<Value>>) -> Result<Vec<Node>> {
        let mut ret = vec![];

        for batch in keys.chunks(self.settings.split_batch_size) {
            let filter = batch_filter(&load.inner, batch);
            ret.extend(self.load(&load.command, Some(filter)).await?);
        }

        Ok(ret)
    }
}

/// Matches the inner expressions against a batch of keys.
fn batch_filter(inner: &[Expr], keys: &[Vec<Value>]) -> Expr {
    if let [expr] = inner {
        return Expr::in_list(
            expr.clone(),
            keys.iter().map(|key| Expr::value(key[0].clone())).collect(),
        );
    }

    Expr::or_from_vec(
        keys.iter()
            .map(|key| {
                Expr::and_from_vec(
                    inner
                        .iter()
                        .zip(key)
                        .map(|(expr, value)| Expr::eq(expr.clone(), Expr::value(value.clone())))
                        .collect(),
                )
            })
            .collect(),
    )
}
