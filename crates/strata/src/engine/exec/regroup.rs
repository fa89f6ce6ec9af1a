use super::Node;
use crate::{
    engine::{
        plan::{Load, Shape},
        planner::TypeResolver,
    },
    Record,
};

use strata_core::{stmt::Value, Schema};

use indexmap::IndexMap;

/// Groups `rows` into the records of `shape`.
///
/// Rows with equal identifier values are one record; joined collections are
/// regrouped from each record's rows in turn. When the type is read from a
/// marker, the marker is part of the grouping key: sibling tables of a
/// table-per-concrete-type union may reuse key values. A joined level is
/// `optional`: a row whose identifier is entirely `NULL` matched nothing in
/// the `LEFT JOIN` and yields no record.
pub(super) fn regroup(
    schema: &Schema,
    shape: &Shape,
    rows: &[&[Value]],
    optional: bool,
) -> Vec<Node> {
    let groups: Vec<Vec<&[Value]>> = if shape.identifier.is_empty() {
        rows.iter().map(|row| vec![*row]).collect()
    } else {
        let mut groups = IndexMap::<Vec<Value>, Vec<&[Value]>>::new();

        for row in rows {
            let mut key: Vec<Value> =
                shape.identifier.iter().map(|&i| row[i].clone()).collect();

            if optional && key.iter().all(Value::is_null) {
                continue;
            }

            if let (Some(TypeResolver::ByMarker(_)), Some(marker)) = (shape.ty, shape.marker) {
                key.push(row[marker].clone());
            }

            groups.entry(key).or_default().push(*row);
        }

        groups.into_values().collect()
    };

    groups.iter().map(|rows| node(schema, shape, rows)).collect()
}

fn node(schema: &Schema, shape: &Shape, rows: &[&[Value]]) -> Node {
    let first = rows[0];

    let ty = shape.ty.and_then(|resolver| {
        let marker = shape.marker.map(|index| &first[index]);
        let ty = resolver.resolve(schema, marker);

        if ty.is_none() {
            // Unmapped type: every column read is kept, the type is not.
            log::warn!("row of unknown type materialized without a type; marker={marker:?}");
        }

        ty
    });

    let lineage = ty.map(|ty| {
        let mut lineage = schema.app.ancestors(ty);
        lineage.push(ty);
        lineage
    });

    let mut record = Record::new(ty);

    for field in &shape.fields {
        if let (Some(lineage), Some(owner)) = (&lineage, field.owner) {
            if !lineage.contains(&owner) {
                continue;
            }
        }

        record
            .fields
            .insert(field.name.clone(), first[field.index].clone());
    }

    let mut outer = vec![];
    let mut children = vec![];

    for child in &shape.children {
        outer.push(child.outer.iter().map(|&i| first[i].clone()).collect());

        children.push(match &child.load {
            Load::Joined(shape) => regroup(schema, shape, rows, true),
            Load::Split(_) => vec![],
        });
    }

    Node {
        record,
        inner: shape.inner.iter().map(|&i| first[i].clone()).collect(),
        outer,
        children,
    }
}
