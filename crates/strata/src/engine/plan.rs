//! The executable form of a query: SQL commands and the shapes describing
//! how their rows become records.

use super::planner::TypeResolver;

use strata_core::{
    schema::app::EntityId,
    stmt::{self, Expr},
};

#[derive(Debug)]
pub(crate) struct ExecPlan {
    pub(crate) root: Command,
}

/// One SQL command and how to read its rows.
#[derive(Debug, Clone)]
pub(crate) struct Command {
    pub(crate) query: stmt::Query,

    /// Type of each returned column
    pub(crate) ret: Vec<stmt::Type>,

    pub(crate) shape: Shape,
}

/// Reads one query level out of a flat row. All indices are column
/// positions in the rows of the enclosing command.
#[derive(Debug, Clone)]
pub(crate) struct Shape {
    /// Columns identifying a row of this level. Rows with the same values
    /// are one record. Empty when every row is its own record.
    pub(crate) identifier: Vec<usize>,

    /// How to recover the entity type, `None` when rows are not entities
    pub(crate) ty: Option<TypeResolver>,

    /// Column holding the type marker
    pub(crate) marker: Option<usize>,

    pub(crate) fields: Vec<Field>,

    /// Correlation values the row is matched to its parent with
    pub(crate) inner: Vec<usize>,

    /// Collections, in the order they were requested
    pub(crate) children: Vec<Child>,
}

#[derive(Debug, Clone)]
pub(crate) struct Field {
    pub(crate) name: String,

    pub(crate) index: usize,

    /// Entity type declaring the property. The field is only read for rows
    /// whose type is, or derives from, the owner.
    pub(crate) owner: Option<EntityId>,
}

#[derive(Debug, Clone)]
pub(crate) struct Child {
    pub(crate) name: String,

    /// Parent columns matched against the child's correlation values
    pub(crate) outer: Vec<usize>,

    pub(crate) load: Load,
}

#[derive(Debug, Clone)]
pub(crate) enum Load {
    /// Child columns are part of the parent's rows
    Joined(Shape),

    /// Child rows come from a separate command per batch of parent keys
    Split(SplitLoad),
}

#[derive(Debug, Clone)]
pub(crate) struct SplitLoad {
    /// The command without its batch predicate
    pub(crate) command: Command,

    /// Expressions the parent keys are matched against, in the scope of the
    /// command's `SELECT`
    pub(crate) inner: Vec<Expr>,
}

impl Shape {
    pub(crate) fn new(ty: Option<TypeResolver>) -> Shape {
        Shape {
            identifier: vec![],
            ty,
            marker: None,
            fields: vec![],
            inner: vec![],
            children: vec![],
        }
    }

    /// Moves every column index of this level and its joined children by
    /// `offset`.
    pub(crate) fn shift(&mut self, offset: usize) {
        let shift = |indices: &mut Vec<usize>| {
            for index in indices {
                *index += offset;
            }
        };

        shift(&mut self.identifier);
        shift(&mut self.inner);

        if let Some(marker) = &mut self.marker {
            *marker += offset;
        }

        for field in &mut self.fields {
            field.index += offset;
        }

        for child in &mut self.children {
            shift(&mut child.outer);

            if let Load::Joined(shape) = &mut child.load {
                shape.shift(offset);
            }
        }
    }
}

impl Child {
    pub(crate) fn shape(&self) -> &Shape {
        match &self.load {
            Load::Joined(shape) => shape,
            Load::Split(load) => &load.command.shape,
        }
    }
}
