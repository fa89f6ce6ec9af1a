use super::{ColumnId, TableId};

/// A foreign key constraint, `columns` referencing `references_columns` of
/// the `references` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub columns: Vec<ColumnId>,
    pub references: TableId,
    pub references_columns: Vec<ColumnId>,
}
