use serde::Deserialize;
use std::fmt;

/// How a type hierarchy maps onto tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingStrategy {
    /// Table-per-hierarchy: one shared table with a discriminator column.
    #[default]
    Tph,

    /// Table-per-type: one table per type holding its declared columns,
    /// joined to ancestor tables on the primary key.
    Tpt,

    /// Table-per-concrete-type: one table per concrete type holding the full
    /// flattened column set.
    Tpc,
}

impl fmt::Display for MappingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MappingStrategy::Tph => "TPH",
            MappingStrategy::Tpt => "TPT",
            MappingStrategy::Tpc => "TPC",
        })
    }
}
