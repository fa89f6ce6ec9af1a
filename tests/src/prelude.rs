//! Common imports for test files
//!
//! `use tests::prelude::*;` brings in the harness, the shared models, and
//! the result assertions.

pub use crate::fixtures::{self, entity, prop};
pub use crate::{DbTest, SqlLog};
pub use crate::{models, tests};

pub use std_util::prelude::*;

pub use strata::{
    schema::app::MappingStrategy,
    stmt::{Expr, OrderByExpr, Value},
    CollectionAccess, Query, Record,
};
