mod capability;
pub use capability::{Capability, SqlDialect};

mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::{async_trait, schema::db::Schema};

use std::fmt::Debug;

/// Executes rendered SQL against a database.
///
/// The engine owns planning and rendering. A driver only owns the
/// connection: it creates the resolved tables and runs commands.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Describes the driver's capability, which selects the SQL flavor the
    /// engine renders.
    fn capability(&self) -> &Capability;

    /// Register the schema with the driver.
    async fn register_schema(&mut self, schema: &Schema) -> crate::Result<()>;

    /// Execute a database operation
    async fn exec(&self, op: Operation) -> crate::Result<Response>;
}
