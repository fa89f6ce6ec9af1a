/// How correlated collections are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Splitting {
    /// Collections are joined into the parent command and rows are regrouped
    /// on the client.
    #[default]
    Joined,

    /// Each collection is loaded by its own command, batched by parent key.
    Split,
}

impl Splitting {
    pub fn is_split(self) -> bool {
        matches!(self, Splitting::Split)
    }
}
