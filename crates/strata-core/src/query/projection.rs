use crate::schema::app::PropertyId;

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Every property of each row's dynamic type
    Entity,

    /// The listed properties only
    Properties(Vec<PropertyId>),
}

impl Projection {
    pub fn is_entity(&self) -> bool {
        matches!(self, Projection::Entity)
    }
}
