mod entity;
pub use entity::{DiscriminatorConfig, EntityId, EntityType};

mod navigation;
pub use navigation::{Navigation, NavigationKind};

mod property;
pub use property::{Property, PropertyId};

mod schema;
pub use schema::Schema;

mod strategy;
pub use strategy::MappingStrategy;
