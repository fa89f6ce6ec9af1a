mod normalize;
pub use normalize::normalize;

pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};
