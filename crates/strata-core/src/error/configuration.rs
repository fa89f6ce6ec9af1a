use super::Error;

/// Error when the model configuration is invalid or contradictory.
///
/// This occurs when:
/// - A type hierarchy is malformed (unknown parent, cycle, keys declared below the root)
/// - Two concrete types share a discriminator value
/// - A table name cannot be synthesized, or two types resolve to the same table
/// - A relationship's principal is an abstract type mapped table-per-concrete-type
///
/// These errors are raised while the schema is built. No query can run against
/// a model that failed to build.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    message: Box<str>,
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid model configuration: {}", self.message)
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Configuration(_))
    }
}
