use super::Error;

/// Error when a predicate or projection cannot be expressed in SQL at all.
#[derive(Debug)]
pub(super) struct TranslationFailure {
    message: Box<str>,
}

impl std::error::Error for TranslationFailure {}

impl core::fmt::Display for TranslationFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "could not translate query: {}", self.message)
    }
}

impl Error {
    /// Creates a translation failure.
    pub fn translation_failure(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::TranslationFailure(TranslationFailure {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a translation failure.
    pub fn is_translation_failure(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TranslationFailure(_))
    }
}
