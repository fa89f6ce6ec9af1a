use super::Error;

/// Error when rows loaded for a collection cannot be safely regrouped under
/// their parent.
///
/// Raised while planning when a parent or child projection does not carry a
/// key able to identify its rows, for example after a `DISTINCT` that drops
/// the key or a grouping that does not project the group key.
#[derive(Debug)]
pub(super) struct InsufficientKeyInformation {
    collection: Box<str>,
    detail: Box<str>,
}

impl std::error::Error for InsufficientKeyInformation {}

impl core::fmt::Display for InsufficientKeyInformation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "insufficient key information for collection `{}`: {}",
            self.collection, self.detail
        )
    }
}

impl Error {
    /// Creates an insufficient key information error for the named
    /// collection join (for example `Customer.Orders`).
    pub fn insufficient_key_information(
        collection: impl Into<String>,
        detail: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::InsufficientKeyInformation(
            InsufficientKeyInformation {
                collection: collection.into().into(),
                detail: detail.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an insufficient key information error.
    pub fn is_insufficient_key_information(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InsufficientKeyInformation(_))
    }
}
