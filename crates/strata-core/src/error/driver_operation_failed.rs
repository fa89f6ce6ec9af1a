use super::{Error, ErrorKind};

use std::{error::Error as StdError, fmt};

/// A command failed inside the driver: the connection, the statement or the
/// database itself rejected it.
///
/// The query that issued the command is aborted; no partial results are
/// returned.
#[derive(Debug)]
pub(super) struct DriverOperationFailed {
    pub(super) inner: Box<dyn StdError + Send + Sync>,
}

impl StdError for DriverOperationFailed {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl fmt::Display for DriverOperationFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)?;

        let causes = std::iter::successors(self.inner.source(), |&err| err.source());
        for cause in causes {
            write!(f, ": {cause}")?;
        }

        Ok(())
    }
}

impl Error {
    /// Wraps an error raised by a driver.
    pub fn driver_operation_failed(err: impl StdError + Send + Sync + 'static) -> Error {
        Error::from(ErrorKind::DriverOperationFailed(DriverOperationFailed {
            inner: Box::new(err),
        }))
    }

    pub fn is_driver_operation_failed(&self) -> bool {
        matches!(self.kind(), ErrorKind::DriverOperationFailed(_))
    }
}
