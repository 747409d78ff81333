use crate::error::FetchError;

/// What an aggregator does when one of its fetches fails
///
/// Each aggregator declares its own policy; they are not meant to agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the error and hand it to the caller
    Propagate,
    /// Log the error and return an empty result; partial progress is dropped
    SuppressToEmpty,
}

impl FailurePolicy {
    pub fn settle<T: Default>(
        self,
        operation: &str,
        result: Result<T, FetchError>,
    ) -> Result<T, FetchError> {
        let err = match result {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        match self {
            FailurePolicy::Propagate => {
                log::error!("Error {operation}: {}", err.reason);
                Err(err)
            }
            FailurePolicy::SuppressToEmpty => {
                log::error!("Error {operation}, returning an empty result: {}", err.reason);
                Ok(T::default())
            }
        }
    }
}
