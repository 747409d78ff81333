/// Reason used when upstream gave no usable status text
pub const GENERIC_REASON: &str = "Internal Server Error";

/// Failure to fetch (or decode) a PokeAPI resource
///
/// Not-found, server errors and transport errors are only told apart by
/// `reason`; `status` is kept for diagnostics.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[error("Error fetching data: {reason}")]
pub struct FetchError {
    pub reason: String,
    pub status: Option<u16>,
}

impl FetchError {
    /// Upstream answered with a non-success status
    pub fn status(code: u16, reason: Option<&str>) -> Self {
        Self {
            reason: reason.unwrap_or(GENERIC_REASON).to_string(),
            status: Some(code),
        }
    }

    /// No response at all
    pub fn network() -> Self {
        Self {
            reason: GENERIC_REASON.to_string(),
            status: None,
        }
    }

    /// Response body did not have the expected shape
    pub fn malformed(url: &str, err: impl std::fmt::Display) -> Self {
        Self {
            reason: format!("Unexpected response from {url}: {err}"),
            status: None,
        }
    }
}
