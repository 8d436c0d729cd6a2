use thiserror::Error;

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a name or ID";
pub const NOT_FOUND_MESSAGE: &str = "entity not found, check the name or ID and try again";
pub const FETCH_FAILED_MESSAGE: &str = "failed to fetch data, try again later";

/// Everything that can stop a search from producing a card.
///
/// The `Display` output carries diagnostic detail for logs. What the user
/// sees comes from [`LookupError::user_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("empty search input")]
    EmptyInput,

    #[error("remote entity not found")]
    NotFound,

    #[error("fetch failed: {0}")]
    FetchFailed(String),

    #[error("malformed response body: {0}")]
    ParseFailed(String),
}

impl LookupError {
    pub fn user_message(&self) -> &'static str {
        match self {
            LookupError::EmptyInput => EMPTY_INPUT_MESSAGE,
            LookupError::NotFound => NOT_FOUND_MESSAGE,
            LookupError::FetchFailed(_) | LookupError::ParseFailed(_) => FETCH_FAILED_MESSAGE,
        }
    }
}

pub type LookupResult<T> = Result<T, LookupError>;
