use thiserror::Error;

/// Failure of a single data-source call, classified by where it broke.
/// Each pipeline reports its own `SourceError`; none of them is fatal to
/// the application and no call is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The request could not be sent or the transport gave up.
    #[error("could not reach {endpoint}: {detail}")]
    Network { endpoint: &'static str, detail: String },

    /// The server answered with a non-success status or a payload that
    /// did not parse.
    #[error("{endpoint} returned an unusable response: {detail}")]
    Server { endpoint: &'static str, detail: String },
}

impl SourceError {
    pub fn network(endpoint: &'static str, err: &reqwest::Error) -> Self {
        Self::Network { endpoint, detail: err.to_string() }
    }

    pub fn server(endpoint: &'static str, detail: impl Into<String>) -> Self {
        Self::Server { endpoint, detail: detail.into() }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Network { endpoint, .. } | Self::Server { endpoint, .. } => endpoint,
        }
    }
}

/// Input problems caught before any network activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please enter a city")]
    EmptyCity,

    #[error("please fill in your review text")]
    EmptyReviewText,

    #[error("rating must be a whole number")]
    InvalidRating,
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Error bodies are arbitrary bytes from the server; never cut a
    // multibyte character in half.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
