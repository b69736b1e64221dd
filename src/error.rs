// src/error.rs
use thiserror::Error;

/// Everything that can go wrong between fetching the calendar page and
/// having a full list of participants ready to render.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("malformed calendar markup: {0}")]
    Markup(String),

    #[error("could not decode items of user {user}: {source}")]
    Decode {
        user: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
