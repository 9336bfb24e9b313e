use reqwest::StatusCode;

/// Errors produced while fetching and parsing results-site pages.
///
/// Malformed fields are deliberately not represented here: a numeric cell
/// that fails to parse coerces to a default and the row is kept. Only
/// whole-page failures reach callers.
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    /// Network-level failure (DNS, TLS, timeout, connection reset).
    #[error("request failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-success status.
    #[error("unexpected status {status} for {url}")]
    Status { url: String, status: StatusCode },

    /// The page fetched fine but zero structured rows came out of it.
    /// For standings this must never overwrite a stored snapshot.
    #[error("page yielded no {what} rows")]
    EmptyParse { what: &'static str },
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
