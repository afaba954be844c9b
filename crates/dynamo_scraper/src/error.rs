use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("requesting {url} failed, got errorcode: {}", status.as_u16())]
    Status { url: String, status: StatusCode },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("page is not valid {encoding}")]
    Encoding { encoding: &'static str },

    #[error("{0}")]
    Extraction(String),
}

impl ScrapeError {
    /// Jméno třídy chyby, jak se objevuje v logu
    pub fn kind(&self) -> &'static str {
        match self {
            ScrapeError::Client(_)
            | ScrapeError::Fetch { .. }
            | ScrapeError::Status { .. }
            | ScrapeError::Io { .. } => "FetchError",
            ScrapeError::Encoding { .. } => "EncodingError",
            ScrapeError::Extraction(_) => "ExtractionError",
        }
    }

    pub(crate) fn extraction(msg: impl Into<String>) -> Self {
        ScrapeError::Extraction(msg.into())
    }
}
