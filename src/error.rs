use dynamo_scraper::ScrapeError;
use thiserror::Error;
use zivyobraz_client::PublishError;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("{0}")]
    Config(String),

    #[error("failed to open lock file {path}: {source}")]
    Lock {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl RunError {
    pub fn kind(&self) -> &'static str {
        match self {
            RunError::Config(_) | RunError::Lock { .. } => "ConfigError",
            RunError::Scrape(e) => e.kind(),
            RunError::Publish(e) => e.kind(),
        }
    }
}
