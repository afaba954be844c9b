use std::time::Duration;

use crate::error::ScrapeError;

pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, Default)]
pub struct ClientSettings {
    /// Zdrojový web historicky běžel s neověřitelným certifikátem,
    /// proto je ověřování defaultně vypnuté.
    pub strict_tls: bool,
}

/// Jeden klient pro stažení stránky i pro publikaci (sdílí cookie jar)
pub fn build_client(settings: &ClientSettings) -> Result<reqwest::Client, ScrapeError> {
    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(REQUEST_TIMEOUT)
        .gzip(true)
        .user_agent(USER_AGENT)
        .danger_accept_invalid_certs(!settings.strict_tls)
        .build()
        .map_err(ScrapeError::Client)
}
