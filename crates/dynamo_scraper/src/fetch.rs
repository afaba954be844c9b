use std::fmt;
use std::path::Path;

use logger::Logger;
use reqwest::StatusCode;

use crate::error::ScrapeError;

/// Kódování, ve kterém zdrojový web posílá HTML.
///
/// Je to vlastnost webu, ne odpovědi: starý ASP web posílal windows-1250,
/// současný posílá rovnou UTF-8. Podle hlaviček se nic nedetekuje.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceEncoding {
    #[default]
    Utf8,
    Windows1250,
}

impl SourceEncoding {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "utf-8" | "utf8" => Some(SourceEncoding::Utf8),
            "windows-1250" | "windows1250" | "cp1250" => Some(SourceEncoding::Windows1250),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "UTF-8",
            SourceEncoding::Windows1250 => "windows-1250",
        }
    }

    /// Převede tělo odpovědi na UTF-8 text. UTF-8 vstup se jen ověří.
    pub fn decode(self, bytes: Vec<u8>) -> Result<String, ScrapeError> {
        let encoding = self.name();
        match self {
            SourceEncoding::Utf8 => {
                String::from_utf8(bytes).map_err(|_| ScrapeError::Encoding { encoding })
            }
            SourceEncoding::Windows1250 => encoding_rs::WINDOWS_1250
                .decode_without_bom_handling_and_without_replacement(&bytes)
                .map(|text| text.into_owned())
                .ok_or(ScrapeError::Encoding { encoding }),
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub struct PageFetcher {
    client:   reqwest::Client,
    logger:   Logger,
    encoding: SourceEncoding,
}

impl PageFetcher {
    pub fn new(client: reqwest::Client, logger: Logger, encoding: SourceEncoding) -> Self {
        Self { client, logger, encoding }
    }

    /// Stáhne stránku se zápasy a vrátí ji jako UTF-8 text.
    ///
    /// Cokoliv jiného než 200 je chyba: chybová stránka by se jinak
    /// poslala do extraktoru a selhala by tam s matoucí hláškou.
    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        self.logger.debug(format!("Requesting {url}"));

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Fetch { url: url.to_string(), source })?;

        let status = resp.status();
        if status != StatusCode::OK {
            self.logger.error(format!(
                "Requesting the page failed, got errorcode: {}",
                status.as_u16()
            ));
            return Err(ScrapeError::Status { url: url.to_string(), status });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|source| ScrapeError::Fetch { url: url.to_string(), source })?;

        self.logger.debug(format!(
            "Got the page ({} bytes), decoding from {}",
            body.len(),
            self.encoding
        ));
        self.encoding.decode(body.to_vec())
    }
}

/// Načte dříve uloženou stránku z disku (offline běh, ladění selektorů)
pub fn read_saved_page(path: &Path, encoding: SourceEncoding) -> Result<String, ScrapeError> {
    let bytes = std::fs::read(path).map_err(|source| ScrapeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    encoding.decode(bytes)
}
