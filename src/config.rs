//! Konfigurace z prostředí (+ `.env`) a z příkazové řádky

use std::env;
use std::fmt;
use std::path::PathBuf;

use clap::Parser;
use dynamo_scraper::SourceEncoding;
use logger::{Level, LogSettings};
use zivyobraz_client::DEFAULT_ENDPOINT;

use crate::error::RunError;

pub const DEFAULT_SOURCE_URL: &str = "https://hcdynamo.cz/zapasy.asp";

pub const ENV_IMPORT_KEY: &str = "ZIVYOBRAZ_KEY";
pub const ENV_SKIP_PUBLISH: &str = "SKIP_ZIVYOBRAZ";
pub const ENV_LOG_LEVEL: &str = "SCRAPING_LOG_LEVEL";
pub const ENV_LOG_TO_FILE: &str = "SCRAPING_LOG_TO_FILE";
pub const ENV_SOURCE_URL: &str = "NEXT_MATCH_SOURCE_URL";
pub const ENV_PUBLISH_URL: &str = "ZIVYOBRAZ_URL";
pub const ENV_SOURCE_ENCODING: &str = "SCRAPING_SOURCE_ENCODING";
pub const ENV_STRICT_TLS: &str = "SCRAPING_STRICT_TLS";

#[derive(Parser, Debug, Default)]
#[command(
    name = "next-match",
    version,
    about = "Stáhne nejbližší zápas HC Dynamo a pošle ho do ZivyObraz.eu"
)]
pub struct Cli {
    /// Nepublikovat, jen vypsat nalezený zápas
    #[arg(long)]
    pub skip_publish: bool,

    /// URL stránky se zápasy (přebije NEXT_MATCH_SOURCE_URL)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Místo stahování číst uloženou stránku
    #[arg(long, value_name = "PATH", conflicts_with = "url")]
    pub html_file: Option<PathBuf>,

    /// Nebrat single-instance lock
    #[arg(long)]
    pub no_lock: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

#[derive(Clone)]
pub struct PublishTarget {
    pub endpoint:   String,
    pub import_key: String,
}

impl fmt::Debug for PublishTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishTarget")
            .field("endpoint", &self.endpoint)
            .field("import_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source:     Source,
    pub encoding:   SourceEncoding,
    /// `None` = publikace vypnutá
    pub publish:    Option<PublishTarget>,
    pub strict_tls: bool,
    pub lock:       bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn is_true(value: Option<String>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

/// Nastavení logování se čte zvlášť a dřív než zbytek konfigurace,
/// aby šla zalogovat i chyba konfigurace.
pub fn log_settings(lookup: impl Fn(&str) -> Option<String>) -> LogSettings {
    LogSettings {
        level:   Level::parse_lenient(&lookup(ENV_LOG_LEVEL).unwrap_or_default()),
        to_file: is_true(lookup(ENV_LOG_TO_FILE)),
    }
}

impl Config {
    pub fn from_env(cli: &Cli) -> Result<Self, RunError> {
        Self::from_lookup(cli, |key| env::var(key).ok())
    }

    pub fn from_lookup(cli: &Cli, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RunError> {
        let skip_publish = cli.skip_publish || non_empty(lookup(ENV_SKIP_PUBLISH)).is_some();

        let publish = if skip_publish {
            None
        } else {
            let import_key = non_empty(lookup(ENV_IMPORT_KEY)).ok_or_else(|| {
                RunError::Config(format!("The {ENV_IMPORT_KEY} variable is not set."))
            })?;
            Some(PublishTarget {
                endpoint: non_empty(lookup(ENV_PUBLISH_URL))
                    .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
                import_key,
            })
        };

        let encoding = match non_empty(lookup(ENV_SOURCE_ENCODING)) {
            Some(label) => SourceEncoding::from_label(&label).ok_or_else(|| {
                RunError::Config(format!("{ENV_SOURCE_ENCODING}: unknown encoding {label:?}"))
            })?,
            None => SourceEncoding::default(),
        };

        let source = match (&cli.html_file, &cli.url) {
            (Some(path), _) => Source::File(path.clone()),
            (None, Some(url)) => Source::Url(url.clone()),
            (None, None) => Source::Url(
                non_empty(lookup(ENV_SOURCE_URL)).unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
            ),
        };

        Ok(Self {
            source,
            encoding,
            publish,
            strict_tls: is_true(lookup(ENV_STRICT_TLS)),
            lock: !cli.no_lock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_key_is_config_error() {
        let err = Config::from_lookup(&Cli::default(), lookup(&[])).unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
        assert_eq!(err.to_string(), "The ZIVYOBRAZ_KEY variable is not set.");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let err = Config::from_lookup(&Cli::default(), lookup(&[(ENV_IMPORT_KEY, "  ")]));
        assert!(matches!(err, Err(RunError::Config(_))));
    }

    #[test]
    fn skip_variable_makes_key_optional() {
        let cfg = Config::from_lookup(&Cli::default(), lookup(&[(ENV_SKIP_PUBLISH, "1")])).unwrap();
        assert!(cfg.publish.is_none());
    }

    #[test]
    fn skip_flag_overrides_environment() {
        let cli = Cli { skip_publish: true, ..Cli::default() };
        let cfg = Config::from_lookup(&cli, lookup(&[(ENV_IMPORT_KEY, "k")])).unwrap();
        assert!(cfg.publish.is_none());
    }

    #[test]
    fn defaults_apply() {
        let cfg = Config::from_lookup(&Cli::default(), lookup(&[(ENV_IMPORT_KEY, "k")])).unwrap();
        assert_eq!(cfg.source, Source::Url(DEFAULT_SOURCE_URL.to_string()));
        assert_eq!(cfg.encoding, SourceEncoding::Utf8);
        assert!(!cfg.strict_tls);
        assert!(cfg.lock);

        let target = cfg.publish.unwrap();
        assert_eq!(target.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(target.import_key, "k");
    }

    #[test]
    fn environment_overrides_defaults() {
        let cfg = Config::from_lookup(
            &Cli::default(),
            lookup(&[
                (ENV_IMPORT_KEY, "k"),
                (ENV_SOURCE_URL, "https://example.test/zapasy"),
                (ENV_PUBLISH_URL, "https://example.test/import"),
                (ENV_SOURCE_ENCODING, "windows-1250"),
                (ENV_STRICT_TLS, "TRUE"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.source, Source::Url("https://example.test/zapasy".into()));
        assert_eq!(cfg.encoding, SourceEncoding::Windows1250);
        assert!(cfg.strict_tls);
        assert_eq!(cfg.publish.unwrap().endpoint, "https://example.test/import");
    }

    #[test]
    fn unknown_encoding_is_config_error() {
        let err = Config::from_lookup(
            &Cli::default(),
            lookup(&[(ENV_IMPORT_KEY, "k"), (ENV_SOURCE_ENCODING, "latin2")]),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
    }

    #[test]
    fn cli_source_wins_over_environment() {
        let cli = Cli {
            html_file: Some(PathBuf::from("page.html")),
            no_lock: true,
            ..Cli::default()
        };
        let cfg = Config::from_lookup(
            &cli,
            lookup(&[(ENV_IMPORT_KEY, "k"), (ENV_SOURCE_URL, "https://example.test")]),
        )
        .unwrap();
        assert_eq!(cfg.source, Source::File(PathBuf::from("page.html")));
        assert!(!cfg.lock);
    }

    #[test]
    fn debug_output_hides_import_key() {
        let cfg = Config::from_lookup(&Cli::default(), lookup(&[(ENV_IMPORT_KEY, "tajny-klic")]))
            .unwrap();
        assert!(!format!("{cfg:?}").contains("tajny-klic"));
    }

    #[test]
    fn log_settings_follow_environment() {
        let settings = log_settings(lookup(&[(ENV_LOG_LEVEL, "debug"), (ENV_LOG_TO_FILE, "True")]));
        assert_eq!(settings.level, Level::Debug);
        assert!(settings.to_file);

        let defaults = log_settings(lookup(&[]));
        assert_eq!(defaults.level, Level::Info);
        assert!(!defaults.to_file);
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from(["next-match", "--skip-publish", "--url", "https://x.test"]).unwrap();
        assert!(cli.skip_publish);
        assert_eq!(cli.url.as_deref(), Some("https://x.test"));

        assert!(Cli::try_parse_from(["next-match", "--url", "a", "--html-file", "b"]).is_err());
    }
}
