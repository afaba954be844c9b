/// Dynamo Next Match — Logger
/// Injektovaný log handle pro komponenty + nastavení tracing subscriberu

use anyhow::{anyhow, Result};
use std::fmt;
use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

/// Soubor, do kterého se zapisuje při `SCRAPING_LOG_TO_FILE=true`
pub const LOG_FILE: &str = "scraper.log";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    /// Hodnota ze `SCRAPING_LOG_LEVEL`. Prázdná = info, neznámá = fatal.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "" | "info" => Level::Info,
            "trace" => Level::Trace,
            "debug" => Level::Debug,
            "warn" | "warning" => Level::Warn,
            "error" => Level::Error,
            "fatal" | "panic" => Level::Fatal,
            _ => Level::Fatal,
        }
    }

    // tracing nemá fatal, nejblíž je error
    fn directive(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error | Level::Fatal => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        };
        f.write_str(name)
    }
}

/// Kam tečou log řádky. Produkce = tracing, testy = paměť.
pub trait LogSink: Send + Sync {
    fn log(&self, level: Level, message: &str);
}

pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::Trace => tracing::trace!("{message}"),
            Level::Debug => tracing::debug!("{message}"),
            Level::Info => tracing::info!("{message}"),
            Level::Warn => tracing::warn!("{message}"),
            Level::Error => tracing::error!("{message}"),
            Level::Fatal => tracing::error!(fatal = true, "{message}"),
        }
    }
}

/// Zachytává řádky pro asserty v testech
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.lines()
            .iter()
            .any(|(l, msg)| *l == level && msg.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: Level, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, message.to_string()));
        }
    }
}

/// Handle předávaný komponentám. Klonování jen zvedá refcount.
#[derive(Clone)]
pub struct Logger {
    sink:      Arc<dyn LogSink>,
    min_level: Level,
}

impl Logger {
    pub fn new(sink: Arc<dyn LogSink>, min_level: Level) -> Self {
        Self { sink, min_level }
    }

    pub fn tracing(min_level: Level) -> Self {
        Self::new(Arc::new(TracingSink), min_level)
    }

    /// Logger do paměti, vrací i sink pro čtení v testech
    pub fn memory() -> (Self, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (Self::new(sink.clone(), Level::Trace), sink)
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    pub fn log(&self, level: Level, message: impl AsRef<str>) {
        if self.enabled(level) {
            self.sink.log(level, message.as_ref());
        }
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(Level::Error, message);
    }

    pub fn fatal(&self, message: impl AsRef<str>) {
        self.log(Level::Fatal, message);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LogSettings {
    pub level:   Level,
    pub to_file: bool,
}

impl LogSettings {
    /// Minimální level pro `Logger`. Když je nastavený `RUST_LOG`, filtruje
    /// jen tracing subscriber a `Logger` pouští všechno dál.
    pub fn component_level(&self, rust_log: Option<&str>) -> Level {
        match rust_log.map(str::trim) {
            Some(directives) if !directives.is_empty() => Level::Trace,
            _ => self.level,
        }
    }
}

/// Nainstaluje globální tracing subscriber.
///
/// `RUST_LOG` má přednost před `level`; `Logger` pro komponenty je třeba
/// postavit s `LogSettings::component_level`, jinak by řádky odfiltroval dřív.
/// Vrácený guard musí žít do konce procesu, jinak se ztratí poslední řádky ze souboru.
pub fn init_tracing(settings: &LogSettings) -> Result<Option<WorkerGuard>> {
    let filter = || {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(settings.level.directive()))
    };
    let timer = || ChronoLocal::new(TIMESTAMP_FORMAT.to_string());

    if settings.to_file {
        match OpenOptions::new().create(true).append(true).open(LOG_FILE) {
            Ok(file) => {
                let (writer, guard) = tracing_appender::non_blocking(file);
                tracing_subscriber::fmt()
                    .with_env_filter(filter())
                    .with_timer(timer())
                    .with_ansi(false)
                    .with_writer(writer)
                    .try_init()
                    .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;
                return Ok(Some(guard));
            }
            Err(e) => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter())
                    .with_timer(timer())
                    .with_writer(std::io::stderr)
                    .try_init()
                    .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;
                tracing::info!("Failed to log to file ({e}), using default stderr");
                return Ok(None);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_timer(timer())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;
    Ok(None)
}
