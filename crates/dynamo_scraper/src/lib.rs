//! Dynamo Next Match — scraper stránky se zápasy HC Dynamo
//!
//! Tok: `PageFetcher` stáhne a dekóduje stránku, `MatchExtractor`
//! z ní vytáhne nejbližší zápas jako `Match`.

pub mod client;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod types;

pub use client::{build_client, ClientSettings};
pub use error::ScrapeError;
pub use extract::{clean_team_name, extract_next_match, parse_next_match, MatchExtractor};
pub use fetch::{read_saved_page, PageFetcher, SourceEncoding};
pub use types::Match;
