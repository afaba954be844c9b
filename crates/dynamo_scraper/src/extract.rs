//! Extrakce nejbližšího zápasu z HTML stránky /zapasy
//!
//! Struktura současného webu:
//! <section aria-label="Nejbližší zápas">
//!   <ul>
//!     <li>
//!       <div> <span>Kolo 5</span> <span>Extraliga</span> </div>
//!       <time datetime="2024-01-15T18:00">15.1. 18:00</time>
//!       <img alt="Logo HC Dynamo"> ... <img alt="Logo HC Sparta">
//!     </li>
//!   </ul>
//! </section>

use logger::Logger;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScrapeError;
use crate::types::Match;

/// Labely sekce "nejbližší zápas" (česká a anglická verze webu)
pub const NEXT_MATCH_LABELS: [&str; 2] = ["Nejbližší zápas", "Next match"];

const LOGO_PREFIX: &str = "Logo ";

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::extraction(format!("invalid selector {css}: {e:?}")))
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Jméno týmu z alt textu loga: "Logo HC Dynamo" → "HC Dynamo"
pub fn clean_team_name(alt: &str) -> String {
    let trimmed = alt.trim();
    trimmed.strip_prefix(LOGO_PREFIX).unwrap_or(trimmed).trim().to_string()
}

/// Parsuje HTML a vytáhne nejbližší zápas
pub fn extract_next_match(html: &str) -> Result<Match, ScrapeError> {
    let document = Html::parse_document(html);
    parse_next_match(&document)
}

/// Čistá funkce nad už naparsovaným dokumentem
pub fn parse_next_match(document: &Html) -> Result<Match, ScrapeError> {
    let section_css = NEXT_MATCH_LABELS
        .iter()
        .map(|label| format!("section[aria-label=\"{label}\"]"))
        .collect::<Vec<_>>()
        .join(", ");
    let section_selector = selector(&section_css)?;
    let item_selector = selector("li")?;
    let span_selector = selector("span")?;
    let time_selector = selector("time")?;
    let logo_selector = selector("img[alt]")?;

    let section = document
        .select(&section_selector)
        .next()
        .ok_or_else(|| ScrapeError::extraction("match section not found"))?;

    let item = section
        .select(&item_selector)
        .next()
        .ok_or_else(|| ScrapeError::extraction("no match found"))?;

    // Kolo a soutěž = první dva spany v prvním kontejneru položky
    let labels: Vec<String> = item
        .children()
        .filter_map(ElementRef::wrap)
        .next()
        .map(|container| container.select(&span_selector).take(2).map(element_text).collect())
        .unwrap_or_default();
    let mut labels = labels.into_iter();
    let round = labels.next().unwrap_or_default();
    let competition = labels.next().unwrap_or_default();

    let time = item.select(&time_selector).next();
    let date_and_time = time.map(element_text).unwrap_or_default();
    let date_time_stamp = time
        .and_then(|t| t.value().attr("datetime"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let teams: Vec<String> = item
        .select(&logo_selector)
        .filter_map(|img| img.value().attr("alt"))
        .map(clean_team_name)
        .filter(|name| !name.is_empty())
        .collect();

    let mut names = teams.into_iter();
    let (Some(home_team), Some(away_team)) = (names.next(), names.next()) else {
        return Err(ScrapeError::extraction("fewer than two team names"));
    };

    Ok(Match {
        home_team,
        away_team,
        date_and_time,
        date_time_stamp,
        round,
        competition,
    })
}

/// Extraktor s logováním; samotná logika je v `parse_next_match`
pub struct MatchExtractor {
    logger: Logger,
}

impl MatchExtractor {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn extract(&self, html: &str) -> Result<Match, ScrapeError> {
        self.logger.debug("Got the page for parsing, converting to parsable document");
        let m = extract_next_match(html)?;

        if m.round.is_empty() || m.competition.is_empty() {
            self.logger.warn("Round or competition label missing in next match item");
        }
        if m.date_and_time.is_empty() {
            self.logger.warn("Time element missing in next match item");
        }
        if m.date_time_stamp.is_none() {
            self.logger.debug("Time element has no datetime attribute");
        }
        if let Ok(json) = serde_json::to_string(&m) {
            self.logger.debug(format!("Extracted match: {json}"));
        }

        Ok(m)
    }
}
