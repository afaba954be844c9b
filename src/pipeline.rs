//! Fetch → extrakce → publikace, striktně za sebou

use dynamo_scraper::{read_saved_page, Match, MatchExtractor, PageFetcher};
use logger::Logger;
use zivyobraz_client::ZivyObrazPublisher;

use crate::config::{Config, Source};
use crate::error::RunError;

/// Jeden běh. Chyby se jen propagují, o ukončení procesu rozhoduje `main`.
pub async fn run(config: &Config, client: reqwest::Client, log: &Logger) -> Result<Match, RunError> {
    let html = match &config.source {
        Source::Url(url) => {
            PageFetcher::new(client.clone(), log.clone(), config.encoding)
                .fetch(url)
                .await?
        }
        Source::File(path) => {
            log.info(format!("Reading saved page {}", path.display()));
            read_saved_page(path, config.encoding)?
        }
    };

    let next = MatchExtractor::new(log.clone()).extract(&html)?;

    log.info(format!(
        "Home team: {}, Away team: {}, DateAndTime: {}, Round: {}, Competition: {}",
        next.home_team, next.away_team, next.date_and_time, next.round, next.competition
    ));
    if let Some(kickoff) = next.kickoff() {
        log.debug(format!("Kickoff {}", kickoff.format("%Y-%m-%d %H:%M")));
    }

    match &config.publish {
        Some(target) => {
            log.info("Publishing to zivyobraz");
            ZivyObrazPublisher::new(client, log.clone(), &target.endpoint, &target.import_key)
                .publish(&next)
                .await?;
        }
        None => log.info("Publishing is skipped, not sending anything to zivyobraz.eu"),
    }

    log.info("Done!");
    Ok(next)
}
