//! Dynamo Next Match — publikace nejbližšího zápasu do ZivyObraz.eu
//!
//! Import probíhá jedním GET požadavkem, hodnoty jsou v query stringu:
//! https://in.zivyobraz.eu/?import_key=...&next_match_home_team=...

use dynamo_scraper::Match;
use logger::Logger;
use reqwest::StatusCode;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://in.zivyobraz.eu";

/// URL s query stringem obsahuje import key, do chyby se proto nedává
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("request to publish endpoint {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Publishing to zivyobraz failed, got errorcode: {}", status.as_u16())]
    Status { status: StatusCode },
}

impl PublishError {
    pub fn kind(&self) -> &'static str {
        "PublishError"
    }
}

/// Query parametry importu v pořadí, v jakém jdou do URL
pub fn query_params(import_key: &str, m: &Match) -> Vec<(&'static str, String)> {
    vec![
        ("import_key", import_key.to_string()),
        ("next_match_home_team", m.home_team.clone()),
        ("next_match_away_team", m.away_team.clone()),
        ("next_match_teams_full_string", m.teams_full_string()),
        ("next_match_date_time", m.date_and_time.clone()),
        ("next_match_round", m.round.clone()),
        ("next_match_competition", m.competition.clone()),
    ]
}

pub struct ZivyObrazPublisher {
    client:     reqwest::Client,
    logger:     Logger,
    endpoint:   String,
    import_key: String,
}

impl ZivyObrazPublisher {
    pub fn new(
        client:     reqwest::Client,
        logger:     Logger,
        endpoint:   impl Into<String>,
        import_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            logger,
            endpoint: endpoint.into(),
            import_key: import_key.into(),
        }
    }

    /// Sestaví importní požadavek, ale neodešle ho
    pub fn publish_request(&self, m: &Match) -> Result<reqwest::Request, PublishError> {
        self.client
            .get(&self.endpoint)
            .query(&query_params(&self.import_key, m))
            .build()
            .map_err(|source| PublishError::Request {
                endpoint: self.endpoint.clone(),
                source: source.without_url(),
            })
    }

    /// Odešle zápas. Jediný úspěch je HTTP 200, nic se neopakuje.
    pub async fn publish(&self, m: &Match) -> Result<(), PublishError> {
        let request = self.publish_request(m)?;
        self.logger.debug(format!(
            "Publishing {} to {}",
            m.teams_full_string(),
            self.endpoint
        ));

        let resp = self
            .client
            .execute(request)
            .await
            .map_err(|source| PublishError::Request {
                endpoint: self.endpoint.clone(),
                source: source.without_url(),
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(PublishError::Status { status });
        }

        self.logger.info(format!("Published to zivyobraz ({})", status.as_u16()));
        Ok(())
    }
}
