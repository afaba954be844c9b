use chrono::{DateTime, Local, NaiveDateTime};
use serde::Serialize;

/// Nejbližší zápas tak, jak ho ukazuje stránka klubu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub home_team:       String,
    pub away_team:       String,
    /// Lokalizovaný text z `<time>`, např. "15.1. 18:00"
    pub date_and_time:   String,
    /// Hodnota atributu `datetime`, pokud ji stránka uvádí
    pub date_time_stamp: Option<String>,
    pub round:           String,
    pub competition:     String,
}

impl Match {
    /// "<domácí> - <hosté>"
    pub fn teams_full_string(&self) -> String {
        format!("{} - {}", self.home_team, self.away_team)
    }

    /// Začátek zápasu v lokálním čase, pokud jde `datetime` přečíst
    pub fn kickoff(&self) -> Option<NaiveDateTime> {
        let raw = self.date_time_stamp.as_deref()?.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Local).naive_local());
        }

        ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    }
}
