use dynamo_scraper::{extract_next_match, read_saved_page, Match, SourceEncoding};
use std::path::Path;

const FIXTURE: &str = include_str!("fixtures/zapasy.html");

#[test]
fn frozen_page_yields_the_soonest_match() {
    let m = extract_next_match(FIXTURE).unwrap();
    assert_eq!(
        m,
        Match {
            home_team:       "HC Dynamo Pardubice".into(),
            away_team:       "HC Sparta Praha".into(),
            date_and_time:   "Po 15.1. 18:00".into(),
            date_time_stamp: Some("2024-01-15T18:00".into()),
            round:           "Kolo 5".into(),
            competition:     "Extraliga".into(),
        }
    );
    assert_eq!(m.teams_full_string(), "HC Dynamo Pardubice - HC Sparta Praha");
}

#[test]
fn saved_page_reads_from_disk() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/zapasy.html");
    let html = read_saved_page(&path, SourceEncoding::Utf8).unwrap();
    assert_eq!(extract_next_match(&html).unwrap().round, "Kolo 5");
}

#[test]
fn redesigned_page_without_landmark_fails() {
    let redesigned = FIXTURE.replace(r#"aria-label="Nejbližší zápas""#, r#"class="upcoming""#);
    let err = extract_next_match(&redesigned).unwrap_err();
    assert_eq!(err.kind(), "ExtractionError");
}
