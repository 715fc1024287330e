use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};

use crate::resolver::SessionResolver;
use crate::types::{GrandPrixEvent, SessionLabel, SessionTimes};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to parse date: {0}")]
    DateParse(String),
    #[error("Missing required field: {0}")]
    MissingField(String),
}

const MONTH_ABBREVS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Parses the calendar listing page into one event per card.
///
/// Cards that miss a city, a date range, or published session times still
/// produce an event with the corresponding fields empty. The page mixes
/// announced and fully scheduled rounds, so partial cards are expected.
pub fn parse_calendar(html: &str, season: i32) -> Result<Vec<GrandPrixEvent>, ParseError> {
    let document = Html::parse_document(html);
    let card_selector = Selector::parse(".calendar-listing__event-container").unwrap();

    let resolver = SessionResolver::default();
    let mut events = Vec::new();

    for (i, card) in document.select(&card_selector).enumerate() {
        let round = (i + 1) as u32;
        events.push(parse_event_card(card, round, season, &resolver));
    }

    if events.is_empty() {
        log::warn!("No event cards found in calendar page");
    }

    Ok(events)
}

fn parse_event_card(
    card: ElementRef,
    round: u32,
    season: i32,
    resolver: &SessionResolver,
) -> GrandPrixEvent {
    let lines: Vec<String> = card
        .text()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    let raw_text = lines.join("\n");

    // A date-range line is itself all-uppercase, so the date check must win
    // before a line is considered as a city name.
    let mut dates: Option<String> = None;
    let mut city: Option<String> = None;
    for line in &lines {
        let upper = line.to_uppercase();
        if MONTH_ABBREVS.iter().any(|m| upper.contains(m)) {
            if dates.is_none() {
                dates = Some(line.clone());
            }
        } else if city.is_none()
            && line.len() > 3
            && line.chars().any(char::is_alphabetic)
            && *line == upper
            && !line.contains("GRAND PRIX")
        {
            city = Some(line.clone());
        }
    }

    let anchor = match &dates {
        Some(range) => match parse_anchor_date(range, season) {
            Ok(date) => Some(date),
            Err(e) => {
                log::warn!("Round {}: unusable date range '{}': {}", round, range, e);
                None
            }
        },
        None => None,
    };

    let mut sessions = SessionTimes::default();
    if raw_text.to_lowercase().contains("session times") {
        for label in SessionLabel::ALL {
            sessions.set(label, resolver.resolve(label.search_text(), &raw_text, anchor));
        }
    } else {
        log::debug!("Round {}: no session times published yet", round);
    }

    GrandPrixEvent {
        round,
        city,
        dates,
        anchor,
        sessions,
    }
}

/// Extracts the closing day of a printed date range like `27 FEB - 01 MAR`
/// as an absolute date in the given season.
///
/// The closing day is the race Sunday, which anchors all weekday offsets.
/// Single-day ranges (no dash) are taken as-is.
fn parse_anchor_date(range: &str, season: i32) -> Result<NaiveDate, ParseError> {
    let closing = range
        .rsplit('-')
        .next()
        .ok_or_else(|| ParseError::MissingField("date range".to_string()))?
        .trim();

    let mut parts = closing.split_whitespace();
    let day = parts
        .next()
        .ok_or_else(|| ParseError::DateParse(format!("Empty closing date in '{}'", range)))?;
    let month = parts
        .next()
        .ok_or_else(|| ParseError::DateParse(format!("No month in '{}'", closing)))?;

    let day: u32 = day
        .parse()
        .map_err(|_| ParseError::DateParse(format!("Invalid day: {}", day)))?;
    let month = parse_month_abbrev(month)?;

    NaiveDate::from_ymd_opt(season, month, day).ok_or_else(|| {
        ParseError::DateParse(format!("Invalid date: {}-{}-{}", season, month, day))
    })
}

fn parse_month_abbrev(month: &str) -> Result<u32, ParseError> {
    let upper = month.to_uppercase();
    MONTH_ABBREVS
        .iter()
        .position(|m| upper.starts_with(m))
        .map(|i| (i + 1) as u32)
        .ok_or_else(|| ParseError::DateParse(format!("Unknown month: {}", month)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(inner: &str) -> String {
        format!(
            r#"<div class="calendar-listing">
                <div class="calendar-listing__event-container">{}</div>
            </div>"#,
            inner
        )
    }

    #[test]
    fn test_parse_full_event_card() {
        let html = card(
            r#"
            <span>02</span>
            <span>27 FEB - 01 MAR</span>
            <span>THAILAND</span>
            <span>PT Grand Prix of Thailand</span>
            <span>Session Times</span>
            <p>FRI / 09:00 Free Practice Nr. 1</p>
            <p>FRI / 13:25 Practice</p>
            <p>SAT / 08:40 Free Practice Nr. 2</p>
            <p>SAT / 09:50 Qualifying Nr. 1</p>
            <p>SAT / 10:15 Qualifying Nr. 2</p>
            <p>SAT / 15:00 Tissot Sprint</p>
            <p>SUN / 09:40 Warm Up</p>
            <p>SUN / 13:30 Grand Prix</p>
            "#,
        );

        let events = parse_calendar(&html, 2026).expect("should parse");
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.round, 1);
        assert_eq!(event.city.as_deref(), Some("THAILAND"));
        assert_eq!(event.dates.as_deref(), Some("27 FEB - 01 MAR"));
        assert_eq!(event.anchor, NaiveDate::from_ymd_opt(2026, 3, 1));

        assert_eq!(event.sessions.resolved_count(), 8);
        assert_eq!(
            event.sessions.fp1.as_ref().unwrap().to_string(),
            "27 Feb FRI / 09:00"
        );
        assert_eq!(
            event.sessions.sprint.as_ref().unwrap().to_string(),
            "28 Feb SAT / 15:00"
        );
        assert_eq!(
            event.sessions.race.as_ref().unwrap().to_string(),
            "01 Mar SUN / 13:30"
        );
    }

    #[test]
    fn test_card_without_session_times_block() {
        let html = card(
            r#"
            <span>14 JUN - 15 JUN</span>
            <span>ITALY</span>
            <p>SUN / 14:00 Grand Prix</p>
            "#,
        );

        let events = parse_calendar(&html, 2026).expect("should parse");
        assert_eq!(events.len(), 1);

        // Times are only trusted once the page marks them published.
        assert_eq!(events[0].sessions.resolved_count(), 0);
        assert_eq!(events[0].anchor, NaiveDate::from_ymd_opt(2026, 6, 15));
    }

    #[test]
    fn test_card_with_unparsable_dates_keeps_event() {
        let html = card(
            r#"
            <span>?? FEB - ?? MAR</span>
            <span>QATAR</span>
            <span>Session Times</span>
            <p>SUN / 17:00 Grand Prix</p>
            "#,
        );

        let events = parse_calendar(&html, 2026).expect("should parse");
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.city.as_deref(), Some("QATAR"));
        assert_eq!(event.anchor, None);
        // No anchor, so nothing can be placed on the calendar.
        assert_eq!(event.sessions.resolved_count(), 0);
    }

    #[test]
    fn test_city_heuristic_skips_grand_prix_title() {
        let html = card(
            r#"
            <span>20 MAR - 22 MAR</span>
            <span>GRAND PRIX OF THE AMERICAS</span>
            <span>AUSTIN</span>
            "#,
        );

        let events = parse_calendar(&html, 2026).expect("should parse");
        assert_eq!(events[0].city.as_deref(), Some("AUSTIN"));
    }

    #[test]
    fn test_multiple_cards_numbered_in_order() {
        let html = r#"
            <div class="calendar-listing__event-container"><span>27 FEB - 01 MAR</span><span>THAILAND</span></div>
            <div class="calendar-listing__event-container"><span>13 MAR - 15 MAR</span><span>ARGENTINA</span></div>
            <div class="calendar-listing__event-container"><span>27 MAR - 29 MAR</span><span>AMERICAS</span></div>
        "#;

        let events = parse_calendar(html, 2026).expect("should parse");
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].round, 1);
        assert_eq!(events[1].round, 2);
        assert_eq!(events[2].round, 3);
        assert_eq!(events[1].city.as_deref(), Some("ARGENTINA"));
    }

    #[test]
    fn test_empty_page_yields_no_events() {
        let events = parse_calendar("<html><body></body></html>", 2026).expect("should parse");
        assert!(events.is_empty());
    }

    #[test]
    fn test_parse_anchor_date_single_day_range() {
        assert_eq!(
            parse_anchor_date("09 NOV", 2026).unwrap(),
            NaiveDate::from_ymd_opt(2026, 11, 9).unwrap()
        );
    }

    #[test]
    fn test_parse_anchor_date_rejects_unknown_month() {
        assert!(parse_anchor_date("01 XXX", 2026).is_err());
    }

    #[test]
    fn test_parse_month_abbrev_case_insensitive() {
        assert_eq!(parse_month_abbrev("Mar").unwrap(), 3);
        assert_eq!(parse_month_abbrev("SEP").unwrap(), 9);
        // Full names share the three-letter prefix.
        assert_eq!(parse_month_abbrev("March").unwrap(), 3);
    }
}
