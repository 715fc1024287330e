use crate::parser::{ParseError, parse_calendar};
use crate::types::GrandPrixEvent;

use reqwest::Client;
use std::time::Duration;

// The calendar page serves default client user agents a block page.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
}

#[derive(Debug, Clone)]
pub struct CalendarScraper {
    client: Client,
    calendar_url: String,
}

impl CalendarScraper {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            calendar_url: crate::CALENDAR_URL.to_string(),
        })
    }

    /// Fetches the calendar listing page and parses it into events for the
    /// given season year.
    pub async fn fetch_calendar(&self, season: i32) -> Result<Vec<GrandPrixEvent>, ScraperError> {
        log::info!("Fetching calendar from {}...", self.calendar_url);

        let html = self
            .client
            .get(&self.calendar_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let events = parse_calendar(&html, season)?;
        log::info!("Parsed {} calendar events", events.len());
        Ok(events)
    }
}
