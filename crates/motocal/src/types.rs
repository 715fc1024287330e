use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Rendered value for anything the calendar page did not publish.
pub const NOT_AVAILABLE: &str = "NA";

/// The eight sessions of a MotoGP race weekend, in CSV column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionLabel {
    FreePractice1,
    Practice,
    FreePractice2,
    Qualifying1,
    Qualifying2,
    Sprint,
    WarmUp,
    Race,
}

impl SessionLabel {
    pub const ALL: [SessionLabel; 8] = [
        SessionLabel::FreePractice1,
        SessionLabel::Practice,
        SessionLabel::FreePractice2,
        SessionLabel::Qualifying1,
        SessionLabel::Qualifying2,
        SessionLabel::Sprint,
        SessionLabel::WarmUp,
        SessionLabel::Race,
    ];

    /// The literal text the calendar page prints after the day/time pair.
    pub fn search_text(&self) -> &'static str {
        match self {
            SessionLabel::FreePractice1 => "Free Practice Nr. 1",
            SessionLabel::Practice => "Practice",
            SessionLabel::FreePractice2 => "Free Practice Nr. 2",
            SessionLabel::Qualifying1 => "Qualifying Nr. 1",
            SessionLabel::Qualifying2 => "Qualifying Nr. 2",
            SessionLabel::Sprint => "Tissot Sprint",
            SessionLabel::WarmUp => "Warm Up",
            SessionLabel::Race => "Grand Prix",
        }
    }

    pub fn column_name(&self) -> &'static str {
        match self {
            SessionLabel::FreePractice1 => "FP1",
            SessionLabel::Practice => "Practice",
            SessionLabel::FreePractice2 => "FP2",
            SessionLabel::Qualifying1 => "Q1",
            SessionLabel::Qualifying2 => "Q2",
            SessionLabel::Sprint => "Sprint",
            SessionLabel::WarmUp => "Warm Up",
            SessionLabel::Race => "Race",
        }
    }
}

/// A session time placed on the calendar: absolute date plus the day code
/// and clock time exactly as the page printed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSessionTime {
    pub date: NaiveDate,
    pub day_code: String,
    pub time: String,
}

impl Display for ResolvedSessionTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} / {}",
            self.date.format("%d %b"),
            self.day_code,
            self.time
        )
    }
}

/// Per-weekend schedule. A `None` slot means the page did not list that
/// session (or the times were not yet published).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTimes {
    pub fp1: Option<ResolvedSessionTime>,
    pub practice: Option<ResolvedSessionTime>,
    pub fp2: Option<ResolvedSessionTime>,
    pub q1: Option<ResolvedSessionTime>,
    pub q2: Option<ResolvedSessionTime>,
    pub sprint: Option<ResolvedSessionTime>,
    pub warm_up: Option<ResolvedSessionTime>,
    pub race: Option<ResolvedSessionTime>,
}

impl SessionTimes {
    pub fn get(&self, label: SessionLabel) -> Option<&ResolvedSessionTime> {
        match label {
            SessionLabel::FreePractice1 => self.fp1.as_ref(),
            SessionLabel::Practice => self.practice.as_ref(),
            SessionLabel::FreePractice2 => self.fp2.as_ref(),
            SessionLabel::Qualifying1 => self.q1.as_ref(),
            SessionLabel::Qualifying2 => self.q2.as_ref(),
            SessionLabel::Sprint => self.sprint.as_ref(),
            SessionLabel::WarmUp => self.warm_up.as_ref(),
            SessionLabel::Race => self.race.as_ref(),
        }
    }

    pub fn set(&mut self, label: SessionLabel, value: Option<ResolvedSessionTime>) {
        let slot = match label {
            SessionLabel::FreePractice1 => &mut self.fp1,
            SessionLabel::Practice => &mut self.practice,
            SessionLabel::FreePractice2 => &mut self.fp2,
            SessionLabel::Qualifying1 => &mut self.q1,
            SessionLabel::Qualifying2 => &mut self.q2,
            SessionLabel::Sprint => &mut self.sprint,
            SessionLabel::WarmUp => &mut self.warm_up,
            SessionLabel::Race => &mut self.race,
        };
        *slot = value;
    }

    pub fn resolved_count(&self) -> usize {
        SessionLabel::ALL
            .iter()
            .filter(|l| self.get(**l).is_some())
            .count()
    }
}

/// One event card from the calendar listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrandPrixEvent {
    pub round: u32,
    pub city: Option<String>,
    pub dates: Option<String>,
    /// Closing day of the event window (the race Sunday).
    pub anchor: Option<NaiveDate>,
    pub sessions: SessionTimes,
}

impl Display for GrandPrixEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "R{:02} {} — {}",
            self.round,
            self.city.as_deref().unwrap_or(NOT_AVAILABLE),
            self.dates.as_deref().unwrap_or(NOT_AVAILABLE)
        )?;
        for label in SessionLabel::ALL {
            if let Some(resolved) = self.sessions.get(label) {
                write!(f, "\n      {:<8} {}", label.column_name(), resolved)?;
            }
        }
        Ok(())
    }
}
