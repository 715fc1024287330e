use chrono::{Duration, NaiveDate};
use regex::Regex;

use crate::types::ResolvedSessionTime;

/// What to do when a matched day code is not one of THU/FRI/SAT/SUN.
///
/// The calendar has historically only printed those four codes, and the
/// original behavior was to silently fall back to the anchor date. That
/// default is kept but made explicit here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownDayCode {
    /// Place the session on the anchor date (offset 0).
    #[default]
    UseAnchor,
    /// Treat the session as not resolvable.
    Unresolved,
}

/// Resolves a labeled session line inside a card's raw text to an absolute
/// calendar date.
///
/// The page prints sessions as `FRI / 09:00 Free Practice Nr. 1` with only
/// a weekday code; the absolute date is derived from the event's anchor
/// (its closing Sunday) and a fixed per-weekday offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionResolver {
    pub unknown_day_code: UnknownDayCode,
}

impl SessionResolver {
    pub fn new(unknown_day_code: UnknownDayCode) -> Self {
        Self { unknown_day_code }
    }

    /// Finds the first `DAY / HH:MM <label>` occurrence in `text` and
    /// resolves it against `anchor`.
    ///
    /// Returns `None` when the label is absent from the text or no anchor
    /// is known. Both are normal states (times unpublished, date range not
    /// parsed), not errors.
    pub fn resolve(
        &self,
        label: &str,
        text: &str,
        anchor: Option<NaiveDate>,
    ) -> Option<ResolvedSessionTime> {
        let anchor = anchor?;

        // Label text comes from the caller and may contain regex
        // metacharacters ("Free Practice Nr. 1").
        let pattern = format!(
            r"(?i)([A-Z]{{3}})\s/\s(\d{{2}}:\d{{2}})\s+{}",
            regex::escape(label)
        );
        let re = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(e) => {
                log::warn!("Invalid session pattern for '{}': {}", label, e);
                return None;
            }
        };

        let caps = re.captures(text)?;
        let day_code = caps[1].to_uppercase();
        let time = caps[2].to_string();

        let offset = match day_offset(&day_code) {
            Some(offset) => offset,
            None => match self.unknown_day_code {
                UnknownDayCode::UseAnchor => 0,
                UnknownDayCode::Unresolved => return None,
            },
        };

        Some(ResolvedSessionTime {
            date: anchor + Duration::days(offset),
            day_code,
            time,
        })
    }
}

/// Signed day offset from the event's closing Sunday.
fn day_offset(day_code: &str) -> Option<i64> {
    match day_code {
        "THU" => Some(-3),
        "FRI" => Some(-2),
        "SAT" => Some(-1),
        "SUN" => Some(0),
        _ => None,
    }
}
