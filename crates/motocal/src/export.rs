use std::io::Write;
use std::path::Path;

use crate::types::{GrandPrixEvent, NOT_AVAILABLE, SessionLabel};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const HEADER: [&str; 11] = [
    "Sr. No", "City", "Dates", "FP1", "Practice", "FP2", "Q1", "Q2", "Sprint", "Warm Up", "Race",
];

/// Writes one row per event in the fixed column order, with `NA` for
/// anything the calendar page did not publish.
pub fn write_csv<W: Write>(events: &[GrandPrixEvent], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for event in events {
        let mut record = vec![
            event.round.to_string(),
            event
                .city
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            event
                .dates
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ];
        for label in SessionLabel::ALL {
            record.push(match event.sessions.get(label) {
                Some(resolved) => resolved.to_string(),
                None => NOT_AVAILABLE.to_string(),
            });
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file<P: AsRef<Path>>(events: &[GrandPrixEvent], path: P) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(events, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ResolvedSessionTime, SessionTimes};
    use chrono::NaiveDate;

    #[test]
    fn test_header_and_na_sentinels() {
        let events = vec![GrandPrixEvent {
            round: 1,
            city: None,
            dates: None,
            anchor: None,
            sessions: SessionTimes::default(),
        }];

        let mut buf = Vec::new();
        write_csv(&events, &mut buf).expect("should write");
        let out = String::from_utf8(buf).unwrap();

        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("Sr. No,City,Dates,FP1,Practice,FP2,Q1,Q2,Sprint,Warm Up,Race")
        );
        assert_eq!(lines.next(), Some("1,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_resolved_sessions_rendered_in_place() {
        let mut sessions = SessionTimes::default();
        sessions.race = Some(ResolvedSessionTime {
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            day_code: "SUN".to_string(),
            time: "13:30".to_string(),
        });
        sessions.fp1 = Some(ResolvedSessionTime {
            date: NaiveDate::from_ymd_opt(2026, 2, 27).unwrap(),
            day_code: "FRI".to_string(),
            time: "09:00".to_string(),
        });

        let events = vec![GrandPrixEvent {
            round: 2,
            city: Some("THAILAND".to_string()),
            dates: Some("27 FEB - 01 MAR".to_string()),
            anchor: NaiveDate::from_ymd_opt(2026, 3, 1),
            sessions,
        }];

        let mut buf = Vec::new();
        write_csv(&events, &mut buf).expect("should write");
        let out = String::from_utf8(buf).unwrap();

        let row = out.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "2,THAILAND,27 FEB - 01 MAR,27 Feb FRI / 09:00,NA,NA,NA,NA,NA,NA,01 Mar SUN / 13:30"
        );
    }
}
