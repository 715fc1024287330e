use crate::types::GrandPrixEvent;

#[derive(Debug, Default)]
pub struct EventFilter {
    pub city: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl EventFilter {
    pub fn apply(self, mut events: Vec<GrandPrixEvent>) -> Vec<GrandPrixEvent> {
        if let Some(city) = self.city {
            let needle = city.to_lowercase();
            events.retain(|e| {
                e.city
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&needle))
            });
        }
        if let Some(off) = self.offset {
            events = events.into_iter().skip(off).collect();
        }
        if let Some(lim) = self.limit {
            events.truncate(lim);
        }
        events
    }

    pub fn validate(self) -> Result<Self, String> {
        if self.offset.is_some_and(|o| o == 0) {
            return Err("Offset must be greater than 0".to_string());
        }
        if self.limit.is_some_and(|l| l == 0) {
            return Err("Limit must be greater than 0".to_string());
        }
        Ok(self)
    }
}

#[derive(Debug)]
pub struct CalendarStats {
    pub events: usize,
    pub with_schedule: usize,
    pub sessions_resolved: usize,
}

impl CalendarStats {
    pub fn from_events(events: &[GrandPrixEvent]) -> CalendarStats {
        CalendarStats {
            events: events.len(),
            with_schedule: events
                .iter()
                .filter(|e| e.sessions.resolved_count() > 0)
                .count(),
            sessions_resolved: events.iter().map(|e| e.sessions.resolved_count()).sum(),
        }
    }
}

impl std::fmt::Display for CalendarStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\nStatistics:")?;
        writeln!(f, "  Events:             {}", self.events)?;
        writeln!(f, "  With schedule:      {}", self.with_schedule)?;
        writeln!(f, "  Sessions resolved:  {}", self.sessions_resolved)
    }
}
