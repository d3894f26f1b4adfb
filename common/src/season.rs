//! The tournaments that make up a league season.

use crate::{EventCategory, EventRecord};

/// Short id, name and category of every event, in display order.
pub const SCHEDULE: [(&str, &str, EventCategory); 14] = [
    ("AO", "Australian Open", EventCategory::GrandSlam),
    ("RG", "Roland Garros", EventCategory::GrandSlam),
    ("WIM", "Wimbledon", EventCategory::GrandSlam),
    ("USO", "US Open", EventCategory::GrandSlam),
    ("IW", "Indian Wells", EventCategory::Masters1000),
    ("MIA", "Miami", EventCategory::Masters1000),
    ("MON", "Monte Carlo", EventCategory::Masters1000),
    ("MAD", "Madrid", EventCategory::Masters1000),
    ("ROM", "Rome", EventCategory::Masters1000),
    ("CAN", "Canada (Toronto/Montreal)", EventCategory::Masters1000),
    ("CIN", "Cincinnati", EventCategory::Masters1000),
    ("SHA", "Shanghai", EventCategory::Masters1000),
    ("PAR", "Paris", EventCategory::Masters1000),
    ("FIN", "ATP Finals", EventCategory::Finals),
];

/// Build the event id for a short id and season, e.g. `AO2026`.
#[must_use]
pub fn event_id(short_id: &str, year: u32) -> String {
    format!("{short_id}{year}")
}

/// All events of the season for a year.
#[must_use]
pub fn season_events(year: u32) -> Vec<EventRecord> {
    SCHEDULE
        .iter()
        .map(|&(short_id, name, category)| EventRecord {
            event_id: event_id(short_id, year),
            short_id: short_id.to_string(),
            name: name.to_string(),
            category,
            year,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_season_events() {
        let events = season_events(2026);
        assert_eq!(events.len(), 14);
        assert_eq!(events[0].event_id, "AO2026");
        assert_eq!(events[0].category, EventCategory::GrandSlam);
        assert_eq!(events[13].event_id, "FIN2026");
        assert_eq!(events[13].category, EventCategory::Finals);
        assert!(events.iter().all(|e| e.year == 2026));

        let slams = events
            .iter()
            .filter(|e| e.category == EventCategory::GrandSlam)
            .count();
        assert_eq!(slams, 4);
    }

    #[test]
    fn test_event_ids_are_unique() {
        let events = season_events(2027);
        let ids: HashSet<&str> = events.iter().map(|e| e.event_id.as_str()).collect();
        assert_eq!(ids.len(), events.len());
    }
}
