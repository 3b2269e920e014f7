//! Lookups over the event list by sport, as used by the editor and the
//! results page sport pickers.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::events::{EventCategory, StandingsEvent};

/// Distinct, non-blank sport names in the order they first appear.
pub fn sports(events: &[StandingsEvent]) -> Vec<&str> {
    events
        .iter()
        .map(|event| event.sport.as_str())
        .filter(|sport| !sport.is_empty())
        .unique()
        .collect()
}

/// Distinct categories the given sport was contested in, in the order they
/// first appear.
pub fn categories_for<'a>(
    events: &'a [StandingsEvent],
    sport: &str,
) -> Vec<&'a EventCategory> {
    events
        .iter()
        .filter(|event| event.sport == sport)
        .map(|event| &event.category)
        .unique()
        .collect()
}

pub fn find_event<'a>(
    events: &'a [StandingsEvent],
    sport: &str,
    category: &EventCategory,
) -> Option<&'a StandingsEvent> {
    events
        .iter()
        .find(|event| event.sport == sport && &event.category == category)
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SportEntry {
    pub sport: String,
    pub categories: Vec<EventCategory>,
}

/// Every sport with the categories it has events in.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct SportIndex(pub Vec<SportEntry>);

impl SportIndex {
    pub fn build(events: &[StandingsEvent]) -> Self {
        SportIndex(
            sports(events)
                .into_iter()
                .map(|sport| SportEntry {
                    sport: sport.to_string(),
                    categories: categories_for(events, sport)
                        .into_iter()
                        .cloned()
                        .collect(),
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventType, Placings};

    fn event(id: &str, sport: &str, category: &str) -> StandingsEvent {
        StandingsEvent::new(
            id,
            sport,
            EventType::Team,
            EventCategory::from(category),
            Placings::default(),
        )
    }

    fn fixture() -> Vec<StandingsEvent> {
        vec![
            event("1", "Football", "Men"),
            event("2", "Chess", "Mixed"),
            event("3", "", "Men"),
            event("4", "Football", "Women"),
            event("5", "Football", "Men"),
        ]
    }

    #[test]
    fn test_sports_in_first_seen_order() {
        assert_eq!(sports(&fixture()), vec!["Football", "Chess"]);
    }

    #[test]
    fn test_categories_for_sport() {
        let events = fixture();
        assert_eq!(
            categories_for(&events, "Football"),
            vec![&EventCategory::Men, &EventCategory::Women]
        );
        assert!(categories_for(&events, "Squash").is_empty());
    }

    #[test]
    fn test_find_event_returns_first_match() {
        let events = fixture();
        let found =
            find_event(&events, "Football", &EventCategory::Men).unwrap();
        assert_eq!(found.id, "1");
        assert!(find_event(&events, "Chess", &EventCategory::Men).is_none());
    }

    #[test]
    fn test_index_serializes_as_list() {
        let index = SportIndex::build(&fixture());
        assert_eq!(
            serde_json::to_value(&index).unwrap(),
            serde_json::json!([
                {"sport": "Football", "categories": ["Men", "Women"]},
                {"sport": "Chess", "categories": ["Mixed"]}
            ])
        );
    }
}
