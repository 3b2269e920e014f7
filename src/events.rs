//! Standings events: one scored sport in one category, with the teams that
//! finished in the top four.
//!
//! The persistence layer stores these as loosely-typed JSON, so every field
//! here deserializes leniently. Missing or oddly-typed values turn into the
//! most conservative interpretation rather than an error.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::teams::Category;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct StandingsEvent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sport: String,
    #[serde(rename = "type", default)]
    pub kind: EventType,
    #[serde(default)]
    pub category: EventCategory,
    #[serde(default, deserialize_with = "lenient_placings")]
    pub results: Placings,
}

impl StandingsEvent {
    pub fn new(
        id: impl Into<String>,
        sport: impl Into<String>,
        kind: EventType,
        category: EventCategory,
        results: Placings,
    ) -> Self {
        Self {
            id: id.into(),
            sport: sport.into(),
            kind,
            category,
            results,
        }
    }
}

/// The scoring class of an event. Unrecognised classes are kept verbatim so
/// that they survive a round trip through the API.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    Standard,
    Team,
    TugOfWar,
    Other(String),
}

impl Default for EventType {
    fn default() -> Self {
        EventType::Other(String::new())
    }
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Standard => "Standard",
            EventType::Team => "Team",
            EventType::TugOfWar => "Tug of War",
            EventType::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, EventType::Other(_))
    }
}

impl From<String> for EventType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Standard" => EventType::Standard,
            "Team" => EventType::Team,
            "Tug of War" => EventType::TugOfWar,
            _ => EventType::Other(raw),
        }
    }
}

impl From<&str> for EventType {
    fn from(raw: &str) -> Self {
        EventType::from(raw.to_string())
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient_string(deserializer).map(EventType::from)
    }
}

/// The category an event was contested in. This is a superset of the team
/// [`Category`]: mixed events exist, and score into the men's bucket.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EventCategory {
    #[default]
    Men,
    Women,
    Mixed,
    Other(String),
}

impl EventCategory {
    pub fn as_str(&self) -> &str {
        match self {
            EventCategory::Men => "Men",
            EventCategory::Women => "Women",
            EventCategory::Mixed => "Mixed",
            EventCategory::Other(raw) => raw,
        }
    }

    /// The standings bucket this event's placings score into.
    pub fn bucket(&self) -> Category {
        match self {
            EventCategory::Women => Category::Women,
            _ => Category::Men,
        }
    }
}

impl From<String> for EventCategory {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            // the editor shows a blank category as "Men"
            "Men" | "" => EventCategory::Men,
            "Women" => EventCategory::Women,
            "Mixed" => EventCategory::Mixed,
            _ => EventCategory::Other(raw),
        }
    }
}

impl From<&str> for EventCategory {
    fn from(raw: &str) -> Self {
        EventCategory::from(raw.to_string())
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient_string(deserializer).map(EventCategory::from)
    }
}

/// A finishing position that earns points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Place {
    First,
    Second,
    Third,
    Fourth,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Place {
    pub const ALL: [Place; 4] =
        [Place::First, Place::Second, Place::Third, Place::Fourth];

    /// Fourth place scores points but is not a podium finish.
    pub fn medal(self) -> Option<Medal> {
        match self {
            Place::First => Some(Medal::Gold),
            Place::Second => Some(Medal::Silver),
            Place::Third => Some(Medal::Bronze),
            Place::Fourth => None,
        }
    }
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Place::First => "first",
            Place::Second => "second",
            Place::Third => "third",
            Place::Fourth => "fourth",
        })
    }
}

/// The top four of an event, by team name (or id, see
/// [`crate::standings::JoinKey`]). A blank slot is `None`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Placings {
    #[serde(default, deserialize_with = "lenient_slot")]
    pub first: Option<String>,
    #[serde(default, deserialize_with = "lenient_slot")]
    pub second: Option<String>,
    #[serde(default, deserialize_with = "lenient_slot")]
    pub third: Option<String>,
    #[serde(default, deserialize_with = "lenient_slot")]
    pub fourth: Option<String>,
}

impl Placings {
    pub fn new(
        first: Option<&str>,
        second: Option<&str>,
        third: Option<&str>,
        fourth: Option<&str>,
    ) -> Self {
        let own = |slot: Option<&str>| {
            slot.filter(|s| !s.is_empty()).map(str::to_string)
        };
        Self {
            first: own(first),
            second: own(second),
            third: own(third),
            fourth: own(fourth),
        }
    }

    pub fn get(&self, place: Place) -> Option<&str> {
        match place {
            Place::First => self.first.as_deref(),
            Place::Second => self.second.as_deref(),
            Place::Third => self.third.as_deref(),
            Place::Fourth => self.fourth.as_deref(),
        }
    }

    /// Filled slots, in finishing order.
    pub fn iter(&self) -> impl Iterator<Item = (Place, &str)> {
        Place::ALL
            .into_iter()
            .filter_map(|place| self.get(place).map(|name| (place, name)))
    }
}

/// Anything but an object (`null`, a string, a list) means no placings.
fn lenient_placings<'de, D>(deserializer: D) -> Result<Placings, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => {
            serde_json::from_value(value).unwrap_or_default()
        }
        _ => Placings::default(),
    })
}

/// Accepts strings, numbers (ids are sometimes numeric) and `null`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

fn lenient_slot<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_editor_payload() {
        let event: StandingsEvent = serde_json::from_str(
            r#"{
                "id": "1718000000000",
                "sport": "Tug of War",
                "type": "Tug of War",
                "category": "Women",
                "results": {"first": "Gargi", "second": "", "third": "Kalpana", "fourth": ""}
            }"#,
        )
        .unwrap();

        assert_eq!(event.kind, EventType::TugOfWar);
        assert_eq!(event.category, EventCategory::Women);
        assert_eq!(
            event.results.iter().collect::<Vec<_>>(),
            vec![(Place::First, "Gargi"), (Place::Third, "Kalpana")]
        );
    }

    #[test]
    fn test_missing_fields_are_conservative() {
        let event: StandingsEvent =
            serde_json::from_str(r#"{"sport": "Chess", "results": null}"#)
                .unwrap();

        assert_eq!(event.kind, EventType::Other(String::new()));
        assert_eq!(event.category, EventCategory::Men);
        assert_eq!(event.results, Placings::default());
    }

    #[test]
    fn test_odd_results_do_not_spoil_the_list() {
        let events: Vec<StandingsEvent> = serde_json::from_str(
            r#"[
                {"id": "1", "type": "Team", "results": {"first": "Gargi"}},
                {"id": "2", "type": "Team", "results": "n/a"},
                {"id": "3", "type": "Team", "results": ["Gargi"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].results.get(Place::First), Some("Gargi"));
        assert_eq!(events[1].results, Placings::default());
        assert_eq!(events[2].results, Placings::default());
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        let event: StandingsEvent =
            serde_json::from_str(r#"{"id": 4, "type": "Relay"}"#).unwrap();
        assert_eq!(event.id, "4");
        assert_eq!(event.kind, EventType::Other("Relay".to_string()));
        assert!(!event.kind.is_known());

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Relay");
    }

    #[test]
    fn test_mixed_scores_into_men() {
        assert_eq!(EventCategory::Mixed.bucket(), Category::Men);
        assert_eq!(EventCategory::from("women").bucket(), Category::Men);
        assert_eq!(EventCategory::Women.bucket(), Category::Women);
    }

    #[test]
    fn test_only_podium_places_have_medals() {
        assert_eq!(Place::First.medal(), Some(Medal::Gold));
        assert_eq!(Place::Third.medal(), Some(Medal::Bronze));
        assert_eq!(Place::Fourth.medal(), None);
    }
}
