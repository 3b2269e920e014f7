use serde::{Deserialize, Deserializer, Serialize};

use crate::events::lenient_string;

/// A team on the roster, as served by the teams collection.
///
/// Only the fields the standings need are kept; everything else on the
/// record (members, photos, captains) is skipped during deserialization.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Team {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default)]
    pub category: Category,
}

impl Team {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
        }
    }
}

/// The two standings buckets. Legacy rosters predate the women's
/// competition, so anything that is not exactly `"Women"` is a men's team.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Men,
    Women,
}

impl Category {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Women" => Category::Women,
            _ => Category::Men,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Category::Men => Category::Women,
            Category::Women => Category::Men,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Category::Men => "Men",
            Category::Women => "Women",
        })
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // numbers, booleans etc. all fall through to the default bucket
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(match raw {
            serde_json::Value::String(s) => Category::from_raw(&s),
            _ => Category::Men,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_defaults_to_men() {
        let teams: Vec<Team> = serde_json::from_str(
            r#"[
                {"id": "1", "name": "Aryabhatta"},
                {"id": "2", "name": "Bhaskara", "category": null},
                {"id": "3", "name": "Charaka", "category": "Men"},
                {"id": "4", "name": "Dhanvantari", "category": "women"},
                {"id": "5", "name": "Gargi", "category": "Women"}
            ]"#,
        )
        .unwrap();

        let categories =
            teams.iter().map(|team| team.category).collect::<Vec<_>>();
        assert_eq!(
            categories,
            vec![
                Category::Men,
                Category::Men,
                Category::Men,
                Category::Men,
                Category::Women
            ]
        );
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let team: Team = serde_json::from_str(
            r#"{
                "id": "17",
                "name": "Kalpana",
                "category": "Women",
                "members": [{"name": "A", "year": "2", "isCaptain": true}]
            }"#,
        )
        .unwrap();
        assert_eq!(team, Team::new("17", "Kalpana", Category::Women));
    }

    #[test]
    fn test_category_serializes_as_display_name() {
        let team = Team::new("1", "Gargi", Category::Women);
        let json = serde_json::to_value(&team).unwrap();
        assert_eq!(json["category"], "Women");
    }
}
