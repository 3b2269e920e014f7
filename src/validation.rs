//! Consistency checks over the roster and event collections.
//!
//! None of these problems stop the GC table from being computed (the
//! calculator skips whatever it cannot use), but each one means some result
//! is silently not being counted.

use std::collections::HashSet;

use itertools::Itertools;

use crate::{
    events::{EventType, Place, StandingsEvent},
    standings::JoinKey,
    teams::{Category, Team},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Finding {
    /// The editor refuses to save events without a sport.
    MissingSport { event: String },
    /// Scores nothing.
    UnknownType { event: String, kind: String },
    /// No team of any category has this name.
    DanglingName {
        event: String,
        place: Place,
        name: String,
    },
    /// The team exists, but only in the other bucket, so the placing is
    /// dropped.
    CategoryMismatch {
        event: String,
        place: Place,
        name: String,
        event_bucket: Category,
    },
    /// Two teams in one bucket share a name; only one row is shown.
    DuplicateTeamName { name: String, category: Category },
    /// Two teams in one bucket share an id; placings naming it only ever
    /// reach the first.
    DuplicateTeamId { id: String, category: Category },
    /// Listed with zero points, since no placing can name it.
    MissingTeamId { name: String, category: Category },
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Finding::MissingSport { event } => {
                write!(f, "event {event}: no sport name")
            }
            Finding::UnknownType { event, kind } => write!(
                f,
                "event {event}: unknown type `{kind}` scores no points"
            ),
            Finding::DanglingName { event, place, name } => write!(
                f,
                "event {event}: {place} place `{name}` is not a team"
            ),
            Finding::CategoryMismatch {
                event,
                place,
                name,
                event_bucket,
            } => write!(
                f,
                "event {event}: {place} place `{name}` is not a {event_bucket} team"
            ),
            Finding::DuplicateTeamName { name, category } => {
                write!(f, "{category} team name `{name}` is used more than once")
            }
            Finding::DuplicateTeamId { id, category } => {
                write!(f, "{category} team id `{id}` is used more than once")
            }
            Finding::MissingTeamId { name, category } => {
                write!(f, "{category} team `{name}` has no id")
            }
        }
    }
}

/// Lists everything in the collections the GC table will quietly ignore.
pub fn audit(
    events: &[StandingsEvent],
    teams: &[Team],
    join: JoinKey,
) -> Vec<Finding> {
    let keys_in = |category: Category| {
        teams
            .iter()
            .filter(|team| team.category == category)
            .map(|team| join.key_of(team))
            .collect::<HashSet<_>>()
    };
    let men = keys_in(Category::Men);
    let women = keys_in(Category::Women);
    let keys = |category: Category| match category {
        Category::Men => &men,
        Category::Women => &women,
    };

    let mut findings = roster_findings(teams, join);

    for event in events {
        if event.sport.trim().is_empty() {
            findings.push(Finding::MissingSport {
                event: event.id.clone(),
            });
        }

        if let EventType::Other(kind) = &event.kind {
            findings.push(Finding::UnknownType {
                event: event.id.clone(),
                kind: kind.clone(),
            });
            // nothing else about this event can matter
            continue;
        }

        let bucket = event.category.bucket();
        let (own, other) = (keys(bucket), keys(bucket.other()));

        for (place, key) in event.results.iter() {
            if own.contains(key) {
                continue;
            }
            findings.push(if other.contains(key) {
                Finding::CategoryMismatch {
                    event: event.id.clone(),
                    place,
                    name: key.to_string(),
                    event_bucket: bucket,
                }
            } else {
                Finding::DanglingName {
                    event: event.id.clone(),
                    place,
                    name: key.to_string(),
                }
            });
        }
    }

    findings
}

/// Teams the table merges or cannot score, given how placings name them.
fn roster_findings(teams: &[Team], join: JoinKey) -> Vec<Finding> {
    match join {
        JoinKey::Name => teams
            .iter()
            .map(|team| (team.category, team.name.as_str()))
            .duplicates()
            .map(|(category, name)| Finding::DuplicateTeamName {
                name: name.to_string(),
                category,
            })
            .collect(),
        JoinKey::Id => {
            let missing = teams
                .iter()
                .filter(|team| team.id.is_empty())
                .map(|team| Finding::MissingTeamId {
                    name: team.name.clone(),
                    category: team.category,
                });
            let repeated = teams
                .iter()
                .filter(|team| !team.id.is_empty())
                .map(|team| (team.category, team.id.as_str()))
                .duplicates()
                .map(|(category, id)| Finding::DuplicateTeamId {
                    id: id.to_string(),
                    category,
                });
            missing.chain(repeated).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventCategory, Placings};

    fn event(
        id: &str,
        sport: &str,
        kind: &str,
        category: &str,
        first: &str,
    ) -> StandingsEvent {
        StandingsEvent::new(
            id,
            sport,
            EventType::from(kind),
            EventCategory::from(category),
            Placings::new(Some(first), None, None, None),
        )
    }

    fn teams() -> Vec<Team> {
        vec![
            Team::new("1", "Charaka", Category::Men),
            Team::new("2", "Gargi", Category::Women),
        ]
    }

    #[test]
    fn test_clean_data_has_no_findings() {
        let events = [
            event("1", "Football", "Team", "Men", "Charaka"),
            event("2", "Chess", "Standard", "Women", "Gargi"),
        ];
        assert!(audit(&events, &teams(), JoinKey::Name).is_empty());
    }

    #[test]
    fn test_reports_each_kind_of_problem() {
        let mut roster = teams();
        roster.push(Team::new("3", "Charaka", Category::Men));
        // same name in the other bucket is fine
        roster.push(Team::new("4", "Gargi", Category::Men));

        let events = [
            event("1", " ", "Team", "Men", "Charaka"),
            event("2", "Relay", "Relay", "Men", "Nobody"),
            event("3", "Chess", "Team", "Mixed", "Ghost"),
            event("4", "Chess", "Team", "Women", "Charaka"),
        ];

        let findings = audit(&events, &roster, JoinKey::Name);
        assert_eq!(
            findings,
            vec![
                Finding::DuplicateTeamName {
                    name: "Charaka".to_string(),
                    category: Category::Men,
                },
                Finding::MissingSport {
                    event: "1".to_string()
                },
                Finding::UnknownType {
                    event: "2".to_string(),
                    kind: "Relay".to_string(),
                },
                Finding::DanglingName {
                    event: "3".to_string(),
                    place: Place::First,
                    name: "Ghost".to_string(),
                },
                Finding::CategoryMismatch {
                    event: "4".to_string(),
                    place: Place::First,
                    name: "Charaka".to_string(),
                    event_bucket: Category::Women,
                },
            ]
        );
    }

    #[test]
    fn test_join_by_id() {
        let events = [event("1", "Chess", "Team", "Men", "1")];
        assert!(audit(&events, &teams(), JoinKey::Id).is_empty());
        assert_eq!(audit(&events, &teams(), JoinKey::Name).len(), 1);
    }

    #[test]
    fn test_id_roster_problems() {
        let roster = [
            Team::new("", "Charaka", Category::Men),
            Team::new("x", "Sushruta", Category::Men),
            Team::new("x", "Aryabhata", Category::Men),
            // repeated names do not merge rows when joining by id
            Team::new("y", "Sushruta", Category::Men),
        ];

        assert_eq!(
            audit(&[], &roster, JoinKey::Id),
            vec![
                Finding::MissingTeamId {
                    name: "Charaka".to_string(),
                    category: Category::Men,
                },
                Finding::DuplicateTeamId {
                    id: "x".to_string(),
                    category: Category::Men,
                },
            ]
        );
        assert_eq!(
            audit(&[], &roster, JoinKey::Name),
            vec![Finding::DuplicateTeamName {
                name: "Sushruta".to_string(),
                category: Category::Men,
            }]
        );
    }

    #[test]
    fn test_display() {
        let finding = Finding::CategoryMismatch {
            event: "4".to_string(),
            place: Place::Second,
            name: "Charaka".to_string(),
            event_bucket: Category::Women,
        };
        assert_eq!(
            finding.to_string(),
            "event 4: second place `Charaka` is not a Women team"
        );
    }
}
