//! The General Championship (GC) table.
//!
//! Every public surface that shows the GC table derives it through
//! [`calculate`], so the leaderboards cannot drift apart.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    events::{Medal, Place, StandingsEvent},
    teams::{Category, Team},
};

pub mod points;
pub mod public;
pub mod sports;

pub use points::PointsTable;

/// One team's line in the GC table.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StandingRow {
    pub name: String,
    pub points: u32,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
}

impl StandingRow {
    pub fn zeroed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: 0,
            gold: 0,
            silver: 0,
            bronze: 0,
        }
    }

    fn award(&mut self, place: Place, points: u32) {
        self.points = self.points.saturating_add(points);
        match place.medal() {
            Some(Medal::Gold) => self.gold = self.gold.saturating_add(1),
            Some(Medal::Silver) => self.silver = self.silver.saturating_add(1),
            Some(Medal::Bronze) => self.bronze = self.bronze.saturating_add(1),
            None => (),
        }
    }
}

/// Ranked GC tables for both buckets. Either may be empty.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Standings {
    pub men: Vec<StandingRow>,
    pub women: Vec<StandingRow>,
}

impl Standings {
    pub fn bucket(&self, category: Category) -> &[StandingRow] {
        match category {
            Category::Men => &self.men,
            Category::Women => &self.women,
        }
    }
}

/// Which team field the names in [`crate::events::Placings`] refer to.
///
/// Placings have always been recorded by team name, which means renaming a
/// team orphans its results. `Id` is available for data that records team
/// ids instead.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JoinKey {
    #[default]
    Name,
    Id,
}

impl JoinKey {
    /// The string placings use to name `team`. Blank for a team without an
    /// id under [`JoinKey::Id`].
    pub fn key_of(self, team: &Team) -> &str {
        match self {
            JoinKey::Name => &team.name,
            JoinKey::Id => &team.id,
        }
    }
}

impl std::str::FromStr for JoinKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(JoinKey::Name),
            "id" => Ok(JoinKey::Id),
            other => Err(format!("unknown join key `{other}` (name, id)")),
        }
    }
}

/// Computes the GC tables, joining placings to teams by name.
pub fn calculate(events: &[StandingsEvent], teams: &[Team]) -> Standings {
    calculate_with(events, teams, JoinKey::Name)
}

/// Computes the GC tables.
///
/// This never fails. Events with an unrecognised scoring class and placings
/// that name no team in the event's bucket contribute nothing. Teams that
/// never placed are still listed, with zero points.
///
/// Rows are ranked by points, then gold medals. Rows level on both keep the
/// order in which their teams appear in `teams`.
pub fn calculate_with(
    events: &[StandingsEvent],
    teams: &[Team],
    join: JoinKey,
) -> Standings {
    let mut men = Bucket::default();
    let mut women = Bucket::default();

    for team in teams {
        match team.category {
            Category::Men => men.seat(team, join),
            Category::Women => women.seat(team, join),
        }
    }

    for event in events.iter().filter(|event| event.kind.is_known()) {
        let table = event.kind.points_table();
        // the event's own category decides, even if the roster disagrees
        let bucket = match event.category.bucket() {
            Category::Men => &mut men,
            Category::Women => &mut women,
        };

        for (place, key) in event.results.iter() {
            if let Some(row) = bucket.row_mut(key) {
                row.award(place, table.points_for(place));
            }
        }
    }

    Standings {
        men: rank(men.rows),
        women: rank(women.rows),
    }
}

/// One bucket's rows in roster order, and the row each join key names.
#[derive(Default)]
struct Bucket<'a> {
    rows: Vec<StandingRow>,
    keys: IndexMap<&'a str, usize>,
}

impl<'a> Bucket<'a> {
    fn seat(&mut self, team: &'a Team, join: JoinKey) {
        match join {
            // a repeated name shares the first team's row
            JoinKey::Name => {
                if !self.keys.contains_key(team.name.as_str()) {
                    self.keys.insert(&team.name, self.rows.len());
                    self.rows.push(StandingRow::zeroed(&team.name));
                }
            }
            // every team gets a row; a blank id cannot be named and a
            // repeated id names the first team that has it
            JoinKey::Id => {
                if !team.id.is_empty() {
                    self.keys.entry(&team.id).or_insert(self.rows.len());
                }
                self.rows.push(StandingRow::zeroed(&team.name));
            }
        }
    }

    fn row_mut(&mut self, key: &str) -> Option<&mut StandingRow> {
        let index = *self.keys.get(key)?;
        self.rows.get_mut(index)
    }
}

fn rank(mut rows: Vec<StandingRow>) -> Vec<StandingRow> {
    // `sort_by` is stable, which keeps roster order among exact ties
    rows.sort_by(|a, b| {
        b.points.cmp(&a.points).then_with(|| b.gold.cmp(&a.gold))
    });
    rows
}
