use crate::events::{EventType, Place};

/// Points awarded for each finishing position in one scoring class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointsTable {
    pub first: u32,
    pub second: u32,
    pub third: u32,
    pub fourth: u32,
}

impl PointsTable {
    pub const STANDARD: PointsTable = PointsTable::new(20, 12, 8, 4);
    pub const TEAM: PointsTable = PointsTable::new(10, 6, 4, 2);
    pub const TUG_OF_WAR: PointsTable = PointsTable::new(5, 3, 2, 0);
    pub const NONE: PointsTable = PointsTable::new(0, 0, 0, 0);

    pub const fn new(first: u32, second: u32, third: u32, fourth: u32) -> Self {
        Self {
            first,
            second,
            third,
            fourth,
        }
    }

    pub fn points_for(&self, place: Place) -> u32 {
        match place {
            Place::First => self.first,
            Place::Second => self.second,
            Place::Third => self.third,
            Place::Fourth => self.fourth,
        }
    }
}

impl EventType {
    /// Unknown scoring classes award nothing. They are not an error.
    pub fn points_table(&self) -> PointsTable {
        match self {
            EventType::Standard => PointsTable::STANDARD,
            EventType::Team => PointsTable::TEAM,
            EventType::TugOfWar => PointsTable::TUG_OF_WAR,
            EventType::Other(_) => PointsTable::NONE,
        }
    }
}

#[cfg(test)]
#[test]
fn test_points_tables() {
    let table = |kind: &str| {
        let table = EventType::from(kind).points_table();
        Place::ALL.map(|place| table.points_for(place))
    };

    assert_eq!(table("Standard"), [20, 12, 8, 4]);
    assert_eq!(table("Team"), [10, 6, 4, 2]);
    assert_eq!(table("Tug of War"), [5, 3, 2, 0]);
    assert_eq!(table("Relay"), [0, 0, 0, 0]);
    assert_eq!(table(""), [0, 0, 0, 0]);
}
