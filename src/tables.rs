//! Static lookup tables used during conversion.
//!
//! These are immutable once built. [`Tables::standard`] constructs the set the
//! converter uses; tests may build their own.

use std::collections::HashMap;
use std::fmt;

use crate::error::{ErrorKind, IResult};
use crate::ship::StatDelta;

/// A KcWiki ship type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WikiShipType(u8);

impl WikiShipType {
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    pub fn raw(self) -> u8 {
        self.0
    }
}

impl fmt::Display for WikiShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// WhoCallTheFleet type code -> KcWiki type code.
///
/// Several WhoCallTheFleet categories have no KcWiki counterpart and fold into
/// the nearest general type.
const SHIP_TYPE_MAPPING: [(i64, u8); 32] = [
    (1, 2),
    (2, 3),
    (3, 4),
    (4, 5),
    (5, 6),
    (6, 9),
    (7, 8),
    (8, 10),
    (9, 7),
    (10, 11),
    (11, 18),
    (12, 16),
    (13, 13),
    (14, 14),
    (15, 17),
    (16, 19),
    (17, 20),
    // Torpedo battlecruiser -> battleship
    (18, 9),
    // Anti-air destroyer -> destroyer
    (19, 2),
    // Large battleship -> battleship
    (20, 9),
    (21, 21),
    (22, 22),
    // Anti-air cruiser -> heavy cruiser
    (23, 5),
    // Flying boat tender -> seaplane tender
    (24, 16),
    // Mist fleet heavy cruiser -> heavy cruiser
    (25, 5),
    // Mist fleet battleship -> battleship
    (26, 9),
    // Mist fleet submarine -> submarine
    (27, 13),
    // Anti-air light cruiser -> light cruiser
    (28, 3),
    // Fleet oiler -> supply ship
    (29, 22),
    // Attack light carrier -> light carrier
    (30, 7),
    (31, 1),
    // Escort carrier -> light carrier
    (32, 7),
];

#[derive(Debug, Clone)]
pub struct ShipTypeTable {
    mapping: HashMap<i64, WikiShipType>,
}

impl ShipTypeTable {
    pub fn standard() -> Self {
        Self::from_pairs(
            SHIP_TYPE_MAPPING
                .iter()
                .map(|&(source, target)| (source, WikiShipType::new(target))),
        )
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (i64, WikiShipType)>) -> Self {
        Self {
            mapping: pairs.into_iter().collect(),
        }
    }

    pub fn lookup(&self, source: i64) -> IResult<WikiShipType> {
        self.mapping
            .get(&source)
            .copied()
            .ok_or(ErrorKind::UnmappedShipType(source))
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

/// Replacement values for a ship whose source data cannot be converted the
/// usual way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipOverride {
    pub kcwiki_id: &'static str,
    pub modernization: StatDelta,
    pub scrap: StatDelta,
}

#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    ships: HashMap<i64, ShipOverride>,
}

impl OverrideTable {
    /// The Mist fleet collaboration ships.
    pub fn mist_fleet() -> Self {
        let mist = |kcwiki_id: &'static str| ShipOverride {
            kcwiki_id,
            modernization: StatDelta::from_slice(&[1, 0, 0, 0]),
            scrap: StatDelta::from_slice(&[0, 1, 0, 0]),
        };

        Self {
            ships: HashMap::from([
                // Iona
                (9181, mist("Mist01")),
                // Takao
                (9182, mist("Mist02")),
                // Haruna
                (9183, mist("Mist03")),
            ]),
        }
    }

    pub fn get(&self, ship_id: i64) -> Option<&ShipOverride> {
        self.ships.get(&ship_id)
    }

    pub fn contains(&self, ship_id: i64) -> bool {
        self.ships.contains_key(&ship_id)
    }

    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.ships.keys().copied()
    }
}

/// All lookup tables the converter consults.
#[derive(Debug, Clone)]
pub struct Tables {
    pub ship_types: ShipTypeTable,
    pub overrides: OverrideTable,
}

impl Tables {
    pub fn standard() -> Self {
        Self {
            ship_types: ShipTypeTable::standard(),
            overrides: OverrideTable::mist_fleet(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn type_table_covers_every_source_type() {
        let table = ShipTypeTable::standard();
        assert_eq!(table.len(), 32);
        for source in 1..=32 {
            assert!(table.lookup(source).is_ok(), "type {source} unmapped");
        }
    }

    #[test]
    fn type_table_folds_categories() {
        let table = ShipTypeTable::standard();
        for source in [6, 18, 20, 26] {
            assert_eq!(table.lookup(source).unwrap(), WikiShipType::new(9));
        }
        assert_eq!(table.lookup(19).unwrap(), WikiShipType::new(2));
        assert_eq!(table.lookup(32).unwrap(), WikiShipType::new(7));
    }

    #[test]
    fn unmapped_type_errors() {
        let table = ShipTypeTable::standard();
        assert!(matches!(table.lookup(0), Err(ErrorKind::UnmappedShipType(0))));
        assert!(matches!(table.lookup(33), Err(ErrorKind::UnmappedShipType(33))));
    }

    #[test]
    fn mist_fleet_overrides() {
        let overrides = OverrideTable::mist_fleet();
        let mut ids: Vec<_> = overrides.ids().collect();
        ids.sort();
        assert_eq!(ids, vec![9181, 9182, 9183]);
        assert_eq!(overrides.get(9182).unwrap().kcwiki_id, "Mist02");
        assert!(!overrides.contains(1));
    }
}
