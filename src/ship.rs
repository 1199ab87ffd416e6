//! KcWiki-side ship records produced by the converter.

use bon::Builder;
use serde_json::Value;

use crate::tables::WikiShipType;

/// Names in the three locales KcWiki tracks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShipNames {
    pub ja_jp: String,
    pub ja_kana: String,
    pub zh_cn: String,
}

/// Ship class name and the ship's number within that class.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShipClass {
    pub name: String,
    pub number: Option<i64>,
}

/// A stat's value at level 1 and at its cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatRange(pub i64, pub i64);

impl StatRange {
    pub fn base(self) -> i64 {
        self.0
    }

    pub fn max(self) -> i64 {
        self.1
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShipStats {
    pub hp: StatRange,
    pub fire: StatRange,
    pub torpedo: StatRange,
    pub aa: StatRange,
    pub armor: StatRange,
    pub asw: StatRange,
    pub evasion: StatRange,
    pub los: StatRange,
    pub luck: StatRange,
    pub speed: i64,
    pub range: i64,
    pub carry: i64,
}

impl ShipStats {
    /// Paired stats in KcWiki field order.
    pub fn pairs(&self) -> [(&'static str, StatRange); 9] {
        [
            ("hp", self.hp),
            ("fire", self.fire),
            ("torpedo", self.torpedo),
            ("aa", self.aa),
            ("armor", self.armor),
            ("asw", self.asw),
            ("evasion", self.evasion),
            ("los", self.los),
            ("luck", self.luck),
        ]
    }
}

/// Stat gains granted when the ship is fed for modernization, or the
/// positional scrap values, keyed by KcWiki's four stat names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatDelta {
    pub fire: i64,
    pub torpedo: i64,
    pub aa: i64,
    pub armor: i64,
}

impl StatDelta {
    pub const NAMES: [&'static str; 4] = ["fire", "torpedo", "aa", "armor"];

    /// Map a positional list onto the named stats. Missing trailing values
    /// are zero, extra values are ignored.
    pub fn from_slice(values: &[i64]) -> Self {
        let at = |idx: usize| values.get(idx).copied().unwrap_or(0);
        Self {
            fire: at(0),
            torpedo: at(1),
            aa: at(2),
            armor: at(3),
        }
    }

    pub fn to_array(self) -> [i64; 4] {
        [self.fire, self.torpedo, self.aa, self.armor]
    }

    pub fn named(self) -> impl Iterator<Item = (&'static str, i64)> {
        Self::NAMES.into_iter().zip(self.to_array())
    }
}

/// How the ship can be obtained. `-1` marks a method as unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GetMethod {
    pub drop: i64,
    pub remodel: i64,
    pub build: i64,
    pub buildtime: Option<i64>,
}

impl GetMethod {
    pub const UNAVAILABLE: GetMethod = GetMethod {
        drop: -1,
        remodel: -1,
        build: -1,
        buildtime: Some(-1),
    };
}

/// Link to the next remodel stage.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Remodel {
    pub level: i64,
    pub next_kcwiki_id: String,
}

/// A fully converted ship.
#[derive(Builder, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShipRecord {
    /// WhoCallTheFleet id.
    pub id: i64,
    /// Illustration number.
    pub no: i64,
    pub kcwiki_id: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub names: ShipNames,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub ship_type: WikiShipType,
    pub class: ShipClass,
    /// Absent only for the override ships.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub rare: Option<i64>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub stats: ShipStats,
    pub nslots: usize,
    /// Plane capacity per slot, `-1` where planes cannot be equipped.
    pub slot: Vec<i64>,
    /// Initial equipment ids per slot, `-1` where empty.
    pub equip: Vec<i64>,
    pub consum: Value,
    pub modernization: StatDelta,
    pub scrap: StatDelta,
    pub get_method: GetMethod,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub cv: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub illustrator: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub remodel: Option<Remodel>,
}
