//! Constants for WhoCallTheFleet nedb record keys.

// Identity
pub const ID: &str = "id";
pub const NO: &str = "no";

// Names
pub const NAME: &str = "name";
pub const JA_JP: &str = "ja_jp";
pub const JA_KANA: &str = "ja_kana";
pub const ZH_CN: &str = "zh_cn";
pub const SUFFIX: &str = "suffix";

// Classification
pub const TYPE: &str = "type";
pub const CLASS: &str = "class";
pub const CLASS_NO: &str = "class_no";
pub const RARE: &str = "rare";

// Stat block and its fields
pub const STAT: &str = "stat";
pub const SPEED: &str = "speed";
pub const RANGE: &str = "range";
pub const CARRY: &str = "carry";

/// Suffix appended to a paired stat name for its maximum.
pub const MAX_SUFFIX: &str = "_max";

// Loadout
pub const SLOT: &str = "slot";
pub const EQUIP: &str = "equip";
pub const CONSUM: &str = "consum";

// Feeding values
pub const MODERNIZATION: &str = "modernization";
pub const SCRAP: &str = "scrap";

// Acquisition
pub const BUILDTIME: &str = "buildtime";
pub const ILLUST_SAME_AS_PREV: &str = "illust_same_as_prev";

// Remodel links
pub const REMODEL: &str = "remodel";
pub const REMODEL_PREV: &str = "prev";
pub const REMODEL_NEXT: &str = "next";
pub const REMODEL_NEXT_LVL: &str = "next_lvl";

// Relationships into the entity store
pub const RELS: &str = "rels";
pub const REL_CV: &str = "cv";
pub const REL_ILLUSTRATOR: &str = "illustrator";
