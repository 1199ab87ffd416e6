//! Field transformers: each derives one part of a [`ShipRecord`] from the
//! source ship record plus the other stores and lookup tables.
//!
//! [`ShipRecord`]: crate::ship::ShipRecord

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, error};

use crate::error::{ErrorKind, IResult};
use crate::nedb::{Fields, Record, RecordStore, as_int, is_truthy, keys};
use crate::ship::{GetMethod, Remodel, ShipClass, ShipNames, ShipStats, StatDelta, StatRange};
use crate::tables::{OverrideTable, ShipTypeTable, WikiShipType};

/// WhoCallTheFleet ship id -> KcWiki id.
pub type KcwikiIdTable = HashMap<i64, String>;

/// A ship record from the source store, paired with its id.
#[derive(Debug, Clone)]
pub struct SourceShip<'a> {
    pub id: i64,
    pub fields: Fields<'a>,
}

impl<'a> SourceShip<'a> {
    pub fn new(id: i64, record: &'a Record) -> Self {
        Self {
            id,
            fields: Fields::new(record),
        }
    }

    /// Base Chinese name for diagnostics, without any suffix.
    pub fn display_name(&self) -> String {
        self.fields
            .get(keys::NAME)
            .and_then(|name| name.get(keys::ZH_CN))
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>")
            .to_string()
    }

    fn remodel_links(&self) -> IResult<Option<Fields<'a>>> {
        self.fields.opt_nested(keys::REMODEL)
    }
}

pub fn illustration_number(ship: &SourceShip) -> IResult<i64> {
    ship.fields.int(keys::NO)
}

/// Japanese and Chinese names get the suffix appended; kana is left alone.
pub fn names(ship: &SourceShip, name_suffixes: &RecordStore) -> IResult<ShipNames> {
    let name = ship.fields.nested(keys::NAME)?;

    let (suffix_ja, suffix_zh) = match name.opt_int(keys::SUFFIX)? {
        Some(suffix_id) => {
            let suffix = Fields::new(name_suffixes.require("name suffix", suffix_id)?);
            (suffix.str(keys::JA_JP)?, suffix.str(keys::ZH_CN)?)
        }
        None => ("", ""),
    };

    Ok(ShipNames {
        ja_jp: format!("{}{suffix_ja}", name.str(keys::JA_JP)?),
        ja_kana: name.str(keys::JA_KANA)?.to_string(),
        zh_cn: format!("{}{suffix_zh}", name.str(keys::ZH_CN)?),
    })
}

pub fn ship_type(ship: &SourceShip, ship_types: &ShipTypeTable) -> IResult<WikiShipType> {
    ship_types.lookup(ship.fields.int(keys::TYPE)?)
}

pub fn class(ship: &SourceShip, classes: &RecordStore) -> IResult<ShipClass> {
    let class_id = ship.fields.int(keys::CLASS)?;
    let class = Fields::new(classes.require("ship class", class_id)?);

    Ok(ShipClass {
        name: class.nested(keys::NAME)?.str(keys::ZH_CN)?.to_string(),
        number: ship.fields.opt_int(keys::CLASS_NO)?,
    })
}

pub fn stats(ship: &SourceShip) -> IResult<ShipStats> {
    let stat = ship.fields.nested(keys::STAT)?;
    let pair = |name: &str| -> IResult<StatRange> {
        Ok(StatRange(
            stat.int(name)?,
            stat.int(&format!("{name}{}", keys::MAX_SUFFIX))?,
        ))
    };

    Ok(ShipStats {
        hp: pair("hp")?,
        fire: pair("fire")?,
        torpedo: pair("torpedo")?,
        aa: pair("aa")?,
        armor: pair("armor")?,
        asw: pair("asw")?,
        evasion: pair("evasion")?,
        los: pair("los")?,
        luck: pair("luck")?,
        speed: stat.int(keys::SPEED)?,
        range: stat.int(keys::RANGE)?,
        carry: stat.int(keys::CARRY)?,
    })
}

/// Rarity may only be missing on override ships. An explicit `null` is kept
/// as no rarity.
pub fn rarity(ship: &SourceShip, overrides: &OverrideTable) -> IResult<Option<i64>> {
    match ship.fields.record().get(keys::RARE) {
        Some(Value::Null) => Ok(None),
        Some(rare) => as_int(rare)
            .map(Some)
            .ok_or_else(|| ErrorKind::unexpected(keys::RARE, "an integer")),
        None if overrides.contains(ship.id) => Ok(None),
        None => {
            error!(
                ship_id = ship.id,
                name = %ship.display_name(),
                "failed to get rarity value"
            );
            Err(ErrorKind::missing(keys::RARE))
        }
    }
}

/// Plane capacity per slot. WhoCallTheFleet writes 0 for a slot that cannot
/// carry planes, KcWiki writes -1.
pub fn slots(ship: &SourceShip) -> IResult<Vec<i64>> {
    Ok(ship
        .fields
        .int_list(keys::SLOT)?
        .into_iter()
        .map(|capacity| if capacity > 0 { capacity } else { -1 })
        .collect())
}

/// Initial equipment per slot, `-1` where the slot starts empty.
///
/// Some ships store an empty list rather than one entry per slot.
pub fn equipment(ship: &SourceShip, nslots: usize) -> IResult<Vec<i64>> {
    let equip = ship.fields.opt_list(keys::EQUIP)?.unwrap_or_default();
    if equip.is_empty() {
        return Ok(vec![-1; nslots]);
    }

    equip
        .iter()
        .map(|item| {
            if !is_truthy(item) {
                Ok(-1)
            } else {
                as_int(item)
                    .ok_or_else(|| ErrorKind::unexpected(keys::EQUIP, "a list of equipment ids"))
            }
        })
        .collect()
}

/// Assigns the KcWiki id.
///
/// Suffixed remodels that reuse the previous stage's artwork share its number
/// with an `a` appended. The source sometimes forgets `illust_same_as_prev`
/// on these; an illustration number past the end of the ship list gives them
/// away.
pub fn kcwiki_id(ship: &SourceShip, ships: &RecordStore, overrides: &OverrideTable) -> IResult<String> {
    if let Some(ship_override) = overrides.get(ship.id) {
        return Ok(ship_override.kcwiki_id.to_string());
    }

    let no = illustration_number(ship)?;
    if !ship.fields.nested(keys::NAME)?.contains(keys::SUFFIX) {
        return Ok(format!("{no:03}"));
    }

    let beyond_ship_list = no > ships.len() as i64;
    if ship.fields.flag(keys::ILLUST_SAME_AS_PREV) || beyond_ship_list {
        let prev_id = ship
            .remodel_links()?
            .ok_or_else(|| ErrorKind::missing(keys::REMODEL))?
            .int(keys::REMODEL_PREV)?;
        let prev = Fields::new(ships.require("ship", prev_id)?);
        return Ok(format!("{:03}a", prev.int(keys::NO)?));
    }

    Ok(format!("{no:03}"))
}

/// Copied as stored, `null` included.
pub fn consumption(ship: &SourceShip) -> IResult<Value> {
    ship.fields
        .record()
        .get(keys::CONSUM)
        .cloned()
        .ok_or_else(|| ErrorKind::missing(keys::CONSUM))
}

fn stat_delta(ship: &SourceShip, key: &str, replacement: Option<StatDelta>) -> IResult<StatDelta> {
    match replacement {
        Some(delta) => Ok(delta),
        None => Ok(StatDelta::from_slice(&ship.fields.int_list(key)?)),
    }
}

pub fn modernization(ship: &SourceShip, overrides: &OverrideTable) -> IResult<StatDelta> {
    stat_delta(
        ship,
        keys::MODERNIZATION,
        overrides.get(ship.id).map(|o| o.modernization),
    )
}

pub fn scrap(ship: &SourceShip, overrides: &OverrideTable) -> IResult<StatDelta> {
    stat_delta(ship, keys::SCRAP, overrides.get(ship.id).map(|o| o.scrap))
}

/// Drops and construction are not modeled by the source data, so both stay
/// unavailable.
pub fn get_method(ship: &SourceShip, overrides: &OverrideTable) -> IResult<GetMethod> {
    if overrides.contains(ship.id) {
        return Ok(GetMethod::UNAVAILABLE);
    }

    let has_prev = ship
        .remodel_links()?
        .is_some_and(|links| links.contains(keys::REMODEL_PREV));

    Ok(GetMethod {
        drop: -1,
        remodel: if has_prev { 1 } else { -1 },
        build: -1,
        buildtime: ship.fields.opt_int(keys::BUILDTIME)?,
    })
}

/// Voice actor and illustrator display names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credits {
    pub cv: Option<String>,
    pub illustrator: Option<String>,
}

/// Resolves the voice actor and illustrator through the entity store.
///
/// A ship without one of the relationships simply goes without that name.
/// A relationship pointing at an unknown entity is an error.
pub fn credits(ship: &SourceShip, entities: &RecordStore) -> IResult<Credits> {
    let Some(rels) = ship.fields.opt_nested(keys::RELS)? else {
        debug!(ship_id = ship.id, "no relationships, skipping cv and illustrator");
        return Ok(Credits::default());
    };

    let resolve = |relationship: &'static str| -> IResult<Option<String>> {
        let Some(entity_id) = rels.opt_int(relationship)? else {
            debug!(ship_id = ship.id, relationship, "relationship absent, skipping");
            return Ok(None);
        };
        let entity = Fields::new(entities.require("entity", entity_id)?);
        Ok(Some(entity.nested(keys::NAME)?.str(keys::ZH_CN)?.to_string()))
    };

    Ok(Credits {
        cv: resolve(keys::REL_CV)?,
        illustrator: resolve(keys::REL_ILLUSTRATOR)?,
    })
}

/// Level and KcWiki id of the next remodel stage, if there is one.
pub fn remodel(ship: &SourceShip, kcwiki_ids: &KcwikiIdTable) -> IResult<Option<Remodel>> {
    let Some(links) = ship.remodel_links()? else {
        return Ok(None);
    };
    let Some(next) = links.opt_int(keys::REMODEL_NEXT)? else {
        return Ok(None);
    };

    let next_kcwiki_id = kcwiki_ids
        .get(&next)
        .cloned()
        .ok_or(ErrorKind::UnresolvedRemodel { target: next })?;

    Ok(Some(Remodel {
        level: links.int(keys::REMODEL_NEXT_LVL)?,
        next_kcwiki_id,
    }))
}
