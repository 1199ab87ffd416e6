//! Drives a conversion: load the four nedb stores, assign every ship its
//! KcWiki id, then convert the ships one by one in store order.

use std::path::Path;

use rootcause::prelude::*;
use tracing::{debug, info};

use crate::emit::ShipEmitter;
use crate::error::{ErrorKind, IResult};
use crate::nedb::{Record, RecordStore};
use crate::ship::ShipRecord;
use crate::tables::Tables;
use crate::transform::{self, KcwikiIdTable, SourceShip};

pub const SHIPS_FILE: &str = "ships.nedb";
pub const ENTITIES_FILE: &str = "entities.nedb";
pub const NAME_SUFFIXES_FILE: &str = "ship_namesuffix.nedb";
pub const CLASSES_FILE: &str = "ship_classes.nedb";

/// The four WhoCallTheFleet stores a conversion reads.
#[derive(Debug, Clone, Default)]
pub struct Database {
    pub ships: RecordStore,
    /// Voice actors and illustrators.
    pub entities: RecordStore,
    pub name_suffixes: RecordStore,
    pub classes: RecordStore,
}

impl Database {
    /// Load every store from `dir`. Nothing is returned unless all four parse.
    pub fn load(dir: impl AsRef<Path>) -> IResult<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            ships: RecordStore::load(dir.join(SHIPS_FILE))?,
            entities: RecordStore::load(dir.join(ENTITIES_FILE))?,
            name_suffixes: RecordStore::load(dir.join(NAME_SUFFIXES_FILE))?,
            classes: RecordStore::load(dir.join(CLASSES_FILE))?,
        })
    }
}

/// Converts ships from a loaded [`Database`].
///
/// KcWiki ids for every ship are assigned up front, so remodel links resolve
/// regardless of where the next stage sits in the ship store.
pub struct Converter<'a> {
    db: &'a Database,
    tables: &'a Tables,
    kcwiki_ids: KcwikiIdTable,
}

impl<'a> Converter<'a> {
    pub fn new(db: &'a Database, tables: &'a Tables) -> IResult<Self> {
        let mut kcwiki_ids = KcwikiIdTable::with_capacity(db.ships.len());
        for (id, record) in db.ships.iter() {
            let ship = SourceShip::new(id, record);
            let kcwiki_id = transform::kcwiki_id(&ship, &db.ships, &tables.overrides)
                .map_err(|err| err.for_ship(id, ship.display_name()))?;
            kcwiki_ids.insert(id, kcwiki_id);
        }
        debug!(count = kcwiki_ids.len(), "assigned KcWiki ids");

        Ok(Self {
            db,
            tables,
            kcwiki_ids,
        })
    }

    pub fn kcwiki_ids(&self) -> &KcwikiIdTable {
        &self.kcwiki_ids
    }

    /// Convert one ship record. Errors carry the ship's id and name.
    pub fn convert_ship(&self, id: i64, record: &Record) -> IResult<ShipRecord> {
        let ship = SourceShip::new(id, record);
        self.build(&ship)
            .map_err(|err| err.for_ship(id, ship.display_name()))
    }

    fn build(&self, ship: &SourceShip) -> IResult<ShipRecord> {
        let db = self.db;
        let overrides = &self.tables.overrides;

        let no = transform::illustration_number(ship)?;
        let names = transform::names(ship, &db.name_suffixes)?;
        let ship_type = transform::ship_type(ship, &self.tables.ship_types)?;
        let class = transform::class(ship, &db.classes)?;
        let stats = transform::stats(ship)?;
        let rare = transform::rarity(ship, overrides)?;
        let slot = transform::slots(ship)?;
        let equip = transform::equipment(ship, slot.len())?;
        let consum = transform::consumption(ship)?;
        let modernization = transform::modernization(ship, overrides)?;
        let scrap = transform::scrap(ship, overrides)?;
        let kcwiki_id = match self.kcwiki_ids.get(&ship.id) {
            Some(kcwiki_id) => kcwiki_id.clone(),
            None => transform::kcwiki_id(ship, &db.ships, overrides)?,
        };
        let get_method = transform::get_method(ship, overrides)?;
        let credits = transform::credits(ship, &db.entities)?;
        let remodel = transform::remodel(ship, &self.kcwiki_ids)?;

        debug!(ship_id = ship.id, kcwiki_id = %kcwiki_id, "converted ship");

        Ok(ShipRecord::builder()
            .id(ship.id)
            .no(no)
            .kcwiki_id(kcwiki_id)
            .names(names)
            .ship_type(ship_type)
            .class(class)
            .maybe_rare(rare)
            .stats(stats)
            .nslots(slot.len())
            .slot(slot)
            .equip(equip)
            .consum(consum)
            .modernization(modernization)
            .scrap(scrap)
            .get_method(get_method)
            .maybe_cv(credits.cv)
            .maybe_illustrator(credits.illustrator)
            .maybe_remodel(remodel)
            .build())
    }

    /// Lazily convert every ship in store order.
    pub fn ships(&self) -> impl Iterator<Item = IResult<ShipRecord>> + '_ {
        self.db
            .ships
            .iter()
            .map(|(id, record)| self.convert_ship(id, record))
    }

    /// Convert every ship, stopping at the first failure.
    pub fn convert_all(&self) -> IResult<Vec<ShipRecord>> {
        self.ships().collect()
    }

    /// Convert every ship and hand each to `emitter` as soon as it is done.
    /// Returns the number of ships emitted.
    pub fn run<E: ShipEmitter + ?Sized>(&self, emitter: &mut E) -> IResult<usize> {
        emitter.begin().map_err(ErrorKind::Output)?;

        let mut count = 0;
        for ship in self.ships() {
            emitter.emit(&ship?).map_err(ErrorKind::Output)?;
            count += 1;
        }

        emitter.finish().map_err(ErrorKind::Output)?;
        info!(count, "converted ships");
        Ok(count)
    }
}

/// Load the database in `db_dir` and stream every converted ship into `emitter`.
pub fn convert_database<E: ShipEmitter + ?Sized>(
    db_dir: &Path,
    tables: &Tables,
    emitter: &mut E,
) -> Result<usize, Report> {
    let db = Database::load(db_dir)
        .context_with(|| format!("Failed to load nedb database from {}", db_dir.display()))?;
    let converter = Converter::new(&db, tables).context("Failed to assign KcWiki ids")?;
    let count = converter.run(emitter).context("Failed to convert ships")?;
    Ok(count)
}
