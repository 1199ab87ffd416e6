/// Writers for converted ships (debug dump, JSON Lines, Lua module)
pub mod emit;
/// Error definitions
pub mod error;
/// Reading WhoCallTheFleet's line-delimited JSON record stores
pub mod nedb;
/// Loading the database and driving a full conversion
pub mod pipeline;
/// KcWiki ship record types
pub mod ship;
/// Static ship type and override tables
pub mod tables;
/// Per-field conversions from WhoCallTheFleet records to KcWiki fields
pub mod transform;

#[cfg(test)]
mod testing;

pub use pipeline::{Converter, Database, convert_database};
pub use ship::ShipRecord;
pub use tables::Tables;
