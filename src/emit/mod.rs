//! Writers for converted ships.

#[cfg(feature = "json")]
pub mod json;
pub mod lua;

use std::io::{self, Write};

use crate::ship::ShipRecord;

#[cfg(feature = "json")]
pub use json::JsonLines;
pub use lua::LuaModule;

/// Receives converted ships one at a time.
pub trait ShipEmitter {
    /// Called once before the first ship.
    fn begin(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn emit(&mut self, ship: &ShipRecord) -> io::Result<()>;

    /// Called once after the last ship, only if every ship converted.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Pretty-printed `Debug` output, one blank-line separated block per ship.
pub struct DebugDump<W> {
    writer: W,
}

impl<W: Write> DebugDump<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ShipEmitter for DebugDump<W> {
    fn emit(&mut self, ship: &ShipRecord) -> io::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{ship:#?}")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
