//! KcWiki Lua data module output.
//!
//! Ships are written as entries of a `ships` table keyed by KcWiki id, and
//! the module returns that table:
//!
//! ```lua
//! local ships = {}
//!
//! ships["006"] = {
//!     id = 83,
//!     hp = {69, 79},
//!     ...
//! }
//!
//! return ships
//! ```

use std::fmt;
use std::io::{self, Write};

use itertools::Itertools;
use serde_json::Value;

use crate::ship::{ShipRecord, StatDelta, StatRange};

use super::ShipEmitter;

const TABLE_NAME: &str = "ships";

const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// A Lua literal.
#[derive(Debug, Clone, PartialEq)]
pub enum LuaValue {
    Nil,
    Bool(bool),
    /// Already formatted numeral.
    Number(String),
    Str(String),
    Array(Vec<LuaValue>),
    Table(Vec<(String, LuaValue)>),
}

impl LuaValue {
    pub fn int(value: i64) -> Self {
        LuaValue::Number(value.to_string())
    }

    pub fn str(value: impl Into<String>) -> Self {
        LuaValue::Str(value.into())
    }

    pub fn opt_int(value: Option<i64>) -> Self {
        value.map_or(LuaValue::Nil, LuaValue::int)
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => LuaValue::Nil,
            Value::Bool(b) => LuaValue::Bool(*b),
            Value::Number(n) => LuaValue::Number(n.to_string()),
            Value::String(s) => LuaValue::Str(s.clone()),
            Value::Array(items) => LuaValue::Array(items.iter().map(LuaValue::from_json).collect()),
            Value::Object(fields) => LuaValue::Table(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), LuaValue::from_json(value)))
                    .collect(),
            ),
        }
    }
}

impl From<StatRange> for LuaValue {
    fn from(range: StatRange) -> Self {
        LuaValue::Array(vec![LuaValue::int(range.base()), LuaValue::int(range.max())])
    }
}

impl From<StatDelta> for LuaValue {
    fn from(delta: StatDelta) -> Self {
        LuaValue::Table(
            delta
                .named()
                .map(|(name, value)| (name.to_string(), LuaValue::int(value)))
                .collect(),
        )
    }
}

impl From<&[i64]> for LuaValue {
    fn from(values: &[i64]) -> Self {
        LuaValue::Array(values.iter().copied().map(LuaValue::int).collect())
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    starts_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !LUA_KEYWORDS.contains(&key)
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{{{:X}}}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

/// Table key: bare when it is a valid identifier, bracketed otherwise.
struct Key<'a>(&'a str);

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_identifier(self.0) {
            f.write_str(self.0)
        } else {
            f.write_str("[")?;
            write_string(f, self.0)?;
            f.write_str("]")
        }
    }
}

/// Inline rendering: `{1, 2}`, `{fuel = 75, ammo = 75}`.
impl fmt::Display for LuaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LuaValue::Nil => f.write_str("nil"),
            LuaValue::Bool(b) => write!(f, "{b}"),
            LuaValue::Number(n) => f.write_str(n),
            LuaValue::Str(s) => write_string(f, s),
            LuaValue::Array(items) => write!(f, "{{{}}}", items.iter().join(", ")),
            LuaValue::Table(fields) => write!(
                f,
                "{{{}}}",
                fields
                    .iter()
                    .map(|(key, value)| format!("{} = {value}", Key(key)))
                    .join(", ")
            ),
        }
    }
}

/// KcWiki field layout of a ship. Optional fields that are unset are left out.
pub fn ship_fields(ship: &ShipRecord) -> Vec<(String, LuaValue)> {
    let mut fields = vec![
        ("id".to_string(), LuaValue::int(ship.id)),
        ("no".to_string(), LuaValue::int(ship.no)),
        ("kcwiki_id".to_string(), LuaValue::str(&ship.kcwiki_id)),
        ("ja_jp".to_string(), LuaValue::str(&ship.names.ja_jp)),
        ("ja_kana".to_string(), LuaValue::str(&ship.names.ja_kana)),
        ("zh_cn".to_string(), LuaValue::str(&ship.names.zh_cn)),
        ("type".to_string(), LuaValue::int(ship.ship_type.raw().into())),
        (
            "class".to_string(),
            LuaValue::Array(vec![
                LuaValue::str(&ship.class.name),
                LuaValue::opt_int(ship.class.number),
            ]),
        ),
    ];

    if let Some(rare) = ship.rare {
        fields.push(("rare".to_string(), LuaValue::int(rare)));
    }

    fields.extend(
        ship.stats
            .pairs()
            .into_iter()
            .map(|(name, range)| (name.to_string(), LuaValue::from(range))),
    );
    fields.extend([
        ("speed".to_string(), LuaValue::int(ship.stats.speed)),
        ("range".to_string(), LuaValue::int(ship.stats.range)),
        ("carry".to_string(), LuaValue::int(ship.stats.carry)),
        ("nslots".to_string(), LuaValue::int(ship.nslots as i64)),
        ("slot".to_string(), LuaValue::from(ship.slot.as_slice())),
        ("equip".to_string(), LuaValue::from(ship.equip.as_slice())),
        ("consum".to_string(), LuaValue::from_json(&ship.consum)),
        ("modernization".to_string(), LuaValue::from(ship.modernization)),
        ("scrap".to_string(), LuaValue::from(ship.scrap)),
        (
            "get_method".to_string(),
            LuaValue::Table(vec![
                ("drop".to_string(), LuaValue::int(ship.get_method.drop)),
                ("remodel".to_string(), LuaValue::int(ship.get_method.remodel)),
                ("build".to_string(), LuaValue::int(ship.get_method.build)),
                (
                    "buildtime".to_string(),
                    LuaValue::opt_int(ship.get_method.buildtime),
                ),
            ]),
        ),
    ]);

    if let Some(cv) = &ship.cv {
        fields.push(("cv".to_string(), LuaValue::str(cv)));
    }
    if let Some(illustrator) = &ship.illustrator {
        fields.push(("illustrator".to_string(), LuaValue::str(illustrator)));
    }
    if let Some(remodel) = &ship.remodel {
        fields.push((
            "remodel".to_string(),
            LuaValue::Table(vec![
                ("level".to_string(), LuaValue::int(remodel.level)),
                (
                    "next_kcwiki_id".to_string(),
                    LuaValue::str(&remodel.next_kcwiki_id),
                ),
            ]),
        ));
    }

    fields
}

/// Writes a Lua module returning every ship keyed by KcWiki id.
pub struct LuaModule<W> {
    writer: W,
}

impl<W: Write> LuaModule<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ShipEmitter for LuaModule<W> {
    fn begin(&mut self) -> io::Result<()> {
        writeln!(self.writer, "local {TABLE_NAME} = {{}}")
    }

    fn emit(&mut self, ship: &ShipRecord) -> io::Result<()> {
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{TABLE_NAME}[{}] = {{",
            LuaValue::str(&ship.kcwiki_id)
        )?;
        for (key, value) in ship_fields(ship) {
            writeln!(self.writer, "    {} = {value},", Key(&key))?;
        }
        writeln!(self.writer, "}}")
    }

    fn finish(&mut self) -> io::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "return {TABLE_NAME}")?;
        self.writer.flush()
    }
}
