//! Loading and reading nedb record stores.
//!
//! A nedb file holds one JSON object per line, each carrying an integer `id`.
//! [`RecordStore`] keeps the records in file order and indexes them by id;
//! [`Fields`] gives typed, error-reporting access to a record's values.

pub mod keys;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ErrorKind, IResult};

/// A single nedb record.
pub type Record = serde_json::Map<String, Value>;

/// Records from one nedb file, keyed by their `id` and kept in file order.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    source: PathBuf,
    records: Vec<(i64, Record)>,
    index: HashMap<i64, usize>,
}

impl RecordStore {
    /// Load and parse a nedb file.
    pub fn load(path: impl AsRef<Path>) -> IResult<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading records");

        let file = File::open(path).map_err(|err| ErrorKind::Io {
            path: path.to_owned(),
            err,
        })?;
        let store = Self::from_reader(BufReader::new(file), path)?;

        info!(path = %path.display(), count = store.len(), "loaded records");
        Ok(store)
    }

    /// Parse nedb lines from any reader. `source` only names the input in errors.
    ///
    /// Blank lines are skipped. Every other line must be a JSON object with an
    /// integer `id`, otherwise the whole load fails.
    pub fn from_reader<R: BufRead>(reader: R, source: impl Into<PathBuf>) -> IResult<Self> {
        let source = source.into();
        let mut records = Vec::new();
        let mut index = HashMap::new();

        for (line_idx, line) in reader.lines().enumerate() {
            let line_num = line_idx + 1;
            let line = line.map_err(|err| ErrorKind::Io {
                path: source.clone(),
                err,
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let malformed = |detail: String| ErrorKind::MalformedInput {
                path: source.clone(),
                line: line_num,
                detail,
            };

            let value: Value = serde_json::from_str(&line)
                .map_err(|err| malformed(format!("invalid JSON: {err}")))?;
            let Value::Object(record) = value else {
                return Err(malformed("not a JSON object".to_string()));
            };
            let id = record
                .get(keys::ID)
                .and_then(as_int)
                .ok_or_else(|| malformed(format!("missing integer `{}`", keys::ID)))?;

            if let Some(&position) = index.get(&id) {
                warn!(path = %source.display(), line = line_num, id, "duplicate record id, replacing");
                records[position] = (id, record);
            } else {
                index.insert(id, records.len());
                records.push((id, record));
            }
        }

        Ok(Self {
            source,
            records,
            index,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn get(&self, id: i64) -> Option<&Record> {
        self.index.get(&id).map(|&position| &self.records[position].1)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in file order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &Record)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.records.iter().map(|(id, _)| *id)
    }

    /// Look up a record, failing with the store's name when it is missing.
    pub fn require(&self, store: &'static str, id: i64) -> IResult<&Record> {
        self.get(id)
            .ok_or(ErrorKind::UnknownReference { store, id })
    }
}

/// Integer value of a JSON number, accepting integral floats.
pub fn as_int(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

/// JavaScript-style truthiness, used where the source data leaves holes as
/// `""`, `0` or `null`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Typed view over a record. Errors name the dotted path of the offending key.
///
/// `null` is treated the same as an absent key.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    record: &'a Record,
    path: String,
}

impl<'a> Fields<'a> {
    pub fn new(record: &'a Record) -> Self {
        Self {
            record,
            path: String::new(),
        }
    }

    pub fn record(&self) -> &'a Record {
        self.record
    }

    fn key_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.record.get(key).filter(|value| !value.is_null())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn required(&self, key: &str) -> IResult<&'a Value> {
        self.get(key)
            .ok_or_else(|| ErrorKind::missing(self.key_path(key)))
    }

    pub fn int(&self, key: &str) -> IResult<i64> {
        as_int(self.required(key)?).ok_or_else(|| ErrorKind::unexpected(self.key_path(key), "an integer"))
    }

    pub fn opt_int(&self, key: &str) -> IResult<Option<i64>> {
        self.get(key)
            .map(|value| {
                as_int(value).ok_or_else(|| ErrorKind::unexpected(self.key_path(key), "an integer"))
            })
            .transpose()
    }

    pub fn str(&self, key: &str) -> IResult<&'a str> {
        self.required(key)?
            .as_str()
            .ok_or_else(|| ErrorKind::unexpected(self.key_path(key), "a string"))
    }

    pub fn list(&self, key: &str) -> IResult<&'a [Value]> {
        self.required(key)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| ErrorKind::unexpected(self.key_path(key), "a list"))
    }

    pub fn opt_list(&self, key: &str) -> IResult<Option<&'a [Value]>> {
        self.get(key)
            .map(|value| {
                value
                    .as_array()
                    .map(Vec::as_slice)
                    .ok_or_else(|| ErrorKind::unexpected(self.key_path(key), "a list"))
            })
            .transpose()
    }

    pub fn int_list(&self, key: &str) -> IResult<Vec<i64>> {
        self.list(key)?
            .iter()
            .map(|value| {
                as_int(value)
                    .ok_or_else(|| ErrorKind::unexpected(self.key_path(key), "a list of integers"))
            })
            .collect()
    }

    pub fn nested(&self, key: &str) -> IResult<Fields<'a>> {
        self.opt_nested(key)?
            .ok_or_else(|| ErrorKind::missing(self.key_path(key)))
    }

    pub fn opt_nested(&self, key: &str) -> IResult<Option<Fields<'a>>> {
        self.get(key)
            .map(|value| {
                value
                    .as_object()
                    .map(|record| Fields {
                        record,
                        path: self.key_path(key),
                    })
                    .ok_or_else(|| ErrorKind::unexpected(self.key_path(key), "an object"))
            })
            .transpose()
    }

    /// Truthiness of an optional flag; absent means false.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_truthy)
    }
}
