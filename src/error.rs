use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ErrorKind {
    #[error("I/O error on {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("{path}: line {line}: {detail}")]
    MalformedInput {
        path: PathBuf,
        line: usize,
        detail: String,
    },
    #[error("missing field `{key}`")]
    MissingField { key: String },
    #[error("field `{key}` is not {expected}")]
    UnexpectedType { key: String, expected: &'static str },
    #[error("ship type {0} has no KcWiki equivalent")]
    UnmappedShipType(i64),
    #[error("no {store} record with id {id}")]
    UnknownReference { store: &'static str, id: i64 },
    #[error("remodel target {target} was never assigned a KcWiki id")]
    UnresolvedRemodel { target: i64 },
    #[error("failed to write converted ships: {0}")]
    Output(#[source] std::io::Error),
    #[error("ship {name} (id {id}): {source}")]
    Ship {
        id: i64,
        name: String,
        source: Box<ErrorKind>,
    },
}

impl ErrorKind {
    pub(crate) fn missing(key: impl Into<String>) -> Self {
        ErrorKind::MissingField { key: key.into() }
    }

    pub(crate) fn unexpected(key: impl Into<String>, expected: &'static str) -> Self {
        ErrorKind::UnexpectedType {
            key: key.into(),
            expected,
        }
    }

    /// Attaches the identity of the ship being converted.
    pub fn for_ship(self, id: i64, name: impl Into<String>) -> Self {
        match self {
            // Already carries an identity
            ErrorKind::Ship { .. } => self,
            other => ErrorKind::Ship {
                id,
                name: name.into(),
                source: Box::new(other),
            },
        }
    }

    /// Returns the innermost error, skipping ship context.
    pub fn root(&self) -> &ErrorKind {
        match self {
            ErrorKind::Ship { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type IResult<T> = Result<T, ErrorKind>;
