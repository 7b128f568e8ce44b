//! Error taxonomy for the conversion pipeline.
//!
//! Every variant is fatal to the stage that raises it; the pipeline never
//! retries. Stages committed before the failure stay committed.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Building into an existing path would clobber previous output.
    #[error("output database {0:?} already exists")]
    DatabaseExists(PathBuf),

    /// A required input table is absent from the csv directory.
    #[error("missing input table: {table}")]
    MissingInput { table: &'static str },

    /// A field that should hold an integer key did not parse.
    #[error("malformed value {value:?} in {table}")]
    Parse {
        table: &'static str,
        value: String,
    },

    /// A cross-reference points at an id that was never extracted. This
    /// means either corrupt input or a dependency-order violation.
    #[error("unresolved reference to id {id} in {table}")]
    Unresolved { table: &'static str, id: i64 },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
