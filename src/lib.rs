pub mod cli;
pub mod db;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod registry;
pub mod schema;
pub mod source;

pub use cli::{Cli, Commands};
pub use error::{Error, Result};
pub use pipeline::{build, BuildSummary};
