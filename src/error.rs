use thiserror::Error;

use crate::config::{ConfigError, OutputFormat};
use crate::formatter::FormatterError;

/// Failures that stop a run. Problems in the module being read are never
/// errors: they travel as diagnostics inside the [`Module`](crate::Module).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("error producing {format} output: {source}")]
    Render {
        format: OutputFormat,
        #[source]
        source: FormatterError,
    },
}

pub type InternalResult<T> = Result<T, Error>;
