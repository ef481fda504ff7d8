use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatterError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to produce JSON: {0}")]
    Json(#[from] serde_json::Error),
}
