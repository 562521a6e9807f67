use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to open document: {0}")]
    Open(String),

    #[error("failed to read page count: {0}")]
    PageCount(String),
}
