use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid object id: {0}")]
    InvalidObjectId(String),
    #[error("invalid mode: {0}")]
    InvalidMode(String),
}
