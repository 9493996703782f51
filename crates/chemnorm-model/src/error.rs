use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("canonical form must not be blank")]
    BlankCanonicalForm,
    #[error("unknown column header: {0}")]
    UnknownColumn(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
