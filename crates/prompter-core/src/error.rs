use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Script parsing error: {0}")]
    ScriptParse(String),

    #[error("Script not found: {0}")]
    ScriptNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
