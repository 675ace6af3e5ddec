use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegenError {
    /// The pattern was rejected by `regex-syntax`; the parser's error is kept as-is.
    #[error(transparent)]
    Parse(#[from] regex_syntax::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error in {file}: {source}")]
    Toml {
        file: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RegenError>;

impl RegenError {
    pub fn toml(file: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        RegenError::Toml {
            file: file.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        RegenError::Config(message.into())
    }
}
