use thiserror::Error;

pub type QsResult<T> = Result<T, QsError>;

#[derive(Error, Debug)]
pub enum QsError {
    #[error("template text must not be empty")]
    InvalidTemplate,

    #[error("index {index} out of range for {len} templates")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("message body is empty")]
    EmptyBody,

    #[error("contact name must not be empty")]
    EmptyContactName,

    #[error("messaging unavailable: {0}")]
    ComposerUnavailable(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("http error: {0}")]
    Http(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for QsError {
    fn from(e: rusqlite::Error) -> Self {
        QsError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for QsError {
    fn from(e: serde_json::Error) -> Self {
        QsError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for QsError {
    fn from(e: toml::de::Error) -> Self {
        QsError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for QsError {
    fn from(e: toml::ser::Error) -> Self {
        QsError::Config(e.to_string())
    }
}

impl From<reqwest::Error> for QsError {
    fn from(e: reqwest::Error) -> Self {
        QsError::Http(e.to_string())
    }
}
