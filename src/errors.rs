use thiserror::Error;

pub type Result<T> = std::result::Result<T, EmmetIoError>;

#[derive(Error, Debug)]
pub enum EmmetIoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Path error: {0}")]
    Path(String),
    /// The only failure the host sees through read completions.
    #[error("Unable to read file")]
    Unreadable { path: String },
    #[error("Remote resources are read-only: {0}")]
    RemoteWrite(String),
    #[error("Remote error: {0}")]
    Remote(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Parsing error")]
    Parse,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for EmmetIoError {
    fn from(_: serde_json::Error) -> Self {
        Self::Parse
    }
}

impl EmmetIoError {
    /// Collapse any read failure into the message the host understands.
    pub fn unreadable(path: impl Into<String>, cause: &EmmetIoError) -> Self {
        let path = path.into();
        log::debug!("reading {} failed: {}", path, cause);
        Self::Unreadable { path }
    }
}
