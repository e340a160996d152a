use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Missing env API_DATA_GOV_KEY")]
    MissingApiKey,
    #[error("Specify source=frs (preferred) or url=<https URL>")]
    NoMode,
    #[error("Host not allowed in pass-through url")]
    HostNotAllowed,
    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Upstream(#[from] reqwest::Error),
    #[error(transparent)]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ProxyError>;
