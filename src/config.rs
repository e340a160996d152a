use crate::error::{ProxyError, Result};

pub const API_KEY_ENV: &str = "API_DATA_GOV_KEY";

pub const ECHO_BASE_URL: &str = "https://echodata.epa.gov/echo";
pub const FRS_BASE_URL: &str = "https://api.epa.gov/frs";

/// Host that receives the api.data.gov key in pass-through mode.
pub const PRIMARY_HOST: &str = "api.epa.gov";

/// Hosts a caller may name with `url=`.
pub const PASS_THROUGH_HOSTS: [&str; 3] = [PRIMARY_HOST, "echo.epa.gov", "data.epa.gov"];

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    api_key: Option<String>,
    echo_base: String,
    frs_base: String,
}

impl ProxyConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            echo_base: ECHO_BASE_URL.to_string(),
            frs_base: FRS_BASE_URL.to_string(),
        }
    }

    /// Reads the key on every call. A missing key is reported later, per request.
    pub fn from_env() -> Self {
        Self::new(std::env::var(API_KEY_ENV).ok())
    }

    pub fn with_echo_base(mut self, base: impl Into<String>) -> Self {
        self.echo_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_frs_base(mut self, base: impl Into<String>) -> Self {
        self.frs_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(ProxyError::MissingApiKey)
    }

    pub fn echo_base(&self) -> &str {
        &self.echo_base
    }

    pub fn frs_base(&self) -> &str {
        &self.frs_base
    }
}

pub fn is_pass_through_host(host: &str) -> bool {
    PASS_THROUGH_HOSTS
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(host))
}
