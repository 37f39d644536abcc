use ecoleta_shared::constants::{DEFAULT_HTTP_PORT, IBGE_LOCALIDADES_URL};

/// Where the page's two remote services live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the Ecoleta backend.
    pub api_url: String,
    /// Base URL of the IBGE "localidades" API.
    pub geography_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: format!("http://localhost:{DEFAULT_HTTP_PORT}"),
            geography_url: IBGE_LOCALIDADES_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }
}
