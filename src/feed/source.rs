// Remote catalog source
use super::error::LoadError;
use crate::models::{CatalogPayload, ConfigError, Settings};
use std::time::Duration;
use url::Url;

/// Something that can produce a fresh catalog. The loader only ever talks to
/// the network through this trait.
pub trait CatalogSource: Send + Sync {
    fn fetch(&self) -> Result<CatalogPayload, LoadError>;

    fn describe(&self) -> String {
        String::from("catalog source")
    }
}

/// `GET {api_url}/free-games` over HTTP.
pub struct HttpCatalogSource {
    agent: ureq::Agent,
    endpoint: Url,
}

impl HttpCatalogSource {
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            agent: builder.build(),
            endpoint,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let timeout = settings.request_timeout_secs.map(Duration::from_secs);
        Ok(Self::new(settings.endpoint()?, timeout))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl CatalogSource for HttpCatalogSource {
    fn fetch(&self) -> Result<CatalogPayload, LoadError> {
        let response = match self.agent.get(self.endpoint.as_str()).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => return Err(LoadError::Server { code }),
            Err(ureq::Error::Transport(transport)) => {
                return Err(LoadError::network(transport.to_string()))
            }
        };

        // ureq only errors on 4xx/5xx; anything else outside 2xx is still a failure
        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(LoadError::Server { code: status });
        }

        let body = response
            .into_string()
            .map_err(|e| LoadError::network(format!("failed to read response body: {}", e)))?;

        CatalogPayload::from_json(&body).map_err(|e| LoadError::malformed(e.to_string()))
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }
}
