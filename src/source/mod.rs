use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, warn};

use crate::person::{self, Person, PersonRecord};

pub const DEFAULT_ENDPOINT: &str = "https://willowtreeapps.com/api/v1.0/profiles";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to fetch person list (status {status})")]
    FetchFailed { status: u16 },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode person list: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug)]
pub struct SourceOptions {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub proxy: Option<String>,
    pub headshot_scheme: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            proxy: None,
            headshot_scheme: person::DEFAULT_HEADSHOT_SCHEME.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DataSource {
    client: reqwest::Client,
    endpoint: String,
    headshot_scheme: String,
}

impl DataSource {
    pub fn new(options: SourceOptions) -> Result<Self, SourceError> {
        let client = build_client(&options)?;
        Ok(Self {
            client,
            endpoint: options.endpoint,
            headshot_scheme: options.headshot_scheme,
        })
    }

    pub fn with_client(client: reqwest::Client, endpoint: &str, headshot_scheme: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            headshot_scheme: headshot_scheme.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issues a single GET to the endpoint. Only a 200 counts as success.
    pub async fn fetch_person_list(&self) -> Result<Vec<Person>, SourceError> {
        debug!(endpoint = %self.endpoint, "fetching person list");
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|source| SourceError::Transport {
                url: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "person list request was not successful");
            return Err(SourceError::FetchFailed {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| SourceError::Transport {
                url: self.endpoint.clone(),
                source,
            })?;
        let people = parse_person_list(&body, &self.headshot_scheme)?;
        debug!(count = people.len(), "person list decoded");
        Ok(people)
    }
}

pub fn parse_person_list(body: &str, headshot_scheme: &str) -> Result<Vec<Person>, SourceError> {
    let records: Vec<PersonRecord> =
        serde_json::from_str(body).map_err(|source| SourceError::Decode { source })?;
    Ok(person::people_from_records(records, headshot_scheme))
}

pub async fn fetch_person_list(options: SourceOptions) -> Result<Vec<Person>, SourceError> {
    DataSource::new(options)?.fetch_person_list().await
}

fn build_client(options: &SourceOptions) -> Result<reqwest::Client, SourceError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        )),
    );
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .timeout(Duration::from_secs(options.timeout_seconds));

    if let Some(proxy_url) = options.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
        let proxy = reqwest::Proxy::all(proxy_url).map_err(|source| SourceError::ProxySetup {
            proxy: proxy_url.to_string(),
            source,
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|source| SourceError::HttpClientBuild { source })
}
