use std::time::Duration;

use futures_util::StreamExt;
use paydash_core::{Credential, FailureKind, Feed, FetchFailure, PayloadShape, Record};
use paydash_logging::dash_debug;
use serde_json::Value;
use url::Url;

use crate::payload::extract_records;

pub const DEFAULT_CREDENTIAL_PARAM: &str = "bearer_token";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    /// Query parameter carrying the bearer token.
    pub credential_param: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
            credential_param: DEFAULT_CREDENTIAL_PARAM.to_string(),
        }
    }
}

/// Where a feed lives and how to find its records in the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub collection: String,
    pub shape: PayloadShape,
}

impl Endpoint {
    pub fn new(url: impl Into<String>, collection: impl Into<String>, shape: PayloadShape) -> Self {
        Self {
            url: url.into(),
            collection: collection.into(),
            shape,
        }
    }

    pub fn for_feed(base_url: &str, feed: Feed) -> Self {
        Self::new(
            format!("{}{}", base_url.trim_end_matches('/'), feed.path()),
            feed.collection_field(),
            feed.shape(),
        )
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(
        &self,
        endpoint: &Endpoint,
        credential: &Credential,
    ) -> Result<Vec<Record>, FetchFailure>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchFailure> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| FetchFailure::new(FailureKind::Network, err.to_string()))
    }

    /// Issues a GET and decodes the body as JSON, enforcing status and size limits.
    pub(crate) async fn get_json(&self, url: Url) -> Result<Value, FetchFailure> {
        let client = self.build_client()?;
        let response = client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        dash_debug!("received {} bytes", bytes.len());

        serde_json::from_slice(&bytes).map_err(|err| {
            FetchFailure::new(FailureKind::MalformedPayload, format!("invalid json: {err}"))
        })
    }

    fn too_large(&self, actual: u64) -> FetchFailure {
        FetchFailure::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(
        &self,
        endpoint: &Endpoint,
        credential: &Credential,
    ) -> Result<Vec<Record>, FetchFailure> {
        let mut url = parse_url(&endpoint.url)?;
        url.query_pairs_mut()
            .append_pair(&self.settings.credential_param, &credential.token);

        let payload = self.get_json(url).await?;
        extract_records(payload, &endpoint.collection, endpoint.shape)
    }
}

pub(crate) fn parse_url(raw: &str) -> Result<Url, FetchFailure> {
    Url::parse(raw).map_err(|err| FetchFailure::new(FailureKind::InvalidUrl, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> FetchFailure {
    if err.is_timeout() {
        return FetchFailure::new(FailureKind::Timeout, err.to_string());
    }
    FetchFailure::new(FailureKind::Network, err.to_string())
}
