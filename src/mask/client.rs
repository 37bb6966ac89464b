use std::time::Duration;

use async_trait::async_trait;

use super::models::StoresByGeo;
use super::SearchRequest;

/// Errors that can occur while querying the mask stock API.
#[derive(Debug)]
pub enum LookupError {
    /// The request did not complete within the configured timeout.
    Timeout,
    /// Network or HTTP-level error from reqwest.
    Network(reqwest::Error),
    /// The API answered with a non-success status.
    Status(reqwest::StatusCode),
    /// The response JSON could not be deserialized into the expected type.
    Deserialize(String),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::Timeout => write!(f, "API 응답 시간이 초과되었습니다"),
            LookupError::Network(e) => write!(f, "API 서버에 연결할 수 없습니다: {e}"),
            LookupError::Status(status) => write!(f, "API 오류 응답: {status}"),
            LookupError::Deserialize(msg) => {
                write!(f, "응답 처리 중 오류가 발생했습니다: {msg}")
            }
        }
    }
}

impl std::error::Error for LookupError {}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LookupError::Timeout
        } else {
            LookupError::Network(e)
        }
    }
}

/// Source of nearby store listings.
#[async_trait]
pub trait StoreLookup: Send + Sync {
    async fn stores_by_geo(&self, request: &SearchRequest) -> Result<StoresByGeo, LookupError>;
}

/// HTTP client for the public mask stock API.
pub struct MaskApi {
    client: reqwest::Client,
    base_url: String,
}

impl MaskApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/storesByGeo/json", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl StoreLookup for MaskApi {
    async fn stores_by_geo(&self, request: &SearchRequest) -> Result<StoresByGeo, LookupError> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&query_params(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| LookupError::Deserialize(e.to_string()))
    }
}

fn query_params(request: &SearchRequest) -> [(&'static str, String); 3] {
    [
        ("lat", request.latitude.to_string()),
        ("lng", request.longitude.to_string()),
        ("m", request.radius.to_string()),
    ]
}
