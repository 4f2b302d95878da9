//! reqwest-backed Turbopuffer client.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::types::{NamespaceInfo, NamespaceMetadata, RecallResult};
use crate::{NamespaceApi, regions};

/// HTTP client for the Turbopuffer API.
///
/// One client serves all regions: the base URL is derived per request
/// from the region, unless a fixed override is configured (useful for
/// proxies and test servers).
#[derive(Clone)]
pub struct TpuffClient {
    client: reqwest::Client,
    api_key: String,
    base_url_override: Option<String>,
}

impl TpuffClient {
    /// Build a client with the given API key and per-request timeout.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url_override: None,
        })
    }

    /// Route every request to a fixed base URL instead of the per-region
    /// endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    fn base_url(&self, region: &str) -> String {
        match &self.base_url_override {
            Some(url) => url.clone(),
            None => regions::api_base_url(region),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, region: &str, path: &str) -> ClientResult<T> {
        let url = format!("{}{path}", self.base_url(region));
        debug!(%url, "GET");
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        region: &str,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}{path}", self.base_url(region));
        debug!(%url, "POST");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.json::<T>().await?)
    }
}

#[derive(serde::Deserialize)]
struct ListNamespacesResponse {
    namespaces: Vec<NamespaceInfo>,
}

#[derive(Serialize)]
struct RecallRequest {
    num: u32,
    top_k: u32,
}

impl NamespaceApi for TpuffClient {
    async fn list_namespaces(&self, region: &str) -> ClientResult<Vec<NamespaceInfo>> {
        let resp: ListNamespacesResponse = self.get_json(region, "/v1/namespaces").await?;
        Ok(resp.namespaces)
    }

    async fn namespace_metadata(
        &self,
        region: &str,
        namespace: &str,
    ) -> ClientResult<NamespaceMetadata> {
        self.get_json(region, &format!("/v1/namespaces/{namespace}/metadata"))
            .await
    }

    async fn estimate_recall(
        &self,
        region: &str,
        namespace: &str,
        num: u32,
        top_k: u32,
    ) -> ClientResult<RecallResult> {
        self.post_json(
            region,
            &format!("/v1/namespaces/{namespace}/_debug/recall"),
            &RecallRequest { num, top_k },
        )
        .await
    }
}
