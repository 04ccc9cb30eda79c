//! REST client for CMDB resources

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{CoreError, CoreResult};
use crate::types::{BulkDeleteRequest, BulkDeleteResponse};

use super::error_decoding::decode_error_response;
use super::log_sanitizer::{mask_token, truncate_for_log};

/// Timeout used when the caller does not configure one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin typed wrapper over the CMDB REST API
///
/// Resource paths are relative to the base URL (`"assets"`, `"sites"`).
/// Every non-success response is decoded with [`decode_error_response`].
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> CoreResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| CoreError::Network(format!("Invalid API base URL '{base_url}': {e}")))?;
        // 确保 join 时保留最后一段路径
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        log::debug!("API token configured ({})", mask_token(&token));
        self.token = Some(token);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET {path}?{params}`
    pub async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &BTreeMap<String, String>,
    ) -> CoreResult<Vec<T>> {
        let mut url = self.endpoint(path)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        let text = self.send(Method::GET, url, None).await?;
        parse_json(&text)
    }

    /// `GET {path}/{id}`
    pub async fn get<T: DeserializeOwned>(&self, path: &str, id: &str) -> CoreResult<T> {
        let url = self.record(path, id)?;
        let text = self.send(Method::GET, url, None).await?;
        parse_json(&text)
    }

    /// `POST {path}`
    pub async fn create<B, T>(&self, path: &str, body: &B) -> CoreResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let body = serde_json::to_value(body)?;
        let text = self.send(Method::POST, url, Some(&body)).await?;
        parse_json(&text)
    }

    /// `PUT {path}/{id}`
    pub async fn update<B, T>(&self, path: &str, id: &str, body: &B) -> CoreResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.record(path, id)?;
        let body = serde_json::to_value(body)?;
        let text = self.send(Method::PUT, url, Some(&body)).await?;
        parse_json(&text)
    }

    /// `DELETE {path}/{id}` (soft delete on the server side)
    pub async fn delete(&self, path: &str, id: &str) -> CoreResult<()> {
        let url = self.record(path, id)?;
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// `POST {path}/bulk-soft-delete`
    pub async fn bulk_delete(&self, path: &str, ids: &[String]) -> CoreResult<BulkDeleteResponse> {
        let url = self.endpoint(&format!("{}/bulk-soft-delete", path.trim_end_matches('/')))?;
        let body = serde_json::to_value(BulkDeleteRequest { ids: ids.to_vec() })?;
        let text = self.send(Method::POST, url, Some(&body)).await?;
        if text.trim().is_empty() {
            return Ok(BulkDeleteResponse {
                deleted: ids.to_vec(),
                errors: Vec::new(),
            });
        }
        let response: BulkDeleteResponse = parse_json(&text)?;
        if !response.is_complete() {
            log::warn!(
                "Bulk delete on {path}: {} deleted, {} failed",
                response.deleted.len(),
                response.errors.len()
            );
        }
        Ok(response)
    }

    fn endpoint(&self, path: &str) -> CoreResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| CoreError::Network(format!("Invalid API path '{path}': {e}")))
    }

    fn record(&self, path: &str, id: &str) -> CoreResult<Url> {
        let mut url = self.endpoint(path)?;
        url.path_segments_mut()
            .map_err(|()| CoreError::Network(format!("Cannot address records under '{path}'")))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> CoreResult<String> {
        log::debug!("{method} {url}");

        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                CoreError::Timeout(e.to_string())
            } else {
                CoreError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("Failed to read response body: {e}")))?;
        log::debug!("Response {status}: {}", truncate_for_log(&text));

        if !(200..300).contains(&status) {
            return Err(decode_error_response(status, &text));
        }
        Ok(text)
    }
}

fn parse_json<T: DeserializeOwned>(text: &str) -> CoreResult<T> {
    serde_json::from_str(text).map_err(|e| {
        log::error!("JSON parse failed: {e}");
        log::error!("Raw response: {}", truncate_for_log(text));
        CoreError::from(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, DEFAULT_TIMEOUT).unwrap()
    }

    #[test]
    fn endpoints_keep_the_base_path() {
        let api = client("http://localhost:8000/api/v1");
        assert_eq!(
            api.endpoint("assets").unwrap().as_str(),
            "http://localhost:8000/api/v1/assets"
        );
        assert_eq!(
            api.endpoint("/assets").unwrap().as_str(),
            "http://localhost:8000/api/v1/assets"
        );
    }

    #[test]
    fn record_urls_escape_the_id() {
        let api = client("http://localhost:8000/api/v1/");
        assert_eq!(
            api.record("assets/", "a b").unwrap().as_str(),
            "http://localhost:8000/api/v1/assets/a%20b"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ApiClient::new("not a url", DEFAULT_TIMEOUT).err().unwrap();
        assert!(matches!(err, CoreError::Network(_)));
    }
}
