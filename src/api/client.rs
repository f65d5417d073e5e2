//! HTTP client for workspace API requests.
//!
//! Wraps `reqwest`, maps non-success responses to [`ApiError::Api`] with the
//! server's `error` message, and decodes JSON bodies.

use super::{error::ApiError, resource::ErrorBody};
use log::*;
use reqwest::{Method, Response, Url};
use serde::{de::DeserializeOwned, Serialize};

/// Makes requests to the workspace API and decodes responses.
///
pub struct Client {
    pub(crate) base_url: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL.
    ///
    pub fn new(base_url: &str) -> Self {
        Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Send a GET request with query parameters and decode the body. Each
    /// of `segments` is percent-encoded as one path segment.
    ///
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self
            .call(Method::GET, segments, params, None::<&()>)
            .await?;
        Client::decode(response).await
    }

    /// Send a POST request with a JSON body and decode the response.
    ///
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.call(Method::POST, segments, &[], Some(body)).await?;
        Client::decode(response).await
    }

    /// Join `segments` onto the base URL, keeping any path prefix it has.
    ///
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(format!("{}: cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn call<B: Serialize>(
        &self,
        method: Method,
        segments: &[&str],
        params: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let request_url = self.endpoint(segments)?;
        debug!("{} {}", method, request_url);
        let mut request = self.http_client.request(method, request_url);
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let bytes = response.bytes().await?;

        // Check status before trying to deserialize
        if !status.is_success() {
            let message = match serde_json::from_slice::<ErrorBody>(&bytes) {
                Ok(body) => body.error,
                Err(_) => String::from_utf8_lossy(&bytes).into_owned(),
            };
            error!("API request failed with status {}: {}", status, message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            error!(
                "Failed to deserialize API response: {}. Response body: {}",
                e,
                String::from_utf8_lossy(&bytes)
            );
            ApiError::Deserialization(e)
        })
    }
}
