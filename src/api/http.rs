//! Shared HTTP contract layer for the Atlassian REST APIs.
//!
//! Every remote operation in the Jira and Confluence clients funnels
//! through [`ApiClient`]. This layer owns the base URL, the Basic-Auth
//! header, status-code interpretation, and body decoding. The split
//! between the decoding operations ([`ApiClient::get`]/[`ApiClient::post`])
//! and the status-only operations ([`ApiClient::post_no_content`],
//! [`ApiClient::put`], [`ApiClient::delete`]) is deliberate: endpoints
//! that answer `204 No Content` (workflow transitions, most updates) must
//! never pass through a code path that requires a parseable body.

use std::time::Duration;

use reqwest::{header, Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace, warn};

use super::auth::Auth;
use super::error::{ApiError, Result};

/// Authenticated HTTP client bound to one Atlassian site.
///
/// Base URL, credentials, and timeout are fixed at construction and are
/// not mutable afterwards. Calls are issued one at a time; the underlying
/// connection pool is reused across calls.
#[derive(Debug)]
pub struct ApiClient {
    /// The HTTP client with the configured timeout.
    http: Client,
    /// Normalized site base URL, without a trailing slash.
    base_url: String,
    /// Precomputed authentication header.
    auth: Auth,
}

impl ApiClient {
    /// Build a client for a site.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(base_url: &str, email: &str, token: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
            auth: Auth::new(email, token),
        })
    }

    /// The normalized site base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a path and decode the JSON body as `T`.
    ///
    /// A 2xx response with a body that does not parse as `T` is reported
    /// as `ApiError::Decode`, never coerced to a default value.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.dispatch(Method::GET, path, None::<&()>).await?;
        Self::decode_body(response).await
    }

    /// POST a JSON body and decode the JSON response as `T`.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.dispatch(Method::POST, path, Some(body)).await?;
        Self::decode_body(response).await
    }

    /// POST a JSON body to an endpoint that answers 2xx with no meaningful
    /// body (workflow transitions reply `204 No Content`).
    ///
    /// Success is determined purely by the status class; the body is
    /// drained for logging but never parsed.
    pub async fn post_no_content<B>(&self, path: &str, body: &B) -> Result<bool>
    where
        B: Serialize + ?Sized,
    {
        let response = self.dispatch(Method::POST, path, Some(body)).await?;
        Self::drain_body(response).await
    }

    /// PUT a JSON body; success is determined by the status class alone.
    pub async fn put<B>(&self, path: &str, body: &B) -> Result<bool>
    where
        B: Serialize + ?Sized,
    {
        let response = self.dispatch(Method::PUT, path, Some(body)).await?;
        Self::drain_body(response).await
    }

    /// DELETE a path; success is determined by the status class alone.
    pub async fn delete(&self, path: &str) -> Result<bool> {
        let response = self.dispatch(Method::DELETE, path, None::<&()>).await?;
        Self::drain_body(response).await
    }

    /// Issue one request and interpret the status code.
    ///
    /// Returns the raw response for 2xx; non-2xx becomes `ApiError::Http`
    /// carrying the status and raw body. Transport failures and timeouts
    /// are classified by [`ApiError::from_reqwest`].
    async fn dispatch<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %path, "dispatching request");
        if let Some(body) = body {
            trace!(
                body = %serde_json::to_string(body).unwrap_or_default(),
                "request body"
            );
        }

        let mut request = self
            .http
            .request(method, &url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::from_reqwest)?;
        let status = response.status();

        if status.is_success() {
            debug!(%status, "request completed");
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, %path, "request failed");
            Err(ApiError::Http { status, body })
        }
    }

    /// Read a 2xx body and decode it as `T`.
    ///
    /// The raw text is preserved in the error so a decode failure is
    /// diagnosable.
    async fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T> {
        let text = response.text().await.map_err(ApiError::from_reqwest)?;
        serde_json::from_str(&text).map_err(|source| ApiError::Decode { body: text, source })
    }

    /// Drain a 2xx body without parsing it.
    async fn drain_body(response: Response) -> Result<bool> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !body.is_empty() {
            trace!(%status, body = %body, "drained response body");
        }
        Ok(true)
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("base URL does not use HTTPS: {}", url);
    }

    url.to_string()
}
