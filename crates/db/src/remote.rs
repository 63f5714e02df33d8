//! REST API client store.
//!
//! Talks to any server exposing `GET`, `POST` and `DELETE` on `/users` with the
//! registrant JSON shape, this service included.

use std::time::Duration;

use async_trait::async_trait;
use signup_core::registrant::Registrant;

use crate::{RegistrantStore, StoreError};

/// HTTP request timeout for a single call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Store backed by a remote `/users` resource.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteStore {
    /// * `base_url` - server root exposing `/users`, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    /// Pass 2xx responses through, turn anything else into
    /// [`StoreError::Api`] with the body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl RegistrantStore for RemoteStore {
    fn backend(&self) -> &'static str {
        "remote"
    }

    async fn list(&self) -> Result<Vec<Registrant>, StoreError> {
        let response = self.client.get(self.users_url()).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    async fn add(&self, registrant: Registrant) -> Result<Registrant, StoreError> {
        let response = self
            .client
            .post(self.users_url())
            .json(&registrant)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let response = self.client.delete(self.users_url()).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
