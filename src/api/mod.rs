pub mod types;

use anyhow::Result;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::api::types::{RawUser, UsersPage};
use crate::config::HttpConfig;

/// Single load-boundary error. Never retried; the message is shown to
/// the user as-is.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to fetch users: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to fetch users: server returned status {0}")]
    Status(u16),

    #[error("failed to fetch users: invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct UsersClient {
    pub base_url: String,
    inner: reqwest::Client,
}

impl UsersClient {
    pub fn new(base_url: impl Into<String>, http: &HttpConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(http.connect_timeout_ms))
            .timeout(Duration::from_millis(http.request_timeout_ms))
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            inner,
        })
    }

    pub(crate) fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}/users")
    }

    /// Fetch one page of users. Non-2xx and undecodable bodies are
    /// errors; there is no retry.
    pub async fn fetch_page(&self, per_page: u32) -> Result<Vec<RawUser>, FetchError> {
        let url = self.endpoint();
        debug!(%url, per_page, "fetching users");
        let resp = self
            .inner
            .get(&url)
            .query(&[("per_page", per_page)])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let page: UsersPage = resp.json().await.map_err(FetchError::Decode)?;
        debug!(count = page.data.len(), "users fetched");
        Ok(page.data)
    }
}
