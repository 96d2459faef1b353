//! Client for the storage endpoint served by `timesheet serve`

use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use tracing::debug;

use super::{encode_document, parse_document, TimerStore};
use crate::{
    error::{Result, TimesheetError},
    state::TimerRecord,
};

/// Upper bound on a single load or save request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Reads `GET {base}/timers.json` and writes `POST {base}/timers`
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    /// Store with a client that gives up on requests after [`REQUEST_TIMEOUT`]
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn document_url(&self) -> String {
        format!("{}/timers.json", self.base_url)
    }

    pub fn save_url(&self) -> String {
        format!("{}/timers", self.base_url)
    }
}

impl TimerStore for HttpStore {
    async fn load(&self) -> Result<Option<Vec<TimerRecord>>> {
        let url = self.document_url();
        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!("No timer document at {}", url);
                Ok(None)
            }
            status if status.is_success() => parse_document(&response.text().await?),
            status => Err(TimesheetError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            }),
        }
    }

    async fn save(&self, records: &[TimerRecord]) -> Result<()> {
        let url = self.save_url();
        let body = encode_document(records)?;
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TimesheetError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }
        debug!("Saved {} timers to {}", records.len(), url);
        Ok(())
    }
}
