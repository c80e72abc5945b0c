//! HTTP client for the date-schedule backend.

use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::{MonthSchedule, ScheduleEnvelope};

use super::source::ScheduleSource;

/// Client for the `GET /date-schedule` endpoint.
#[derive(Clone)]
pub struct HttpScheduleSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpScheduleSource {
    /// Create a client against the given backend base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ScheduleSource for HttpScheduleSource {
    async fn fetch_month(&self, year: i32, month: u32) -> Result<MonthSchedule> {
        // The backend counts months from zero
        let url = format!(
            "{}/date-schedule?year={}&month={}&sort=date",
            self.base_url,
            year,
            month - 1
        );

        let envelope: ScheduleEnvelope = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("failed to fetch schedule for {}-{:02}", year, month))?
            .error_for_status()
            .with_context(|| format!("schedule request for {}-{:02} rejected", year, month))?
            .json()
            .await
            .context("failed to parse schedule response")?;

        Ok(MonthSchedule {
            year,
            month,
            days: envelope.data.data,
        })
    }
}
