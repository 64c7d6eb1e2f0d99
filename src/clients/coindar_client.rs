use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::error::UpstreamError;
use crate::models::coin::Coin;
use crate::models::event::{DATE_FORMAT, Event};
use crate::models::tag::Tag;

pub const DEFAULT_BASE_URL: &str = "https://coindar.org/api/v2";
pub const PAGE_SIZE: u32 = 100;
pub const MAX_PAGES: u32 = 100;

/// Thin HTTP wrapper over the Coindar v2 read endpoints.
#[derive(Clone)]
pub struct CoindarClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl CoindarClient {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    pub async fn fetch_coins(&self) -> Result<Vec<Coin>, UpstreamError> {
        self.get("coins", &[]).await
    }

    pub async fn fetch_tags(&self) -> Result<Vec<Tag>, UpstreamError> {
        self.get("tags", &[]).await
    }

    /// Walks the events pages until one comes back empty or the page cap is hit.
    /// A failing page fails the whole call.
    pub async fn fetch_events(
        &self,
        coin_ids: &[i64],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Event>, UpstreamError> {
        let filter_coins = coin_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let mut events = Vec::new();
        for page in 1..=MAX_PAGES {
            let mut params = vec![
                ("page", page.to_string()),
                ("page_size", PAGE_SIZE.to_string()),
                ("filter_coins", filter_coins.clone()),
            ];
            if let Some(start) = start_date {
                params.push(("filter_date_start", start.format(DATE_FORMAT).to_string()));
            }
            if let Some(end) = end_date {
                params.push(("filter_date_end", end.format(DATE_FORMAT).to_string()));
            }

            let part: Vec<Event> = self.get("events", &params).await?;
            if part.is_empty() {
                return Ok(events);
            }
            events.extend(part);
        }
        tracing::warn!(pages = MAX_PAGES, "Stopped paging events at the page cap");
        Ok(events)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: &[(&str, String)],
    ) -> Result<T, UpstreamError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .http
            .get(&url)
            .query(&[("access_token", self.access_token.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|source| UpstreamError::Request { endpoint, source })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| UpstreamError::Request { endpoint, source })?;

        if !status.is_success() {
            tracing::debug!(endpoint, %status, body = %text, "Coindar returned an error status");
            return Err(UpstreamError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        serde_json::from_str(&text).map_err(|source| UpstreamError::Decode { endpoint, source })
    }
}
