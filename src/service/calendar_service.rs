use chrono::NaiveDate;
use serenity::async_trait;

use crate::clients::coindar_client::CoindarClient;
use crate::error::UpstreamError;
use crate::models::coin::Coin;
use crate::models::event::Event;
use crate::models::tag::Tag;

#[async_trait]
pub trait CalendarClient: Send + Sync {
    async fn list_coins(&self) -> Result<Vec<Coin>, UpstreamError>;

    async fn list_tags(&self) -> Result<Vec<Tag>, UpstreamError>;

    /// An empty `coin_ids` slice means every coin. `None` dates are left unbounded.
    async fn list_events(
        &self,
        coin_ids: &[i64],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Event>, UpstreamError>;
}

pub struct CoindarService {
    client: CoindarClient,
}

impl CoindarService {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            client: CoindarClient::new(base_url, access_token),
        }
    }
}

#[async_trait]
impl CalendarClient for CoindarService {
    async fn list_coins(&self) -> Result<Vec<Coin>, UpstreamError> {
        self.client.fetch_coins().await
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, UpstreamError> {
        self.client.fetch_tags().await
    }

    async fn list_events(
        &self,
        coin_ids: &[i64],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Event>, UpstreamError> {
        self.client.fetch_events(coin_ids, start_date, end_date).await
    }
}
