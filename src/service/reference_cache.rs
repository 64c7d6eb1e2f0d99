use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::UpstreamError;
use crate::models::coin::Coin;
use crate::models::tag::Tag;
use crate::service::calendar_service::CalendarClient;

/// Coins and tags as fetched, in the order the API returned them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReferenceSnapshot {
    pub coins: Vec<Coin>,
    pub tags: Vec<Tag>,
}

impl ReferenceSnapshot {
    pub fn new(coins: Vec<Coin>, tags: Vec<Tag>) -> Self {
        Self { coins, tags }
    }

    /// Exact, case-sensitive match; the first coin wins when symbols repeat.
    pub fn find_coin_by_symbol(&self, symbol: &str) -> Option<&Coin> {
        self.coins.iter().find(|coin| coin.symbol == symbol)
    }

    pub fn coins_with_symbol<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = &'a Coin> {
        self.coins.iter().filter(move |coin| coin.symbol == symbol)
    }

    pub fn find_coin_by_id(&self, id: i64) -> Option<&Coin> {
        self.coins.iter().find(|coin| coin.id == id)
    }

    pub fn find_tag_by_id(&self, id: i64) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == id)
    }
}

/// Shared handle to the current snapshot. Readers take an `Arc` of the snapshot,
/// so a refresh swaps coins and tags together and never exposes a mix.
#[derive(Default)]
pub struct ReferenceCache {
    current: RwLock<Arc<ReferenceSnapshot>>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: ReferenceSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub async fn snapshot(&self) -> Arc<ReferenceSnapshot> {
        self.current.read().await.clone()
    }

    /// Fetches coins then tags and replaces both only when both calls succeed.
    pub async fn refresh<C: CalendarClient + ?Sized>(
        &self,
        client: &C,
    ) -> Result<Arc<ReferenceSnapshot>, UpstreamError> {
        let coins = client.list_coins().await?;
        let tags = client.list_tags().await?;
        let fresh = Arc::new(ReferenceSnapshot::new(coins, tags));

        *self.current.write().await = fresh.clone();
        tracing::info!(
            coins = fresh.coins.len(),
            tags = fresh.tags.len(),
            "Reference cache refreshed"
        );
        Ok(fresh)
    }
}
