use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;

use crate::error::QueryError;
use crate::handlers::discord_responder::{ChannelResponder, SerenityResponder};
use crate::service::calendar_service::CalendarClient;
use crate::service::command::{BotCommand, help_text, parse_command};
use crate::service::event_message_service::{EVENTS_DONE, EventMessageService};
use crate::service::event_query::{EventQuery, SymbolSpec, resolve_events};
use crate::service::reference_cache::ReferenceCache;

pub const UPSTREAM_FAILURE: &str = "Failed to reach Coindar. Please try again later.";
pub const REFRESHING: &str = "`Refreshing...`";
pub const REFRESH_DONE: &str = "`Done...`";

pub struct BotHandler {
    cache: Arc<ReferenceCache>,
    calendar: Arc<dyn CalendarClient>,
    prefix: String,
}

impl BotHandler {
    pub fn new(
        cache: Arc<ReferenceCache>,
        calendar: Arc<dyn CalendarClient>,
        prefix: impl Into<String>,
    ) -> Self {
        BotHandler {
            cache,
            calendar,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub async fn handle_command_with(
        &self,
        responder: &dyn ChannelResponder,
        command: BotCommand,
        today: NaiveDate,
    ) {
        match command {
            BotCommand::SendEvents {
                symbols,
                start_date,
                end_date,
            } => {
                self.handle_send_events_with(
                    responder,
                    symbols.as_deref(),
                    start_date.as_deref(),
                    end_date.as_deref(),
                    today,
                )
                .await
            }
            BotCommand::CoinId { symbol } => {
                self.handle_coin_id_with(responder, symbol.as_deref()).await
            }
            BotCommand::RefreshCoins => self.handle_refresh_with(responder).await,
            BotCommand::Help => responder.say(&help_text(&self.prefix)).await,
        }
    }

    pub async fn handle_send_events_with(
        &self,
        responder: &dyn ChannelResponder,
        symbols: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
        today: NaiveDate,
    ) {
        let query = match EventQuery::parse(symbols, start_date, end_date) {
            Ok(query) => query,
            Err(err) => {
                responder.say(&err.to_string()).await;
                return;
            }
        };

        if let SymbolSpec::Symbols(requested) = &query.symbols {
            responder
                .say(&format!("Checking symbols: {}", requested.join(" ")))
                .await;
        }

        let snapshot = self.cache.snapshot().await;
        match resolve_events(&snapshot, self.calendar.as_ref(), &query, today).await {
            Ok(results) => {
                for result in &results {
                    let message = EventMessageService::build_message(result);
                    responder.send_message(&message).await;
                }
            }
            Err(QueryError::Upstream(err)) => {
                tracing::error!(error = %err, "Event query failed");
                responder.say(UPSTREAM_FAILURE).await;
                return;
            }
            Err(err) => responder.say(&err.to_string()).await,
        }

        responder.say(EVENTS_DONE).await;
    }

    pub async fn handle_coin_id_with(&self, responder: &dyn ChannelResponder, symbol: Option<&str>) {
        let Some(symbol) = symbol else {
            responder
                .say(&format!("Usage: {}cid [symbol]", self.prefix))
                .await;
            return;
        };

        let snapshot = self.cache.snapshot().await;
        let mut found = false;
        for coin in snapshot.coins_with_symbol(symbol) {
            found = true;
            responder
                .say(&format!("({}) {} \n id: {}", coin.symbol, coin.name, coin.id))
                .await;
        }
        if !found {
            responder.say(&QueryError::InvalidSymbol.to_string()).await;
        }
    }

    pub async fn handle_refresh_with(&self, responder: &dyn ChannelResponder) {
        responder.say(REFRESHING).await;
        if let Err(err) = self.cache.refresh(self.calendar.as_ref()).await {
            tracing::error!(error = %err, "Reference cache refresh failed");
            responder.say(UPSTREAM_FAILURE).await;
            return;
        }
        responder.say(REFRESH_DONE).await;
    }
}

#[async_trait]
impl EventHandler for BotHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!(user = %ready.user.name, guilds = ready.guilds.len(), "Connected to Discord");
        for guild in &ready.guilds {
            tracing::info!(guild_id = %guild.id, "Serving guild");
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(command) = parse_command(&self.prefix, &msg.content) else {
            return;
        };

        tracing::info!(
            channel_id = %msg.channel_id,
            author = %msg.author.name,
            ?command,
            "Handling command"
        );
        let responder = SerenityResponder::new(&ctx.http, msg.channel_id);
        self.handle_command_with(&responder, command, Local::now().date_naive())
            .await;
    }
}
