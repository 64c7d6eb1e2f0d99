use std::sync::Arc;

use serenity::model::gateway::GatewayIntents;

use crate::handlers::discord::BotHandler;
use crate::service::calendar_service::CalendarClient;
use crate::service::reference_cache::ReferenceCache;

pub async fn run_bot(
    discord_token: &str,
    command_prefix: &str,
    cache: Arc<ReferenceCache>,
    calendar: Arc<dyn CalendarClient>,
) -> Result<(), serenity::Error> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;
    let mut client = serenity::Client::builder(discord_token, intents)
        .event_handler(BotHandler::new(cache, calendar, command_prefix))
        .await?;

    tracing::info!("Connecting...");
    client.start().await
}
