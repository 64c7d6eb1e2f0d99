use serenity::async_trait;
use serenity::builder::CreateMessage;
use serenity::http::Http;
use serenity::model::id::ChannelId;

use crate::service::event_message_service::ChatMessage;

/// Where a command's replies go.
#[async_trait]
pub trait ChannelResponder: Send + Sync {
    async fn say(&self, content: &str);
    async fn send_message(&self, message: &ChatMessage);
}

pub struct SerenityResponder<'a> {
    http: &'a Http,
    channel_id: ChannelId,
}

impl<'a> SerenityResponder<'a> {
    pub fn new(http: &'a Http, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl ChannelResponder for SerenityResponder<'_> {
    async fn say(&self, content: &str) {
        if let Err(err) = self.channel_id.say(self.http, content).await {
            tracing::warn!(channel_id = %self.channel_id, error = %err, "Failed to send reply");
        }
    }

    async fn send_message(&self, message: &ChatMessage) {
        let builder = CreateMessage::new().embed(message.to_embed());
        if let Err(err) = self.channel_id.send_message(self.http, builder).await {
            tracing::warn!(channel_id = %self.channel_id, error = %err, "Failed to send embed");
        }
    }
}

/// Prints replies to stdout; used by the one-shot CLI mode.
pub struct StdoutResponder;

#[async_trait]
impl ChannelResponder for StdoutResponder {
    async fn say(&self, content: &str) {
        println!("{}", content);
    }

    async fn send_message(&self, message: &ChatMessage) {
        println!("{}\n", message.to_plain_text());
    }
}
