use serenity::builder::CreateEmbed;

use crate::models::event::DATE_FORMAT;
use crate::service::event_query::ResolvedEvent;

pub const EMBED_COLOR: u32 = 0xFF5733;
pub const NO_EVENT_CAPTION: &str = "No event found.";
pub const NO_TAG: &str = "none";
pub const EVENTS_DONE: &str = "`Send events done.`";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Platform-neutral rich message; rendered as a Discord embed or plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub fields: Vec<MessageField>,
}

impl ChatMessage {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    pub fn to_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .title(&self.title)
            .description(&self.description)
            .color(EMBED_COLOR);
        if let Some(url) = &self.thumbnail {
            embed = embed.thumbnail(url);
        }
        for field in &self.fields {
            embed = embed.field(&field.name, &field.value, field.inline);
        }
        embed
    }

    pub fn to_plain_text(&self) -> String {
        let mut body = format!("{}\n{}", self.title, self.description);
        for field in &self.fields {
            body.push_str(&format!("\n{}: {}", field.name, field.value));
        }
        body
    }
}

pub struct EventMessageService;

impl EventMessageService {
    pub fn build_message(result: &ResolvedEvent) -> ChatMessage {
        match result {
            ResolvedEvent::Found { coin, event, tag } => ChatMessage {
                title: format!("({}) {}", coin.symbol, coin.name),
                description: event.caption_text.clone(),
                thumbnail: coin.thumbnail_url.clone(),
                fields: vec![
                    MessageField {
                        name: "When".to_string(),
                        value: event.start_date.format(DATE_FORMAT).to_string(),
                        inline: false,
                    },
                    tag_field(tag.as_ref().map(|t| t.name.as_str())),
                    MessageField {
                        name: "Source".to_string(),
                        value: event.source_url.clone(),
                        inline: false,
                    },
                ],
            },
            ResolvedEvent::NoEventForCoin { coin } => ChatMessage {
                title: format!("({}) {}", coin.symbol, coin.name),
                description: NO_EVENT_CAPTION.to_string(),
                thumbnail: coin.thumbnail_url.clone(),
                fields: vec![tag_field(None)],
            },
            ResolvedEvent::NoEventInRange {
                start_date,
                end_date,
            } => ChatMessage {
                title: format!(
                    "(*) All coins, {} to {}",
                    start_date.format(DATE_FORMAT),
                    end_date.format(DATE_FORMAT)
                ),
                description: NO_EVENT_CAPTION.to_string(),
                thumbnail: None,
                fields: vec![tag_field(None)],
            },
        }
    }
}

fn tag_field(name: Option<&str>) -> MessageField {
    MessageField {
        name: "Tag".to_string(),
        value: name.unwrap_or(NO_TAG).to_string(),
        inline: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coin::Coin;
    use crate::models::event::Event;
    use crate::models::tag::Tag;
    use chrono::NaiveDate;

    fn bitcoin() -> Coin {
        Coin {
            id: 1,
            symbol: "BTC".to_string(),
            name: "Bitcoin".to_string(),
            thumbnail_url: Some("https://img/btc.png".to_string()),
        }
    }

    #[test]
    fn event_message_carries_all_fields() {
        let result = ResolvedEvent::Found {
            coin: bitcoin(),
            event: Event {
                coin_id: 1,
                caption_text: "Halving".to_string(),
                start_date: NaiveDate::from_ymd_opt(2024, 4, 20).unwrap(),
                source_url: "https://example.com/halving".to_string(),
                tag_id: Some(3),
            },
            tag: Some(Tag { id: 3, name: "Hard fork".to_string() }),
        };

        let message = EventMessageService::build_message(&result);
        assert_eq!(message.title, "(BTC) Bitcoin");
        assert_eq!(message.description, "Halving");
        assert_eq!(message.thumbnail.as_deref(), Some("https://img/btc.png"));
        assert_eq!(message.field("When"), Some("2024-04-20"));
        assert_eq!(message.field("Tag"), Some("Hard fork"));
        assert_eq!(message.field("Source"), Some("https://example.com/halving"));
    }

    #[test]
    fn placeholder_omits_event_fields_but_keeps_tag() {
        let message =
            EventMessageService::build_message(&ResolvedEvent::NoEventForCoin { coin: bitcoin() });
        assert_eq!(message.description, NO_EVENT_CAPTION);
        assert_eq!(message.field("When"), None);
        assert_eq!(message.field("Source"), None);
        assert_eq!(message.field("Tag"), Some(NO_TAG));
    }

    #[test]
    fn range_placeholder_has_no_coin_identity() {
        let message = EventMessageService::build_message(&ResolvedEvent::NoEventInRange {
            start_date: NaiveDate::from_ymd_opt(2021, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2021, 5, 8).unwrap(),
        });
        assert_eq!(message.thumbnail, None);
        assert!(message.title.contains("2021-05-01 to 2021-05-08"));
    }

    #[test]
    fn plain_text_lists_title_body_and_fields() {
        let message =
            EventMessageService::build_message(&ResolvedEvent::NoEventForCoin { coin: bitcoin() });
        assert_eq!(
            message.to_plain_text(),
            "(BTC) Bitcoin\nNo event found.\nTag: none"
        );
    }

    #[test]
    fn embed_uses_brand_color_and_thumbnail() {
        let message =
            EventMessageService::build_message(&ResolvedEvent::NoEventForCoin { coin: bitcoin() });
        let debug = format!("{:?}", message.to_embed());
        assert!(debug.contains("https://img/btc.png"));
        assert!(debug.contains("(BTC) Bitcoin"));
    }
}
