//! Webhook wire types for the LINE Messaging API.
//!
//! Only message events with text or image content are acted on; every
//! other event and message type deserializes into an `Other` variant and
//! is ignored by the bot.

use serde::Deserialize;

/// Top-level webhook delivery: one POST can carry several events.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// A single webhook event.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WebhookEvent {
    #[serde(rename_all = "camelCase")]
    Message {
        reply_token: String,
        source: EventSource,
        message: MessageContent,
    },
    /// Follow/unfollow/join/postback and anything the API adds later.
    #[serde(other)]
    Other,
}

/// Where the message came from. Group and room messages still carry the
/// sending user's ID alongside the chat ID.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventSource {
    #[serde(rename_all = "camelCase")]
    User { user_id: String },
    #[serde(rename_all = "camelCase")]
    Group {
        group_id: String,
        #[serde(default)]
        user_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Room {
        room_id: String,
        #[serde(default)]
        user_id: Option<String>,
    },
}

impl EventSource {
    /// The sending user's ID, if the platform included one.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            EventSource::User { user_id } => Some(user_id),
            EventSource::Group { user_id, .. } | EventSource::Room { user_id, .. } => {
                user_id.as_deref()
            }
        }
    }
}

/// Message body attached to a message event.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text { id: String, text: String },
    Image { id: String },
    /// Sticker/video/audio/location — nothing to OCR or match.
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_image_message_from_user() {
        let json = r#"{
            "destination": "Uadmin",
            "events": [{
                "type": "message",
                "replyToken": "rtok-1",
                "source": {"type": "user", "userId": "U123"},
                "message": {"type": "image", "id": "m-42"}
            }]
        }"#;
        let payload: WebhookPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.events.len(), 1);
        let WebhookEvent::Message {
            reply_token,
            source,
            message,
        } = &payload.events[0]
        else {
            panic!("expected message event");
        };
        assert_eq!(reply_token, "rtok-1");
        assert_eq!(source.user_id(), Some("U123"));
        assert!(matches!(message, MessageContent::Image { id } if id == "m-42"));
    }

    #[test]
    fn parses_text_message_from_group() {
        let json = r#"{
            "type": "message",
            "replyToken": "rtok-2",
            "source": {"type": "group", "groupId": "G9", "userId": "U7"},
            "message": {"type": "text", "id": "m-1", "text": "rank"}
        }"#;
        let event: WebhookEvent = serde_json::from_str(json).unwrap();
        let WebhookEvent::Message { source, message, .. } = event else {
            panic!("expected message event");
        };
        assert!(matches!(&source, EventSource::Group { group_id, .. } if group_id == "G9"));
        assert_eq!(source.user_id(), Some("U7"));
        assert!(matches!(message, MessageContent::Text { text, .. } if text == "rank"));
    }

    #[test]
    fn room_source_without_user_id() {
        let json = r#"{"type": "room", "roomId": "R1"}"#;
        let source: EventSource = serde_json::from_str(json).unwrap();
        assert_eq!(source.user_id(), None);
    }

    #[test]
    fn unknown_event_type_becomes_other() {
        let json = r#"{"type": "follow", "replyToken": "rtok-3",
                       "source": {"type": "user", "userId": "U1"}}"#;
        let event: WebhookEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(event, WebhookEvent::Other));
    }

    #[test]
    fn unknown_message_type_becomes_other() {
        let json = r#"{
            "type": "message",
            "replyToken": "rtok-4",
            "source": {"type": "user", "userId": "U1"},
            "message": {"type": "sticker", "id": "m-9", "stickerId": "s1", "packageId": "p1"}
        }"#;
        let event: WebhookEvent = serde_json::from_str(json).unwrap();
        let WebhookEvent::Message { message, .. } = event else {
            panic!("expected message event");
        };
        assert!(matches!(message, MessageContent::Other));
    }

    #[test]
    fn empty_events_array() {
        let payload: WebhookPayload =
            serde_json::from_str(r#"{"destination": "U1", "events": []}"#).unwrap();
        assert!(payload.events.is_empty());
    }
}
