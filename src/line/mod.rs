//! LINE Messaging API — webhook wire types, signature check, and client.

pub mod client;
pub mod events;
pub mod signature;

pub use client::LineClient;
pub use events::{EventSource, MessageContent, WebhookEvent, WebhookPayload};
pub use signature::verify_signature;
