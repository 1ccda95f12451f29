//! Chat message shape accepted by Slack incoming webhooks.
//! See https://api.slack.com/messaging/composing/layouts#building-attachments

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatPayload {
    pub text: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub text: String,
    pub color: String,
}
