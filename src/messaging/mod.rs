//! Runtime messages exchanged with the background and settings contexts
//!
//! Outbound requests are fire-and-forget: they are wrapped in an [`Envelope`]
//! carrying a request id and handed to a [`Messenger`]. Replies and pushes
//! come back as raw JSON through [`parse_inbound`].

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::actions::TabAction;
use crate::config::SettingsPayload;
use crate::error::EngineError;

pub const TAB_ACTION_MESSAGE_TYPE: &str = "shelix.tabAction";

/// Requests sent out of the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    #[serde(rename = "shelix.tabAction")]
    TabAction { action: TabAction },
    #[serde(rename = "settings.get")]
    SettingsGet,
    #[serde(rename = "settings.setEnabled")]
    SettingsSetEnabled { enabled: bool },
}

/// Wire form of an outbound message: `{"id": "...", "type": "...", ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub id: Uuid,
    #[serde(flatten)]
    pub message: OutboundMessage,
}

impl Envelope {
    pub fn new(message: OutboundMessage) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
        }
    }
}

/// Transport for outbound messages
pub trait Messenger {
    fn send(&self, message: OutboundMessage) -> Result<(), EngineError>;
}

/// Messenger backed by an unbounded channel; the host drains the receiver
pub struct ChannelMessenger {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl ChannelMessenger {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Envelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Messenger for ChannelMessenger {
    fn send(&self, message: OutboundMessage) -> Result<(), EngineError> {
        self.tx
            .send(Envelope::new(message))
            .map_err(|_| EngineError::ChannelClosed)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum PushMessage {
    #[serde(rename = "settings.updated")]
    SettingsUpdated { settings: SettingsPayload },
}

/// Reply to a request. Settings are present on `settings.get` replies only.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    pub ok: bool,
    #[serde(default)]
    pub settings: Option<SettingsPayload>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InboundMessage {
    Push(PushMessage),
    Response(Response),
}

pub fn parse_inbound(json: &str) -> Result<InboundMessage, EngineError> {
    Ok(serde_json::from_str(json)?)
}
