//! Zapbot: an automated attendant bound to one messaging account.
//!
//! Inbound one-to-one messages are forwarded to a generative-language
//! backend and the reply is delivered back to the sender with human-like
//! pacing. The transport protocol itself lives in a sidecar process; this
//! crate owns the session lifecycle, the admission pipeline, and the
//! failure handling around the backend call.

pub mod backend;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod gate;
pub mod pipeline;
pub mod prompts;
pub mod session;
pub mod store;
pub mod transport;

pub use error::{Error, Result};

use serde::{Deserialize, Serialize};

/// Opaque session credentials owned by the transport sidecar.
///
/// This crate never inspects the blob; it only persists the latest value so
/// the session can be resumed without re-authenticating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials(pub serde_json::Value);

/// One received message, read once and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Transport-assigned message id.
    pub id: String,
    /// Sender identifier (chat address of the peer).
    pub sender: String,
    /// True when this account itself originated the message.
    #[serde(default)]
    pub from_me: bool,
    /// Content payload. Absent for bare receipts and protocol messages.
    pub payload: Option<MessagePayload>,
    #[serde(default)]
    pub chat: ChatKind,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Heterogeneous message content. The transport populates whichever shapes
/// the wire message carried; the extractor picks the first usable one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagePayload {
    /// Plain conversation text.
    pub conversation: Option<String>,
    /// Extended text (replies, link previews, quoted messages).
    pub extended_text: Option<ExtendedText>,
}

/// Extended/quoted text shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendedText {
    pub text: String,
}

/// Conversation kind. Group chats are out of scope and filtered early.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    #[default]
    Direct,
    Group,
}

/// Events emitted by the transport for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Credentials changed; must be persisted before taking the next event.
    CredentialsUpdate { credentials: Credentials },
    /// Connection state changed.
    Connection(ConnectionUpdate),
    /// A message arrived.
    Message(InboundMessage),
}

/// Connection-state change, with the disconnect cause when closing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionUpdate {
    pub state: ConnectionState,
    pub reason: Option<DisconnectReason>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Open,
    Close,
}

/// Why a session closed. Only `LoggedOut` is terminal; everything else is
/// treated as transient and the session is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisconnectReason {
    LoggedOut,
    ConnectionClosed,
    ConnectionLost,
    TimedOut,
    RestartRequired,
    Other { code: u16 },
}

impl DisconnectReason {
    /// Terminal disconnects must not trigger a reconnect: retrying would
    /// loop against invalidated credentials.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DisconnectReason::LoggedOut)
    }
}

/// Presence indicator shown to a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Composing,
    Paused,
}
