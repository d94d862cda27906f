//! Transport trait and dynamic dispatch companion.

use crate::error::Result;
use crate::{Credentials, Presence, SessionEvent};
use futures::Stream;
use std::pin::Pin;

/// Session event stream type.
pub type EventStream = Pin<Box<dyn Stream<Item = SessionEvent> + Send>>;

/// Static trait for transport implementations.
/// Use this for type-safe implementations.
pub trait Transport: Send + Sync + 'static {
    /// Establish or resume a session and return its event stream.
    ///
    /// `credentials` is the persisted blob from a previous session, or
    /// `None` to authenticate from scratch.
    fn connect(
        &self,
        credentials: Option<Credentials>,
    ) -> impl std::future::Future<Output = Result<EventStream>> + Send;

    /// Send a text message to a recipient.
    fn send_text(
        &self,
        recipient: &str,
        text: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Signal a presence indicator to a recipient.
    fn send_presence(
        &self,
        recipient: &str,
        presence: Presence,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Dynamic trait for runtime polymorphism.
/// Use this when you need `Arc<dyn TransportDyn>`.
pub trait TransportDyn: Send + Sync + 'static {
    fn connect<'a>(
        &'a self,
        credentials: Option<Credentials>,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<EventStream>> + Send + 'a>>;

    fn send_text<'a>(
        &'a self,
        recipient: &'a str,
        text: &'a str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<()>> + Send + 'a>>;

    fn send_presence<'a>(
        &'a self,
        recipient: &'a str,
        presence: Presence,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<()>> + Send + 'a>>;
}

/// Blanket implementation: any type implementing Transport automatically
/// implements TransportDyn.
impl<T: Transport> TransportDyn for T {
    fn connect<'a>(
        &'a self,
        credentials: Option<Credentials>,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<EventStream>> + Send + 'a>> {
        Box::pin(Transport::connect(self, credentials))
    }

    fn send_text<'a>(
        &'a self,
        recipient: &'a str,
        text: &'a str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(Transport::send_text(self, recipient, text))
    }

    fn send_presence<'a>(
        &'a self,
        recipient: &'a str,
        presence: Presence,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(Transport::send_presence(self, recipient, presence))
    }
}
