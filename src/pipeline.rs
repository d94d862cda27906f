//! Inbound message pipeline: filtering, pacing, generation, delivery.

use crate::backend::ReplyBackend;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::extract::extract_text;
use crate::format::split_message;
use crate::gate::AdmissionGate;
use crate::prompts::APOLOGY;
use crate::transport::TransportDyn;
use crate::{ChatKind, InboundMessage, Presence};

use std::sync::Arc;
use std::time::Duration;

/// Message-id prefix the transport uses for history replayed on reconnect.
/// Replayed messages were already answered in a previous session.
pub const HISTORY_ID_PREFIX: &str = "BAE5";

/// Wires inbound messages to the admission gate, the backend, and delivery.
pub struct MessagePipeline {
    transport: Arc<dyn TransportDyn>,
    backend: Arc<dyn ReplyBackend>,
    gate: AdmissionGate,
    config: PipelineConfig,
}

impl MessagePipeline {
    pub fn new(
        transport: Arc<dyn TransportDyn>,
        backend: Arc<dyn ReplyBackend>,
        gate: AdmissionGate,
        config: PipelineConfig,
    ) -> Self {
        Self {
            transport,
            backend,
            gate,
            config,
        }
    }

    /// Process one inbound message to a terminal outcome.
    ///
    /// Filters run in order and short-circuit before any await point, so
    /// admission is decided before the handler can be interleaved with
    /// another message from the same sender.
    pub async fn handle_message(&self, message: InboundMessage) {
        let Some(payload) = &message.payload else {
            return;
        };
        if message.id.starts_with(HISTORY_ID_PREFIX) {
            tracing::trace!(id = %message.id, "historical message, skipped");
            return;
        }
        if message.from_me {
            return;
        }
        if message.chat == ChatKind::Group {
            return;
        }
        let text = extract_text(payload);
        if text.is_empty() {
            return;
        }
        if !self.gate.try_admit(&message.sender) {
            tracing::debug!(sender = %message.sender, "sender already pending, message dropped");
            return;
        }

        if let Err(error) = self.respond(&message.sender, text).await {
            tracing::error!(%error, sender = %message.sender, "failed to respond");
            if let Err(error) = self.transport.send_text(&message.sender, APOLOGY).await {
                tracing::warn!(%error, sender = %message.sender, "failed to deliver apology");
            }
        }
        self.gate.release(&message.sender);
    }

    async fn respond(&self, sender: &str, text: &str) -> Result<()> {
        self.pace().await;
        self.transport
            .send_presence(sender, Presence::Composing)
            .await?;

        let reply = self.backend.generate(text).await;
        for segment in split_message(&reply, self.config.chunk_limit) {
            self.transport.send_text(sender, &segment).await?;
        }
        Ok(())
    }

    /// Human-cadence delay before the reply is produced.
    async fn pace(&self) {
        use rand::Rng as _;

        let min = self.config.pacing_min;
        let max = self.config.pacing_max;
        let span = max.saturating_sub(min).as_millis() as u64;
        let delay = if span > 0 {
            min + Duration::from_millis(rand::rng().random_range(0..span))
        } else {
            min
        };
        tokio::time::sleep(delay).await;
    }
}
