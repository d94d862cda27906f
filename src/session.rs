//! Session lifecycle: connect, persist credentials, reconnect-or-stop.

use crate::error::Result;
use crate::pipeline::MessagePipeline;
use crate::store::CredentialStore;
use crate::transport::Transport;
use crate::{ConnectionState, SessionEvent};

use futures::StreamExt as _;
use std::sync::Arc;

/// How one session run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionOutcome {
    /// Transient disconnect; rebuild the session.
    Retry,
    /// Logged out; retrying would loop against invalid credentials.
    Terminal,
}

/// Owns the transport session and drives the reconnect decision.
pub struct SessionManager<T: Transport> {
    transport: Arc<T>,
    store: CredentialStore,
    pipeline: Arc<MessagePipeline>,
}

impl<T: Transport> SessionManager<T> {
    pub fn new(transport: Arc<T>, store: CredentialStore, pipeline: Arc<MessagePipeline>) -> Self {
        Self {
            transport,
            store,
            pipeline,
        }
    }

    /// Run sessions until a terminal disconnect.
    ///
    /// Reconnection is unbounded and unpaced: the transport sidecar already
    /// spaces its own attempts, so every non-terminal close is answered by
    /// rebuilding the session immediately.
    pub async fn run(&self) -> Result<()> {
        loop {
            match self.run_session().await? {
                SessionOutcome::Retry => {
                    tracing::warn!("rebuilding session");
                }
                SessionOutcome::Terminal => {
                    tracing::error!(
                        "session logged out; delete the credential blob and re-authenticate"
                    );
                    return Ok(());
                }
            }
        }
    }

    async fn run_session(&self) -> Result<SessionOutcome> {
        let credentials = self.store.load().await?;
        let resuming = credentials.is_some();
        let mut events = self.transport.connect(credentials).await?;
        tracing::info!(resuming, "session established");

        while let Some(event) = events.next().await {
            match event {
                SessionEvent::CredentialsUpdate { credentials } => {
                    // Flushed before the next event is taken; the store is
                    // the only recovery path after a crash.
                    self.store.save(&credentials).await?;
                    tracing::debug!("credentials persisted");
                }
                SessionEvent::Connection(update) => match update.state {
                    ConnectionState::Open => {
                        tracing::info!("connection open");
                    }
                    ConnectionState::Close => {
                        let terminal = update.reason.is_some_and(|reason| reason.is_terminal());
                        tracing::warn!(reason = ?update.reason, "connection closed");
                        return Ok(if terminal {
                            SessionOutcome::Terminal
                        } else {
                            SessionOutcome::Retry
                        });
                    }
                },
                SessionEvent::Message(message) => {
                    let pipeline = Arc::clone(&self.pipeline);
                    tokio::spawn(async move {
                        pipeline.handle_message(message).await;
                    });
                }
            }
        }

        // Stream ended without a close frame. Treat it like a transient
        // disconnect rather than guessing at a cause.
        tracing::warn!("event stream ended without close frame");
        Ok(SessionOutcome::Retry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ReplyBackend;
    use crate::config::PipelineConfig;
    use crate::gate::AdmissionGate;
    use crate::transport::{EventStream, TransportDyn};
    use crate::{
        ConnectionUpdate, Credentials, DisconnectReason, Presence,
    };
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Transport whose `connect` hands out pre-scripted event streams.
    struct ScriptedTransport {
        scripts: Mutex<VecDeque<Vec<SessionEvent>>>,
        connects: AtomicUsize,
    }

    impl ScriptedTransport {
        fn new(scripts: Vec<Vec<SessionEvent>>) -> Self {
            Self {
                scripts: Mutex::new(scripts.into()),
                connects: AtomicUsize::new(0),
            }
        }
    }

    impl Transport for ScriptedTransport {
        async fn connect(&self, _credentials: Option<Credentials>) -> crate::Result<EventStream> {
            self.connects.fetch_add(1, Ordering::SeqCst);
            let events = self
                .scripts
                .lock()
                .expect("scripts lock")
                .pop_front()
                .expect("script for this connect");
            Ok(Box::pin(futures::stream::iter(events)))
        }

        async fn send_text(&self, _recipient: &str, _text: &str) -> crate::Result<()> {
            Ok(())
        }

        async fn send_presence(&self, _recipient: &str, _presence: Presence) -> crate::Result<()> {
            Ok(())
        }
    }

    struct SilentBackend;

    #[async_trait]
    impl ReplyBackend for SilentBackend {
        async fn generate(&self, _question: &str) -> String {
            String::new()
        }
    }

    fn close(reason: Option<DisconnectReason>) -> SessionEvent {
        SessionEvent::Connection(ConnectionUpdate {
            state: ConnectionState::Close,
            reason,
        })
    }

    fn manager_with(
        transport: Arc<ScriptedTransport>,
        store: CredentialStore,
    ) -> SessionManager<ScriptedTransport> {
        let pipeline = Arc::new(MessagePipeline::new(
            transport.clone() as Arc<dyn TransportDyn>,
            Arc::new(SilentBackend),
            AdmissionGate::new(std::time::Duration::from_secs(15)),
            PipelineConfig::default(),
        ));
        SessionManager::new(transport, store, pipeline)
    }

    #[tokio::test]
    async fn logged_out_close_is_terminal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CredentialStore::new(dir.path().join("credentials.json"));
        let transport = Arc::new(ScriptedTransport::new(vec![vec![close(Some(
            DisconnectReason::LoggedOut,
        ))]]));

        manager_with(transport.clone(), store)
            .run()
            .await
            .expect("run");
        assert_eq!(transport.connects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transient_close_triggers_reconnect() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CredentialStore::new(dir.path().join("credentials.json"));
        let transport = Arc::new(ScriptedTransport::new(vec![
            vec![close(Some(DisconnectReason::ConnectionLost))],
            vec![close(Some(DisconnectReason::LoggedOut))],
        ]));

        manager_with(transport.clone(), store)
            .run()
            .await
            .expect("run");
        assert_eq!(transport.connects.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn stream_end_without_close_is_transient() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CredentialStore::new(dir.path().join("credentials.json"));
        let transport = Arc::new(ScriptedTransport::new(vec![
            vec![],
            vec![close(Some(DisconnectReason::LoggedOut))],
        ]));

        manager_with(transport.clone(), store)
            .run()
            .await
            .expect("run");
        assert_eq!(transport.connects.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn credential_updates_are_persisted_immediately() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("credentials.json");
        let store = CredentialStore::new(&path);
        let updated = Credentials(serde_json::json!({"epoch": 7}));
        let transport = Arc::new(ScriptedTransport::new(vec![vec![
            SessionEvent::CredentialsUpdate {
                credentials: updated.clone(),
            },
            close(Some(DisconnectReason::LoggedOut)),
        ]]));

        manager_with(transport, store.clone())
            .run()
            .await
            .expect("run");
        assert_eq!(store.load().await.expect("load"), Some(updated));
    }
}
