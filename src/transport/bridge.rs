//! Bridge transport: newline-delimited JSON over a Unix domain socket.
//!
//! The protocol sidecar owns the actual messaging session and speaks a
//! small framed protocol: one JSON object per line in each direction.
//! Inbound lines are [`SessionEvent`] frames; outbound lines are command
//! frames. The sidecar handles network-level reconnection and retry
//! spacing on its own; this adapter only reports closes upward.

use crate::error::{Result, TransportError};
use crate::transport::traits::{EventStream, Transport};
use crate::{Credentials, Presence, SessionEvent};

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::net::unix::OwnedWriteHalf;
use tokio::sync::{Mutex, mpsc};
use tokio_stream::wrappers::ReceiverStream;

use std::path::PathBuf;
use std::sync::Arc;

/// Command frames written to the sidecar.
#[derive(Debug, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
enum BridgeCommand<'a> {
    Connect {
        credentials: Option<&'a Credentials>,
    },
    SendText {
        recipient: &'a str,
        text: &'a str,
    },
    SendPresence {
        recipient: &'a str,
        presence: Presence,
    },
}

/// Transport adapter over the sidecar socket.
pub struct BridgeTransport {
    socket_path: PathBuf,
    writer: Arc<Mutex<Option<OwnedWriteHalf>>>,
}

impl BridgeTransport {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            writer: Arc::new(Mutex::new(None)),
        }
    }

    async fn write_command(&self, command: &BridgeCommand<'_>) -> Result<()> {
        let mut frame = serde_json::to_vec(command)
            .map_err(|error| TransportError::Send(error.to_string()))?;
        frame.push(b'\n');

        let mut guard = self.writer.lock().await;
        let writer = guard
            .as_mut()
            .ok_or_else(|| TransportError::Send("not connected".into()))?;
        writer
            .write_all(&frame)
            .await
            .map_err(|error| TransportError::Send(error.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|error| TransportError::Send(error.to_string()))?;
        Ok(())
    }
}

impl Transport for BridgeTransport {
    async fn connect(&self, credentials: Option<Credentials>) -> Result<EventStream> {
        let stream =
            UnixStream::connect(&self.socket_path)
                .await
                .map_err(|source| TransportError::Connect {
                    path: self.socket_path.display().to_string(),
                    source,
                })?;
        let (read_half, write_half) = stream.into_split();

        // Replacing the writer drops the previous session's half, which
        // also ends its reader task's peer.
        *self.writer.lock().await = Some(write_half);

        self.write_command(&BridgeCommand::Connect {
            credentials: credentials.as_ref(),
        })
        .await?;

        let (event_tx, event_rx) = mpsc::channel(256);
        tokio::spawn(async move {
            let mut lines = BufReader::new(read_half).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<SessionEvent>(line) {
                            Ok(event) => {
                                if event_tx.send(event).await.is_err() {
                                    break;
                                }
                            }
                            Err(error) => {
                                tracing::debug!(%error, "unrecognized bridge frame, dropped");
                            }
                        }
                    }
                    Ok(None) => break,
                    Err(error) => {
                        tracing::warn!(%error, "bridge socket read failed");
                        break;
                    }
                }
            }
            // Dropping event_tx ends the stream; the session manager treats
            // that as a transient close.
        });

        Ok(Box::pin(ReceiverStream::new(event_rx)))
    }

    async fn send_text(&self, recipient: &str, text: &str) -> Result<()> {
        self.write_command(&BridgeCommand::SendText { recipient, text })
            .await
    }

    async fn send_presence(&self, recipient: &str, presence: Presence) -> Result<()> {
        self.write_command(&BridgeCommand::SendPresence {
            recipient,
            presence,
        })
        .await
    }
}
