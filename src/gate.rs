//! Per-sender admission gate.
//!
//! While a sender's message is being served, further messages from the same
//! sender are dropped. Release is deferred by a cooldown so a rapid
//! double-send cannot trigger a second generation the moment the first
//! reply lands. Senders are independent; there is no global cap.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Default cooldown before a released sender may be admitted again.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(15);

/// Mutual-exclusion set of senders currently being served.
///
/// Cheap to clone; clones share the same pending set.
#[derive(Clone)]
pub struct AdmissionGate {
    pending: Arc<Mutex<HashSet<String>>>,
    cooldown: Duration,
}

impl AdmissionGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashSet::new())),
            cooldown,
        }
    }

    /// Try to admit a message from `sender`.
    ///
    /// Returns false if the sender is already pending. Check-and-insert
    /// happens under a single lock acquisition, so two concurrent admit
    /// attempts for the same sender can never both succeed.
    pub fn try_admit(&self, sender: &str) -> bool {
        self.pending
            .lock()
            .expect("pending-sender set lock poisoned")
            .insert(sender.to_owned())
    }

    /// Schedule removal of `sender` after the cooldown elapses.
    ///
    /// The entry self-expires on a spawned timer; no cleanup pass exists.
    pub fn release(&self, sender: &str) {
        let pending = Arc::clone(&self.pending);
        let sender = sender.to_owned();
        let cooldown = self.cooldown;
        tokio::spawn(async move {
            tokio::time::sleep(cooldown).await;
            pending
                .lock()
                .expect("pending-sender set lock poisoned")
                .remove(&sender);
        });
    }
}

impl std::fmt::Debug for AdmissionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmissionGate")
            .field("cooldown", &self.cooldown)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENDER: &str = "5511999990000@s.whatsapp.net";

    #[tokio::test]
    async fn second_admit_while_pending_is_rejected() {
        let gate = AdmissionGate::new(DEFAULT_COOLDOWN);
        assert!(gate.try_admit(SENDER));
        assert!(!gate.try_admit(SENDER));
    }

    #[tokio::test]
    async fn senders_are_independent() {
        let gate = AdmissionGate::new(DEFAULT_COOLDOWN);
        assert!(gate.try_admit("a@s.whatsapp.net"));
        assert!(gate.try_admit("b@s.whatsapp.net"));
    }

    #[tokio::test(start_paused = true)]
    async fn release_only_takes_effect_after_cooldown() {
        let gate = AdmissionGate::new(Duration::from_secs(15));
        assert!(gate.try_admit(SENDER));
        gate.release(SENDER);

        // Before the cooldown elapses the sender is still pending.
        tokio::time::sleep(Duration::from_secs(14)).await;
        assert!(!gate.try_admit(SENDER));

        // Past the cooldown the sender may be admitted again.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(gate.try_admit(SENDER));
    }
}
