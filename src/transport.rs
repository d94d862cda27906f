//! Transport seam to the messaging network.
//!
//! The wire protocol (handshake, encryption, delivery retries) lives in a
//! sidecar process; this crate only consumes its event stream and issues
//! send commands.

pub mod bridge;
pub mod traits;

pub use bridge::BridgeTransport;
pub use traits::{EventStream, Transport, TransportDyn};
