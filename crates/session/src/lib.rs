//! Asha Session — per-connection protocol and state machine.
//!
//! The transport (see `asha-gateway`) owns the socket; this crate owns
//! everything between a raw inbound frame and the ordered stream of
//! outbound notifications: event parsing, the envelope invariant, the
//! conversation state, and the sequencing of the generation pipeline.

pub mod machine;
pub mod protocol;

pub use machine::SessionHandler;
pub use protocol::{
    parse_event, ClientEvent, Notification, Payload, STAGE_ACTIVE, STAGE_FATAL, STAGE_SLEEP,
    STAGE_WOKEN,
};
