//! Remote cipher service protocol.
//!
//! Requests and replies are plain data; the plugin shell performs the actual
//! HTTP exchange through Zellij.

pub mod codec;
pub mod messages;

pub use codec::decode_reply;
pub use messages::{
    CallKind, HttpCall, KeyRegenerationResult, ServiceCall, ServiceReply, TraceContext, REGENERATE_KEYS_PATH,
    TRANSFORM_PATH,
};
