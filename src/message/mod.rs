//! Response parsing for the assistant backend
//!
//! Every backend answer is a JSON envelope with a `status` field; the
//! [`parser`] turns raw responses into typed payloads or classified failures.

pub mod parser;

pub use parser::{
    AckPayload, ChatPayload, DocumentPayload, UserInfoPayload, parse_envelope, parse_payload,
};
