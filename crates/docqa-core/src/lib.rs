//! # docqa-core
//!
//! Core types shared across the docqa crates:
//! - Entity structs for profiles, documents, chunks, conversations, and questions
//! - Status enums with state machine transitions
//! - Request payloads with pre-dispatch validation
//! - Backend response envelopes
//! - The tagged [`ActionError`] surfaced through every slice

pub mod entities;
pub mod enums;
pub mod errors;
pub mod requests;
pub mod responses;

pub use errors::ActionError;
