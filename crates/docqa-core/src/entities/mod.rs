//! Entity structs for the docqa domain objects.
//!
//! Shapes follow the backend serializers. Optional and server-computed fields
//! carry `#[serde(default)]` so partial payloads still decode.

mod document;
mod profile;
mod qa;

pub use document::{Document, DocumentChunk};
pub use profile::Profile;
pub use qa::{Conversation, Question, Source};
