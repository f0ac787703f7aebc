pub mod auth;
pub mod docs;

pub use auth::AuthCommands;
pub use docs::DocsCommands;
