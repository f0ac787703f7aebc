pub mod auth;
pub mod docs;
pub mod qa;

use crate::bootstrap::CliStore;
use crate::cli::{Commands, GlobalFlags};

/// Route a parsed command to its handler.
pub async fn dispatch(command: &Commands, store: &CliStore, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => auth::handle(action, store, flags).await,
        Commands::Docs { action } => docs::handle(action, store, flags).await,
        Commands::Ask(args) => qa::ask(args, store, flags).await,
        Commands::Conversations(args) => qa::conversations(args, store, flags).await,
    }
}
