use clap::{Args, Subcommand};

use super::subcommands::{AuthCommands, DocsCommands};

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Log in, register, and inspect the session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Manage uploaded documents.
    Docs {
        #[command(subcommand)]
        action: DocsCommands,
    },
    /// Ask a question against your documents.
    Ask(AskArgs),
    /// List your conversations, or delete one.
    Conversations(ConversationsArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AskArgs {
    pub question: String,
    /// Restrict the search to these documents (repeatable). Searches all by default.
    #[arg(long = "doc")]
    pub documents: Vec<String>,
    /// Continue an existing conversation.
    #[arg(long)]
    pub conversation: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ConversationsArgs {
    /// Delete this conversation instead of listing.
    #[arg(long)]
    pub delete: Option<String>,
}
