use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Document commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DocsCommands {
    /// List your documents.
    List,
    /// Show one document and its processing status.
    Show { id: String },
    /// Upload a PDF, DOCX, TXT, or Markdown file.
    Upload(DocsUploadArgs),
    /// Delete a document.
    Delete { id: String },
    /// List the indexed chunks of a processed document.
    Chunks { id: String },
}

#[derive(Clone, Debug, Args)]
pub struct DocsUploadArgs {
    pub path: PathBuf,
    /// Defaults to the file name without its extension.
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub collection: Option<String>,
}
