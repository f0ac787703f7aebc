use std::path::Path;

use anyhow::Context;
use docqa_core::enums::FileType;
use docqa_core::requests::DocumentUpload;

use crate::bootstrap::CliStore;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::DocsCommands;
use crate::cli::subcommands::docs::DocsUploadArgs;
use crate::output::{fail, output};

/// Handle `dqa docs <subcommand>`.
pub async fn handle(action: &DocsCommands, store: &CliStore, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        DocsCommands::List => match store.fetch_documents().await {
            Ok(documents) => output(&documents, flags.format),
            Err(_) => report_documents_error(store, flags),
        },
        DocsCommands::Show { id } => {
            if store.fetch_document(id).await.is_err() {
                return report_documents_error(store, flags);
            }
            // The slice may have kept a fresher copy than the reply.
            output(&store.snapshot().documents.get(id), flags.format)
        }
        DocsCommands::Upload(args) => match store.upload_document(read_upload(args)?).await {
            Ok(document) => output(&document, flags.format),
            Err(_) => report_documents_error(store, flags),
        },
        DocsCommands::Delete { id } => match store.delete_document(id).await {
            Ok(()) => output(&serde_json::json!({"deleted": id}), flags.format),
            Err(_) => report_documents_error(store, flags),
        },
        DocsCommands::Chunks { id } => match store.fetch_chunks(id).await {
            Ok(chunks) => output(&chunks, flags.format),
            Err(_) => report_documents_error(store, flags),
        },
    }
}

fn report_documents_error(store: &CliStore, flags: &GlobalFlags) -> anyhow::Result<()> {
    match store.snapshot().documents.last_error {
        Some(error) => fail(&error, flags.format),
        None => anyhow::bail!("documents operation failed"),
    }
}

fn read_upload(args: &DocsUploadArgs) -> anyhow::Result<DocumentUpload> {
    let path = args.path.as_path();
    let file_type = FileType::from_path(path).with_context(|| {
        format!(
            "unsupported file type: {} (expected pdf, docx, txt, or md)",
            path.display()
        )
    })?;
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(DocumentUpload {
        title: args.title.clone().unwrap_or_else(|| default_title(path)),
        file_name: path
            .file_name()
            .map_or_else(|| "upload".to_string(), |name| name.to_string_lossy().into_owned()),
        file_type,
        collection: args.collection.clone(),
        bytes,
    })
}

fn default_title(path: &Path) -> String {
    path.file_stem()
        .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn default_title_strips_extension() {
        assert_eq!(default_title(Path::new("/tmp/Quarterly Report.pdf")), "Quarterly Report");
    }

    #[test]
    fn unsupported_extension_is_refused_before_reading() {
        let args = DocsUploadArgs {
            path: PathBuf::from("/nonexistent/sheet.xlsx"),
            title: None,
            collection: None,
        };
        let err = read_upload(&args).unwrap_err();
        assert!(err.to_string().contains("unsupported file type"));
    }
}
