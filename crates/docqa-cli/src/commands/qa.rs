use docqa_core::requests::AskQuestion;

use crate::bootstrap::CliStore;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::{AskArgs, ConversationsArgs};
use crate::output::{fail, output};

/// Handle `dqa ask`.
pub async fn ask(args: &AskArgs, store: &CliStore, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut request = AskQuestion::new(&args.question);
    if !args.documents.is_empty() {
        request = request.against(args.documents.clone());
    }
    if let Some(conversation) = &args.conversation {
        request = request.in_conversation(conversation);
    }

    match store.ask_question(request).await {
        Ok(answered) => output(&answered.question, flags.format),
        Err(_) => report_qa_error(store, flags),
    }
}

/// Handle `dqa conversations`.
pub async fn conversations(
    args: &ConversationsArgs,
    store: &CliStore,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if let Some(id) = &args.delete {
        if store.delete_conversation(id).await.is_err() {
            return report_qa_error(store, flags);
        }
        return output(&serde_json::json!({"deleted": id}), flags.format);
    }
    if store.fetch_conversations().await.is_err() {
        return report_qa_error(store, flags);
    }
    output(&store.snapshot().qa.conversations, flags.format)
}

fn report_qa_error(store: &CliStore, flags: &GlobalFlags) -> anyhow::Result<()> {
    match store.snapshot().qa.last_error {
        Some(error) => fail(&error, flags.format),
        None => anyhow::bail!("question-answering operation failed"),
    }
}
