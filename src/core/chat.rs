//! Chat flow: open a dataset and ask questions, keeping the session in step
//! with the backend.

use std::path::Path;

use log::{info, warn};

use crate::core::api::{ApiClient, ApiError};
use crate::core::dataset::{self, DatasetError};
use crate::core::message::{Message, Role};
use crate::core::session::Session;

/// Assistant greeting after a successful upload.
pub const WELCOME: &str =
    "Hello! I'm ready to help you analyze your dataset. What would you like to know?";

/// Shown when the backend answered but reported a failure.
pub const ANSWER_FAILED: &str = "Sorry, I encountered an error while processing your question.";

/// Shown when the backend could not be reached or answered with an error status.
pub const CONNECTION_FAILED: &str =
    "Sorry, I'm having trouble connecting to the server. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Please upload a dataset first.")]
    NoDataset,
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("Error uploading file: {0}")]
    Upload(ApiError),
}

/// Validate and upload `path`, making it the session's active dataset.
///
/// A file that passes validation starts a new conversation: the previous
/// dataset, memory and transcript are cleared before the upload. On success
/// the assistant welcome opens the transcript. On upload failure the session
/// is left without a dataset.
pub async fn open_dataset(
    session: &mut Session,
    client: &ApiClient,
    path: &Path,
) -> Result<(), ChatError> {
    let file = dataset::inspect(path)?;
    let bytes = dataset::read(&file).await?;
    session.reset();
    session.attach(file.clone(), None);

    match client.upload(&file, bytes).await {
        Ok(receipt) => {
            info!(
                "Uploaded {} as {} ({})",
                file.name,
                receipt.filename.as_deref().unwrap_or(&file.name),
                receipt.message.as_deref().unwrap_or("no message")
            );
            session.attach(file, receipt.file_id);
            session.push_message(Role::Assistant, WELCOME);
            Ok(())
        }
        Err(e) => {
            warn!("Upload of {} failed: {}", file.name, e);
            session.detach();
            Err(ChatError::Upload(e))
        }
    }
}

/// Ask a question about the active dataset.
///
/// Returns `Ok(None)` for a blank question. Otherwise the question and the
/// reply (the answer, or a failure notice) are appended to the transcript and
/// the reply is returned. Only answered exchanges enter the memory.
pub async fn ask<'s>(
    session: &'s mut Session,
    client: &ApiClient,
    question: &str,
) -> Result<Option<&'s Message>, ChatError> {
    let question = question.trim();
    if question.is_empty() {
        return Ok(None);
    }
    if !session.has_dataset() {
        return Err(ChatError::NoDataset);
    }

    session.push_message(Role::User, question);
    let reply = match client.ask(question, session.memory()).await {
        Ok(answer) => {
            session.remember(question, &answer);
            answer
        }
        Err(ApiError::Rejected(message)) => {
            warn!("Backend could not answer: {}", message);
            ANSWER_FAILED.to_string()
        }
        Err(e) => {
            warn!("Ask request failed: {}", e);
            CONNECTION_FAILED.to_string()
        }
    };
    Ok(Some(session.push_message(Role::Assistant, reply)))
}
