//! HTTP client for the dataset analysis backend.
//!
//! Every endpoint answers a JSON envelope with a `success` flag and, on
//! failure, a `message`. Non-2xx statuses and `success: false` both become
//! [`ApiError`]s.

mod error;

pub use error::ApiError;

use log::debug;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::app;
use crate::core::config::Config;
use crate::core::dataset::DatasetFile;
use crate::core::message::MemoryEntry;

/// Backend reply to a successful upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReceipt {
    pub file_id: Option<String>,
    pub filename: Option<String>,
    pub message: Option<String>,
}

/// A dataset currently loaded on the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSummary {
    pub file_id: String,
    pub filename: String,
    #[serde(default)]
    pub rows: u64,
    #[serde(default)]
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthReport {
    pub status: String,
    /// Whether the backend reached its language model provider.
    #[serde(default, rename = "groq_connected")]
    pub model_connected: bool,
    #[serde(default)]
    pub loaded_datasets: u64,
}

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
    memory: &'a [MemoryEntry],
}

#[derive(Deserialize)]
struct AskReply {
    #[serde(default)]
    answer: String,
}

#[derive(Deserialize)]
struct DatasetList {
    #[serde(default)]
    datasets: Vec<DatasetSummary>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("{}/{}", app::NAME, app::VERSION))
            .build()?;
        Ok(Self {
            http,
            base_url: config.server_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /api/upload` with the file in the multipart field `file`.
    pub async fn upload(
        &self,
        file: &DatasetFile,
        bytes: Vec<u8>,
    ) -> Result<UploadReceipt, ApiError> {
        debug!("Uploading {} ({} bytes)", file.name, file.size);
        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(file.mime_type())?;
        let form = Form::new().part("file", part);
        let resp = self
            .http
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await?;
        read_envelope(resp).await
    }

    /// `POST /api/ask`. `memory` is the conversation so far, excluding `question`.
    pub async fn ask(&self, question: &str, memory: &[MemoryEntry]) -> Result<String, ApiError> {
        debug!("Asking question ({} memory entries)", memory.len());
        let resp = self
            .http
            .post(self.url("/api/ask"))
            .json(&AskRequest { question, memory })
            .send()
            .await?;
        let reply: AskReply = read_envelope(resp).await?;
        Ok(reply.answer)
    }

    /// `GET /api/datasets`.
    pub async fn datasets(&self) -> Result<Vec<DatasetSummary>, ApiError> {
        let resp = self.http.get(self.url("/api/datasets")).send().await?;
        let list: DatasetList = read_envelope(resp).await?;
        Ok(list.datasets)
    }

    /// `GET /api/health`.
    pub async fn health(&self) -> Result<HealthReport, ApiError> {
        let resp = self.http.get(self.url("/api/health")).send().await?;
        read_envelope(resp).await
    }
}

/// Check status and the `success` flag, then decode the body into `T`.
async fn read_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = error::error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
        debug!("Backend returned {}: {}", status, message);
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = resp.bytes().await?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)?;
    if value.get("success").and_then(|s| s.as_bool()) != Some(true) {
        let message =
            error::message_field(&value).unwrap_or_else(|| "Request failed".to_string());
        return Err(ApiError::Rejected(message));
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::Method::{GET, POST};
    use httpmock::MockServer;
    use serde_json::json;

    use super::*;
    use crate::core::message::Role;

    fn client(base_url: String) -> ApiClient {
        ApiClient::new(&Config {
            server_url: base_url,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn csv_file() -> DatasetFile {
        DatasetFile {
            path: "sales.csv".into(),
            name: "sales.csv".to_string(),
            extension: "csv".to_string(),
            size: 8,
        }
    }

    #[tokio::test]
    async fn upload_sends_multipart_file() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/upload")
                    .body_includes("name=\"file\"")
                    .body_includes("filename=\"sales.csv\"")
                    .body_includes("a,b\n1,2\n");
                then.status(200).json_body(json!({
                    "success": true,
                    "file_id": "f-1",
                    "filename": "sales.csv",
                    "message": "File uploaded successfully"
                }));
            })
            .await;

        let receipt = client(server.base_url())
            .upload(&csv_file(), b"a,b\n1,2\n".to_vec())
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(receipt.file_id.as_deref(), Some("f-1"));
        assert_eq!(receipt.filename.as_deref(), Some("sales.csv"));
    }

    #[tokio::test]
    async fn upload_error_status_uses_body_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/upload");
                then.status(400).json_body(json!({
                    "success": false,
                    "message": "Invalid file type. Please upload CSV, Excel, or JSON files."
                }));
            })
            .await;

        let err = client(server.base_url())
            .upload(&csv_file(), b"x".to_vec())
            .await
            .unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 400);
                assert!(message.starts_with("Invalid file type"));
            }
            other => panic!("expected Status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn error_status_without_json_uses_reason() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/health");
                then.status(502).body("<html>bad gateway</html>");
            })
            .await;

        match client(server.base_url()).health().await.unwrap_err() {
            ApiError::Status { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("expected Status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn ask_sends_question_and_memory() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/ask").json_body(json!({
                    "question": "How many rows?",
                    "memory": [
                        {"role": "user", "content": "Columns?"},
                        {"role": "assistant", "content": "a, b"}
                    ]
                }));
                then.status(200)
                    .json_body(json!({"success": true, "answer": "**42** rows", "file_id": "f-1"}));
            })
            .await;

        let memory = vec![
            MemoryEntry {
                role: Role::User,
                content: "Columns?".to_string(),
            },
            MemoryEntry {
                role: Role::Assistant,
                content: "a, b".to_string(),
            },
        ];
        let answer = client(server.base_url())
            .ask("How many rows?", &memory)
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(answer, "**42** rows");
    }

    #[tokio::test]
    async fn ask_success_false_is_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/ask");
                then.status(200)
                    .json_body(json!({"success": false, "message": "No dataset loaded"}));
            })
            .await;

        let err = client(server.base_url()).ask("q", &[]).await.unwrap_err();
        assert!(matches!(&err, ApiError::Rejected(m) if m == "No dataset loaded"));
    }

    #[tokio::test]
    async fn ask_invalid_json_is_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/ask");
                then.status(200).body("not json");
            })
            .await;

        let err = client(server.base_url()).ask("q", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn datasets_lists_summaries() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/datasets");
                then.status(200).json_body(json!({
                    "success": true,
                    "datasets": [
                        {"file_id": "f-1", "filename": "sales.csv", "rows": 120, "columns": ["region", "total"]}
                    ]
                }));
            })
            .await;

        let datasets = client(server.base_url()).datasets().await.unwrap();
        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].filename, "sales.csv");
        assert_eq!(datasets[0].rows, 120);
        assert_eq!(datasets[0].columns, ["region", "total"]);
    }

    #[tokio::test]
    async fn health_report() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/health");
                then.status(200).json_body(json!({
                    "success": true,
                    "status": "healthy",
                    "groq_connected": true,
                    "loaded_datasets": 2
                }));
            })
            .await;

        let report = client(server.base_url()).health().await.unwrap();
        assert_eq!(report.status, "healthy");
        assert!(report.model_connected);
        assert_eq!(report.loaded_datasets, 2);
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let err = client("http://127.0.0.1:1".to_string())
            .health()
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
