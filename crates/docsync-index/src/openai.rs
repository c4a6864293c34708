//! OpenAI files and vector-store endpoints

use std::time::Duration;

use docsync_core::IndexConfig;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::json;

use crate::{IndexError, Result, VectorStoreApi};

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";

/// Files are uploaded with this purpose so vector stores accept them
const FILE_PURPOSE: &str = "assistants";

#[derive(Debug, Deserialize)]
struct FileObject {
    id: String,
}

/// Blocking OpenAI API client scoped to one vector store.
///
/// Construct one per run and pass it in; there is no shared global client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    api_base: String,
    api_key: String,
    vector_store_id: String,
}

impl OpenAiClient {
    pub fn new(config: &IndexConfig, api_key: impl Into<String>) -> Result<Self> {
        let vector_store_id = config.require_vector_store_id()?.to_string();
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            vector_store_id,
        })
    }

    /// Client using the API key from `OPENAI_API_KEY`.
    pub fn from_env(config: &IndexConfig) -> Result<Self> {
        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(IndexError::MissingCredentials(ENV_API_KEY))?;
        Self::new(config, api_key)
    }

    pub fn vector_store_id(&self) -> &str {
        &self.vector_store_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<reqwest::blocking::Response> {
        let response = request.bearer_auth(&self.api_key).send()?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(IndexError::Status {
                operation,
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            })
        }
    }
}

impl VectorStoreApi for OpenAiClient {
    fn create_file(&mut self, file_name: &str, content: &str) -> Result<String> {
        let part = Part::bytes(content.as_bytes().to_vec())
            .file_name(file_name.to_string())
            .mime_str("text/markdown")?;
        let form = Form::new().text("purpose", FILE_PURPOSE).part("file", part);

        let response = self.send("create file", self.http.post(self.url("files")).multipart(form))?;
        let file: FileObject = response.json()?;
        tracing::debug!(file_id = %file.id, %file_name, "created file");
        Ok(file.id)
    }

    fn attach_file(&mut self, file_id: &str) -> Result<()> {
        let url = self.url(&format!("vector_stores/{}/file_batches", self.vector_store_id));
        self.send(
            "attach file",
            self.http.post(url).json(&json!({ "file_ids": [file_id] })),
        )?;
        tracing::debug!(%file_id, vector_store = %self.vector_store_id, "attached file");
        Ok(())
    }

    fn delete_file(&mut self, file_id: &str) -> Result<()> {
        self.send("delete file", self.http.delete(self.url(&format!("files/{}", file_id))))?;
        Ok(())
    }
}
