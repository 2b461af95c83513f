//! HTTP implementation of the assistant API
//!
//! Talks to an OpenAI-compatible endpoint:
//! - `POST {base_url}/files` (multipart upload)
//! - `POST {base_url}/assistants` (JSON body, assistants beta header)

use super::{ApiConfig, AssistantApi, AssistantId, AssistantSpec, FileId, UploadPurpose};
use crate::Result;
use crate::credential::SecureString;
use crate::error::{ApiError, IoError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const ASSISTANTS_BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "assistants=v1");

/// Any API object; only the identifier is needed
#[derive(Debug, Deserialize)]
struct ObjectResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// OpenAI-compatible API client
pub struct OpenAiClient {
    http: reqwest::Client,
    config: ApiConfig,
    api_key: SecureString,
}

impl OpenAiClient {
    /// Create a new client
    pub fn new(config: ApiConfig, api_key: SecureString) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("instant-assistant/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::from)?;

        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    /// Build an endpoint URL under the configured base
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Send a request and pull the object id out of the response
    async fn send_for_id(&self, request: reqwest::RequestBuilder) -> Result<String> {
        let response = request
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;

        if !status.is_success() {
            return Err(ApiError::status(status.as_u16(), &error_message(&body)).into());
        }

        let object: ObjectResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::decode(format!("{e}: {body}")))?;
        Ok(object.id)
    }
}

/// Extract the message of an error response, falling back to the raw body
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[async_trait]
impl AssistantApi for OpenAiClient {
    async fn upload_file(&self, path: &Path, purpose: UploadPurpose) -> Result<FileId> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| IoError::from_std(e).with_path(path))?;

        // The service keeps the file name, so send the original one
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let form = Form::new()
            .text("purpose", purpose.as_str())
            .part("file", Part::bytes(bytes).file_name(file_name));

        log::debug!("POST {} ({})", self.endpoint("files"), path.display());
        let id = self
            .send_for_id(self.http.post(self.endpoint("files")).multipart(form))
            .await?;
        Ok(FileId::new(id))
    }

    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<AssistantId> {
        log::debug!(
            "POST {} (model {}, {} file(s))",
            self.endpoint("assistants"),
            spec.model,
            spec.file_ids.len()
        );

        let request = self
            .http
            .post(self.endpoint("assistants"))
            .header(ASSISTANTS_BETA_HEADER.0, ASSISTANTS_BETA_HEADER.1)
            .json(spec);

        let id = self.send_for_id(request).await?;
        Ok(AssistantId::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> OpenAiClient {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        OpenAiClient::new(config, SecureString::new("sk-test")).unwrap()
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        assert_eq!(
            client("https://api.openai.com/v1").endpoint("files"),
            "https://api.openai.com/v1/files"
        );
        assert_eq!(
            client("http://localhost:8080/v1/").endpoint("assistants"),
            "http://localhost:8080/v1/assistants"
        );
    }

    #[test]
    fn test_error_message_from_envelope() {
        let body = r#"{"error":{"message":"Invalid file format","type":"invalid_request_error"}}"#;
        assert_eq!(error_message(body), "Invalid file format");
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
        assert_eq!(error_message(""), "empty response body");
    }

    #[tokio::test]
    async fn test_upload_of_missing_file_fails_before_request() {
        let client = client("http://127.0.0.1:9");
        let err = client
            .upload_file(
                Path::new("/definitely/not/here.md"),
                UploadPurpose::Assistants,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, crate::Error::Io(_)));
        assert!(err.to_string().contains("/definitely/not/here.md"));
    }
}
