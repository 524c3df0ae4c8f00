//! HTTP implementation of the facilities API

use crate::api::ApiService;
use crate::error::{Error, Result};
use crate::issues::IssueFilter;
use crate::types::{AnalysisResult, Issue, NewIssue, Status, UploadSlot};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Facilities API client using reqwest
///
/// No timeout is set beyond the transport default and nothing is retried.
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadSlotPayload<'a> {
    file_name: &'a str,
    file_type: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzePayload<'a> {
    image_key: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateStatusPayload<'a> {
    issue_id: &'a str,
    status: Status,
}

#[derive(Serialize)]
struct SubscribePayload<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct SubscribeResponse {
    message: String,
}

impl HttpApiClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("campus-fix/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Send a request and decode its JSON body, mapping every failure through `fail`
async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    fail: fn(String) -> Error,
) -> Result<T> {
    send(request, fail)
        .await?
        .json()
        .await
        .map_err(|e| fail(e.to_string()))
}

async fn send(request: RequestBuilder, fail: fn(String) -> Error) -> Result<reqwest::Response> {
    request
        .send()
        .await
        .map_err(|e| fail(e.to_string()))?
        .error_for_status()
        .map_err(|e| fail(e.to_string()))
}

#[async_trait]
impl ApiService for HttpApiClient {
    async fn request_upload_slot(&self, file_name: &str, mime_type: &str) -> Result<UploadSlot> {
        let url = self.api_url("/upload-url");
        debug!(%url, file_name, mime_type, "requesting upload slot");

        let payload = UploadSlotPayload {
            file_name,
            file_type: mime_type,
        };

        fetch_json(self.client.post(&url).json(&payload), Error::UploadSlot).await
    }

    async fn upload_bytes(&self, write_url: &str, bytes: &[u8], mime_type: &str) -> Result<()> {
        debug!(size = bytes.len(), mime_type, "uploading image bytes");

        send(
            self.client
                .put(write_url)
                .header(CONTENT_TYPE, mime_type)
                .body(bytes.to_vec()),
            Error::Upload,
        )
        .await?;

        Ok(())
    }

    async fn analyze_image(&self, object_key: &str) -> Result<AnalysisResult> {
        let url = self.api_url("/analyze-image");
        debug!(%url, object_key, "requesting image analysis");

        let payload = AnalyzePayload {
            image_key: object_key,
        };

        fetch_json(self.client.post(&url).json(&payload), Error::Analysis).await
    }

    async fn create_issue(&self, fields: &NewIssue) -> Result<Issue> {
        let url = self.api_url("/issues");
        debug!(%url, image_key = %fields.image_key, "creating issue");

        fetch_json(self.client.post(&url).json(fields), Error::Create).await
    }

    async fn list_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>> {
        let url = self.api_url("/issues");
        let params = filter.query_pairs();
        debug!(%url, ?params, "listing issues");

        let mut request = self.client.get(&url);
        if !params.is_empty() {
            request = request.query(&params);
        }

        fetch_json(request, Error::List).await
    }

    async fn update_issue_status(&self, issue_id: &str, status: Status) -> Result<Issue> {
        let url = self.api_url(&format!(
            "/issues/{}/status",
            urlencoding::encode(issue_id)
        ));
        debug!(%url, %status, "updating issue status");

        let payload = UpdateStatusPayload { issue_id, status };

        fetch_json(self.client.patch(&url).json(&payload), Error::UpdateStatus).await
    }

    async fn subscribe(&self, email: &str) -> Result<String> {
        let url = self.api_url("/subscribe");
        debug!(%url, "subscribing to notifications");

        let response: SubscribeResponse =
            fetch_json(self.client.post(&url).json(&SubscribePayload { email }), Error::Subscribe)
                .await?;

        Ok(response.message)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
