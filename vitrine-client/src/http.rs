//! HTTP client for the repository content API

use crate::{ClientError, ClientResult, FileStore, RemoteFile, StoreConfig};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use shared::encoding;

const USER_AGENT: &str = concat!("vitrine/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";

/// `GET /repos/{owner}/{repo}/contents/{path}` response (file variant)
#[derive(Debug, Deserialize)]
struct ContentResponse {
    sha: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
}

/// `PUT /repos/{owner}/{repo}/contents/{path}` request
#[derive(Debug, Serialize)]
struct WriteRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct WriteResponse {
    content: WrittenContent,
}

#[derive(Debug, Deserialize)]
struct WrittenContent {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Content API client bound to one repository and branch
#[derive(Debug, Clone)]
pub struct ContentsClient {
    client: Client,
    api_base: Url,
    owner: String,
    repo: String,
    branch: String,
    token: Option<String>,
}

impl ContentsClient {
    /// Create a new client from configuration
    pub fn new(config: &StoreConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .user_agent(USER_AGENT)
            .build()?;

        let api_base = Url::parse(&config.api_base)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.api_base, e)))?;

        Ok(Self {
            client,
            api_base,
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            branch: config.branch.clone(),
            token: config.token.clone(),
        })
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// `{api_base}/repos/{owner}/{repo}/contents/{path}`, each segment escaped
    fn contents_url(&self, path: &str) -> ClientResult<Url> {
        let mut url = self.api_base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(self.api_base.to_string()))?;
            segments
                .pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repo.as_str(), "contents"])
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        Ok(url)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, ACCEPT);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        request
    }

    /// Map a non-success response to the matching error
    async fn error_from(path: &str, response: reqwest::Response) -> ClientError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|b| b.message)
            .unwrap_or(text);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(format!("{}: {}", path, message)),
            StatusCode::CONFLICT => ClientError::Conflict(message),
            // Missing or malformed sha on an existing file
            StatusCode::UNPROCESSABLE_ENTITY if message.contains("sha") => {
                ClientError::Conflict(message)
            }
            _ => ClientError::Remote {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl FileStore for ContentsClient {
    async fn read_file(&self, path: &str) -> ClientResult<RemoteFile> {
        let mut url = self.contents_url(path)?;
        url.query_pairs_mut().append_pair("ref", &self.branch);
        tracing::debug!(path, branch = %self.branch, "Reading file");

        let response = self.request(reqwest::Method::GET, url).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(path, response).await);
        }

        let text = response.text().await?;
        let body: ContentResponse = serde_json::from_str(&text)
            .map_err(|_| ClientError::InvalidResponse(format!("{} is not a file", path)))?;

        match body.encoding.as_deref() {
            Some("base64") => {}
            Some(other) => {
                return Err(ClientError::InvalidResponse(format!(
                    "{} has unsupported encoding '{}'",
                    path, other
                )));
            }
            None => {
                return Err(ClientError::InvalidResponse(format!(
                    "{} has no inline content",
                    path
                )));
            }
        }

        let content = encoding::decode_content(body.content.as_deref().unwrap_or_default())?;
        tracing::debug!(path, revision = %body.sha, bytes = content.len(), "File read");

        Ok(RemoteFile {
            revision: body.sha,
            content,
        })
    }

    async fn write_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
        revision: Option<&str>,
    ) -> ClientResult<String> {
        let url = self.contents_url(path)?;
        let body = WriteRequest {
            message,
            content: encoding::encode_content(content),
            branch: &self.branch,
            sha: revision,
        };
        tracing::debug!(path, branch = %self.branch, revision = ?revision, "Writing file");

        let response = self
            .request(reqwest::Method::PUT, url)
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from(path, response).await);
        }

        let written: WriteResponse = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("write of {}: {}", path, e)))?;
        tracing::info!(path, revision = %written.content.sha, "File committed");

        Ok(written.content.sha)
    }
}
