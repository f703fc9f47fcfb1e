use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::constants::store::{GITHUB_ACCEPT, REQUEST_TIMEOUT_SECS};
use crate::error::{Error, Result};
use crate::store::{Document, DocumentStore};
use crate::types::Revision;

/// Document store backed by the GitHub repository contents API.
///
/// Each document is a file in the configured repository; its blob SHA is
/// the revision, and every write or delete is a commit with the given
/// message.
#[derive(Clone)]
pub struct GitHubStore {
    token: String,
    owner: String,
    repo: String,
    api_base: String,
    client: Client,
}

#[derive(Deserialize)]
struct ContentsResponse {
    sha: String,
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct WriteResponse {
    content: ContentsEntry,
}

#[derive(Deserialize)]
struct ContentsEntry {
    sha: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Serialize)]
struct WriteRequest<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Serialize)]
struct DeleteRequest<'a> {
    message: &'a str,
    sha: &'a str,
}

impl GitHubStore {
    /// Create a store client from config
    pub fn new(config: &Config) -> Self {
        Self {
            token: config.github_token.clone(),
            owner: config.github_owner.clone(),
            repo: config.github_repo.clone(),
            api_base: config.api_base.clone(),
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .user_agent(config.user_agent())
                .build()
                .unwrap_or_default(),
        }
    }

    /// Check if credentials are configured
    fn is_configured(&self) -> bool {
        !self.token.is_empty() && !self.owner.is_empty() && !self.repo.is_empty()
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(Error::config(
                "GitHub document store not configured",
                "Set GITHUB_TOKEN, GITHUB_OWNER and GITHUB_REPO environment variables",
            ))
        }
    }

    fn contents_url(&self, path: &str) -> String {
        format!("{}/repos/{}/{}/contents/{}", self.api_base, self.owner, self.repo, path)
    }

    /// Authenticated request against the contents endpoint for `path`
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.contents_url(path))
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, GITHUB_ACCEPT)
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response> {
        request
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request for {path} failed: {e}")))
    }
}

/// Turn a failed write/delete response into an error.
async fn write_error(resp: Response, path: &str) -> Error {
    let status = resp.status();
    let detail = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| status.to_string());
    classify_write_failure(status, path, &detail)
}

fn classify_write_failure(status: StatusCode, path: &str, detail: &str) -> Error {
    match status {
        StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            Error::Conflict { path: path.to_string() }
        }
        _ => Error::store_status(format!("Writing {path} failed: {detail}"), status.as_u16()),
    }
}

/// Decode the base64 payload of a contents response.
///
/// GitHub wraps the encoded text in newlines, which are stripped first.
fn decode_content(encoded: &str, path: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = base64::decode(compact)
        .map_err(|e| Error::parse(format!("Invalid base64 in {path}: {e}"), None))?;
    String::from_utf8(bytes).map_err(|e| Error::parse(format!("{path} is not UTF-8: {e}"), None))
}

#[async_trait]
impl DocumentStore for GitHubStore {
    async fn get(&self, path: &str) -> Result<Option<Document>> {
        self.ensure_configured()?;
        tracing::debug!("GET contents {path}");

        let resp = self.send(self.request(Method::GET, path), path).await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::store_status(
                format!("Request for {path} returned {status}"),
                status.as_u16(),
            ));
        }

        let body: ContentsResponse = resp
            .json()
            .await
            .map_err(|e| Error::parse(format!("Invalid JSON for {path}: {e}"), None))?;

        Ok(Some(Document {
            content: decode_content(&body.content, path)?,
            revision: Revision::new(body.sha),
        }))
    }

    async fn put(
        &self,
        path: &str,
        content: &str,
        revision: Option<&Revision>,
        message: &str,
    ) -> Result<Revision> {
        self.ensure_configured()?;
        tracing::info!("PUT contents {path}: {message}");

        let body = WriteRequest {
            message,
            content: base64::encode(content),
            sha: revision.map(Revision::as_str),
        };
        let resp = self.send(self.request(Method::PUT, path).json(&body), path).await?;

        if !resp.status().is_success() {
            return Err(write_error(resp, path).await);
        }

        let written: WriteResponse = resp
            .json()
            .await
            .map_err(|e| Error::parse(format!("Invalid JSON after writing {path}: {e}"), None))?;
        Ok(Revision::new(written.content.sha))
    }

    async fn delete(&self, path: &str, revision: &Revision, message: &str) -> Result<()> {
        self.ensure_configured()?;
        tracing::info!("DELETE contents {path}: {message}");

        let body = DeleteRequest { message, sha: revision.as_str() };
        let resp = self.send(self.request(Method::DELETE, path).json(&body), path).await?;

        if !resp.status().is_success() {
            return Err(write_error(resp, path).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn configured() -> Config {
        Config {
            github_token: "t".into(),
            github_owner: "someone".into(),
            github_repo: "songs".into(),
            ..Config::default()
        }
    }

    #[test]
    fn contents_url_includes_repo_and_path() {
        let store = GitHubStore::new(&configured());
        assert_eq!(
            store.contents_url("data/songs.json"),
            "https://api.github.com/repos/someone/songs/contents/data/songs.json"
        );
    }

    #[test]
    fn decodes_wrapped_base64_as_utf8() {
        let encoded = base64::encode("{\"title\":\"晴天\"}");
        let (head, tail) = encoded.split_at(10);
        let wrapped = format!("{head}\n{tail}\n");
        assert_eq!(decode_content(&wrapped, "x").unwrap(), "{\"title\":\"晴天\"}");
        assert!(decode_content("***", "x").is_err());
    }

    #[test]
    fn sha_mismatch_statuses_are_conflicts() {
        assert!(matches!(
            classify_write_failure(StatusCode::CONFLICT, "a", "is at abc"),
            Error::Conflict { .. }
        ));
        assert!(matches!(
            classify_write_failure(StatusCode::UNPROCESSABLE_ENTITY, "a", "sha wasn't supplied"),
            Error::Conflict { .. }
        ));
        assert!(matches!(
            classify_write_failure(StatusCode::UNAUTHORIZED, "a", "Bad credentials"),
            Error::Store { status: Some(401), hint: Some(_), .. }
        ));
    }

    #[test]
    fn write_request_omits_missing_sha() {
        let body = WriteRequest { message: "m", content: "Yw==".into(), sha: None };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("sha").is_none());
    }

    #[tokio::test]
    async fn unconfigured_store_refuses_requests() {
        let store = GitHubStore::new(&Config::default());
        let err = store.get("data/songs.json").await.unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
