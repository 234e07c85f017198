use crate::config::GatewayConfig;
use crate::domain::model::{NewContent, RemoteFile, StoredFile};
use crate::domain::ports::ContentsStore;
use crate::utils::error::{Result, UploadError};
use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

const USER_AGENT: &str = concat!("skillnest-upload/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";

/// Contents-API backed store. Holds nothing beyond the HTTP client and
/// configuration; one instance per invocation is the expected lifecycle.
/// No timeout is configured on outbound calls.
#[derive(Debug, Clone)]
pub struct GithubContents {
    client: Client,
    config: GatewayConfig,
}

#[derive(Debug, Deserialize)]
struct PutContentResponse {
    content: ContentInfo,
}

#[derive(Debug, Deserialize)]
struct ContentInfo {
    sha: String,
}

impl GithubContents {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.config.api_base, self.config.owner, self.config.repo, path
        )
    }

    // The contents API rejects requests without a user agent.
    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.config.token)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, ACCEPT)
    }

    async fn remote_rejection(status: StatusCode, response: Response) -> UploadError {
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request rejected")
                    .to_string()
            });

        UploadError::Remote {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl ContentsStore for GithubContents {
    async fn get_file(&self, path: &str) -> Result<Option<RemoteFile>> {
        let url = self.contents_url(path);
        tracing::debug!("fetching {url}");
        let response = self.authed(self.client.get(&url)).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::remote_rejection(status, response).await);
        }

        Ok(Some(response.json::<RemoteFile>().await?))
    }

    async fn put_file(&self, path: &str, new: &NewContent) -> Result<StoredFile> {
        let url = self.contents_url(path);
        tracing::debug!("writing {url} ({} base64 chars)", new.content.len());
        let response = self.authed(self.client.put(&url)).json(new).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::remote_rejection(status, response).await);
        }

        let body: PutContentResponse = response.json().await?;
        Ok(StoredFile {
            sha: body.content.sha,
        })
    }

    async fn fetch_raw(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let response = self.client.get(self.raw_content_url(path)).send().await?;
        if !response.status().is_success() {
            return Ok(None);
        }
        Ok(Some(response.bytes().await?.to_vec()))
    }

    fn raw_content_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.config.raw_base, self.config.owner, self.config.repo, self.config.branch, path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn test_store(server: &MockServer) -> GithubContents {
        GithubContents::new(GatewayConfig {
            token: "test-token".to_string(),
            owner: "skillnest".to_string(),
            repo: "course-files".to_string(),
            api_base: server.base_url(),
            raw_base: server.base_url(),
            branch: "main".to_string(),
        })
    }

    #[tokio::test]
    async fn get_file_sends_bearer_auth_and_parses_sha() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/repos/skillnest/course-files/contents/courses.json")
                .header("authorization", "Bearer test-token");
            then.status(200)
                .json_body(json!({ "sha": "abc123", "content": "W10=", "path": "courses.json" }));
        });

        let file = test_store(&server)
            .get_file("courses.json")
            .await
            .unwrap()
            .unwrap();

        mock.assert();
        assert_eq!(file.sha, "abc123");
        assert_eq!(file.content, "W10=");
    }

    #[tokio::test]
    async fn get_file_maps_404_to_absent() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/skillnest/course-files/contents/courses.json");
            then.status(404).json_body(json!({ "message": "Not Found" }));
        });

        let file = test_store(&server).get_file("courses.json").await.unwrap();
        assert!(file.is_none());
    }

    #[tokio::test]
    async fn get_file_surfaces_other_rejections() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/skillnest/course-files/contents/courses.json");
            then.status(401)
                .json_body(json!({ "message": "Bad credentials" }));
        });

        let err = test_store(&server)
            .get_file("courses.json")
            .await
            .unwrap_err();
        match err {
            UploadError::Remote { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Bad credentials");
            }
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn put_file_returns_the_new_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/repos/skillnest/course-files/contents/notes/intro.md")
                .header("authorization", "Bearer test-token")
                .json_body_partial(r#"{ "message": "Upload notes/intro.md", "content": "aGVsbG8=" }"#);
            then.status(201)
                .json_body(json!({ "content": { "sha": "newsha", "path": "notes/intro.md" } }));
        });

        let stored = test_store(&server)
            .put_file(
                "notes/intro.md",
                &NewContent {
                    message: "Upload notes/intro.md".to_string(),
                    content: "aGVsbG8=".to_string(),
                    sha: None,
                },
            )
            .await
            .unwrap();

        mock.assert();
        assert_eq!(stored.sha, "newsha");
    }

    #[tokio::test]
    async fn put_file_relays_conflict_messages() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT)
                .path("/repos/skillnest/course-files/contents/courses.json");
            then.status(409)
                .json_body(json!({ "message": "courses.json does not match abc123" }));
        });

        let err = test_store(&server)
            .put_file(
                "courses.json",
                &NewContent {
                    message: "Add course: A".to_string(),
                    content: "W10=".to_string(),
                    sha: Some("abc123".to_string()),
                },
            )
            .await
            .unwrap_err();

        match err {
            UploadError::Remote { status, message } => {
                assert_eq!(status, 409);
                assert!(message.contains("does not match"));
            }
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejections_without_json_bodies_fall_back_to_status_text() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT)
                .path("/repos/skillnest/course-files/contents/courses.json");
            then.status(502).body("bad gateway");
        });

        let err = test_store(&server)
            .put_file(
                "courses.json",
                &NewContent {
                    message: "Add course: A".to_string(),
                    content: "W10=".to_string(),
                    sha: None,
                },
            )
            .await
            .unwrap_err();

        match err {
            UploadError::Remote { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_raw_maps_failures_to_absent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/skillnest/course-files/main/courses.json");
            then.status(200).body(r#"[{"id":1,"title":"A"}]"#);
        });

        let store = test_store(&server);
        let bytes = store.fetch_raw("courses.json").await.unwrap().unwrap();
        mock.assert();
        assert_eq!(bytes, br#"[{"id":1,"title":"A"}]"#.to_vec());

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/skillnest/course-files/main/courses.json");
            then.status(404);
        });
        let absent = test_store(&server).fetch_raw("courses.json").await.unwrap();
        assert!(absent.is_none());
    }

    #[test]
    fn raw_content_url_templates_owner_repo_branch_and_path() {
        let store = GithubContents::new(GatewayConfig {
            token: "t".to_string(),
            owner: "skillnest".to_string(),
            repo: "course-files".to_string(),
            api_base: "https://api.github.com".to_string(),
            raw_base: "https://raw.githubusercontent.com".to_string(),
            branch: "main".to_string(),
        });
        assert_eq!(
            store.raw_content_url("media/logo.png"),
            "https://raw.githubusercontent.com/skillnest/course-files/main/media/logo.png"
        );
    }
}
