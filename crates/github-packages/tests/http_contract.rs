//! HTTP contract tests for the scope adapters.
//!
//! Each test serves one canned response from a local socket and checks the
//! request the adapter sent plus how the response was interpreted.

use chrono::Utc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use github_packages::{registry_for, GithubClient, GithubConfig, OrgPackages, UserPackages};
use vprune_core::{RegistryError, Scope, Version, VersionId, VersionSink, VersionSource};

/// Accept one connection, answer with `status` and `body`, return the raw request head.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&request).to_string()
    });

    (format!("http://{addr}"), handle)
}

fn client(api_url: &str) -> GithubClient {
    GithubClient::new(GithubConfig::new("ghp_contract").with_api_url(api_url)).unwrap()
}

fn version(id: u64) -> Version {
    Version::new(id, format!("sha256:{id}"), Utc::now(), Vec::new())
}

const PAGE: &str = r#"[
  {
    "id": 245301,
    "name": "sha256:aaaa",
    "created_at": "2019-11-05T22:49:04Z",
    "updated_at": "2019-11-05T22:49:04Z",
    "metadata": { "package_type": "container", "container": { "tags": ["v1.0.4"] } }
  },
  {
    "id": 209672,
    "name": "sha256:bbbb",
    "created_at": "2019-10-29T15:42:11Z",
    "updated_at": "2019-10-29T15:42:11Z",
    "metadata": { "package_type": "container", "container": { "tags": [] } }
  }
]"#;

#[tokio::test]
async fn test_org_listing_request_and_decoding() {
    let (url, server) = serve_once("200 OK", PAGE).await;
    let adapter = OrgPackages::new(client(&url), "acme", "api");

    let versions = adapter.list_page(100, 2).await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with(
        "GET /orgs/acme/packages/container/api/versions?per_page=100&page=2&state=active HTTP/1.1"
    ));
    let lowered = request.to_ascii_lowercase();
    assert!(lowered.contains("authorization: bearer ghp_contract"));
    assert!(lowered.contains("x-github-api-version: 2022-11-28"));
    assert!(lowered.contains("accept: application/vnd.github+json"));

    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0].id, VersionId(245301));
    assert_eq!(versions[0].tags, vec!["v1.0.4"]);
    assert!(versions[1].is_untagged());
}

#[tokio::test]
async fn test_user_delete_request() {
    let (url, server) = serve_once("204 No Content", "").await;
    let adapter = UserPackages::new(client(&url), "octocat", "web");

    adapter.delete(&version(209672)).await.unwrap();
    let request = server.await.unwrap();

    assert!(request
        .starts_with("DELETE /users/octocat/packages/container/web/versions/209672 HTTP/1.1"));
}

#[tokio::test]
async fn test_authenticated_scope_via_factory() {
    let (url, server) = serve_once("200 OK", "[]").await;
    let registry = registry_for(client(&url), &Scope::AuthenticatedUser, "tools/ci");

    let versions = registry.list_page(100, 1).await.unwrap();
    let request = server.await.unwrap();

    assert!(versions.is_empty());
    assert!(request.starts_with("GET /user/packages/container/tools%2Fci/versions?"));
}

#[tokio::test]
async fn test_error_status_becomes_rejected() {
    let (url, server) = serve_once(
        "403 Forbidden",
        r#"{"message":"You need admin access to the organization before adding a package to it.","documentation_url":"https://docs.github.com"}"#,
    )
    .await;
    let adapter = OrgPackages::new(client(&url), "acme", "api");

    let err = adapter.delete(&version(1)).await.unwrap_err();
    server.await.unwrap();

    match err {
        RegistryError::Rejected { status, message } => {
            assert_eq!(status, 403);
            assert!(message.starts_with("You need admin access"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_malformed_listing_body() {
    let (url, server) = serve_once("200 OK", r#"{"unexpected":"object"}"#).await;
    let adapter = OrgPackages::new(client(&url), "acme", "api");

    let err = adapter.list_page(100, 1).await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, RegistryError::Malformed(_)));
}
