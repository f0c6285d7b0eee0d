//! Startup login exchange and default credential handling

use faexport::cache::{CacheStore, MemoryCache};
use faexport::client::{bootstrap_credential, LOGIN_COOKIE_KEY};
use faexport::config::{AuthConfig, CacheConfig, Config, CrawlerConfig, SiteConfig};
use faexport::fetcher::{build_http_client, parse_origin};
use faexport::{FaClient, FaError, SessionManager};
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_PAGE: &str = r#"<html><head><title>Userpage</title></head><body>
<div class="ldot"><b>Full Name:</b> Logged In<br></div><div class="ldot"></div>
</body></html>"#;

fn sessions_for(server: &MockServer) -> SessionManager {
    let site = SiteConfig::with_origin(server.uri());
    SessionManager::new(
        build_http_client(&site).unwrap(),
        parse_origin(&site.origin).unwrap(),
    )
}

fn password_auth() -> AuthConfig {
    AuthConfig {
        cookie: None,
        username: Some("tester".to_string()),
        password: Some("hunter2".to_string()),
    }
}

async fn mount_login(server: &MockServer, response: ResponseTemplate, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/login/"))
        .and(body_string_contains("action=login"))
        .and(body_string_contains("name=tester"))
        .and(body_string_contains("pass=hunter2"))
        .respond_with(response)
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_reads_session_cookies() {
    let mock_server = MockServer::start().await;
    mount_login(
        &mock_server,
        ResponseTemplate::new(302)
            .insert_header("location", "/")
            .append_header("set-cookie", "b=4c1d-77ab; path=/; HttpOnly")
            .append_header("set-cookie", "a=9f0e-1234; path=/; HttpOnly"),
        1,
    )
    .await;

    let credential = sessions_for(&mock_server)
        .obtain_default("tester", "hunter2")
        .await
        .unwrap();
    assert_eq!(credential.to_string(), "b=4c1d-77ab; a=9f0e-1234");
}

#[tokio::test]
async fn test_login_without_cookies_fails() {
    let mock_server = MockServer::start().await;
    mount_login(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("<html><head><title>Login</title></head></html>"),
        1,
    )
    .await;

    let err = sessions_for(&mock_server)
        .obtain_default("tester", "hunter2")
        .await
        .unwrap_err();
    match err {
        FaError::LoginFailed { url } => assert_eq!(url, format!("{}/login/", mock_server.uri())),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_bootstrap_caches_login_cookie() {
    let mock_server = MockServer::start().await;
    mount_login(
        &mock_server,
        ResponseTemplate::new(302)
            .append_header("set-cookie", "b=bbb; path=/")
            .append_header("set-cookie", "a=aaa; path=/"),
        1,
    )
    .await;

    let sessions = sessions_for(&mock_server);
    let cache = MemoryCache::new();

    // The second bootstrap is served from the cache; the login mock expects one call.
    for _ in 0..2 {
        let credential =
            bootstrap_credential(&sessions, &cache, &password_auth(), Duration::from_secs(60))
                .await
                .unwrap();
        assert_eq!(credential.unwrap().to_string(), "b=bbb; a=aaa");
    }
    assert_eq!(
        cache.get(LOGIN_COOKIE_KEY).unwrap().as_deref(),
        Some("b=bbb; a=aaa")
    );
}

#[tokio::test]
async fn test_connected_client_sends_default_credential() {
    let mock_server = MockServer::start().await;
    mount_login(
        &mock_server,
        ResponseTemplate::new(302)
            .append_header("set-cookie", "b=bbb; path=/")
            .append_header("set-cookie", "a=aaa; path=/"),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/user/example/"))
        .and(header("cookie", "b=bbb; a=aaa"))
        .respond_with(ResponseTemplate::new(200).set_body_string(USER_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = Config {
        site: SiteConfig::with_origin(mock_server.uri()),
        cache: CacheConfig::default(),
        auth: password_auth(),
        crawler: CrawlerConfig::default(),
    };
    let client = FaClient::connect(&config).await.unwrap();

    let profile = client.user("example", &client.request()).await.unwrap();
    assert_eq!(profile.full_name.as_deref(), Some("Logged In"));
}
