//! Client operations over HTTP

use faexport::config::{AuthConfig, CacheConfig, Config, CrawlerConfig, SiteConfig};
use faexport::search::SearchQuery;
use faexport::{FaClient, FaError, FolderKind, RequestSession};
use wiremock::matchers::{any, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_PAGE: &str = r#"<html><head><title>Userpage of example</title></head><body>
<table class="maintable">
  <tr><td class="ldot">
    <b>Full Name:</b> Example Name<br>
    <b>Artist Type:</b> Painter<br>
    <b>Artist Profile:</b><br>
    Hello!
  </td></tr>
  <tr><td class="ldot">
    <b>Pageviews:</b> 1,024<br>
    <b>Favorites:</b> 12<br>
  </td></tr>
</table>
<table id="shout-7" class="maintable">
  <tr><td class="lead addpad"><a href="/user/friend/">Friend</a></td></tr>
  <tr><td><span class="popup_date">Jan 1st, 2020</span></td></tr>
  <tr><td class="no_overflow alt1">Hi</td></tr>
</table>
</body></html>"#;

const SUBMISSION_PAGE: &str = r#"<html><head><title>Fox</title></head><body>
<div id="submission"><table class="maintable"><tr><td>
  <table class="maintable"><tr><td class="alt1">
    <div class="actions"><a href="/fav/5/">Fav</a> <a href="/full/5/">Full</a> <a href="/art/5.png">Download</a></div>
    <img id="submissionImg" src="/thumb/5.jpg">
  </td></tr></table>
  <table class="maintable">
    <tr><td class="cat"><b>Fox</b></td></tr>
    <tr><td class="alt1">by example</td></tr>
    <tr><td class="alt1">
      Posted: <span>Jan 1st, 2020</span><br>
      <b>Species:</b> Unspecified / Any<br>
      <b>Views:</b> 3<br>
      <div><img alt="Adult rating"></div>
      <div id="keywords"><a>fox</a></div>
    </td></tr>
    <tr><td class="alt1">Description</td></tr>
  </table>
</td></tr></table></div>
</body></html>"#;

const SYSTEM_ERROR_PAGE: &str =
    "<html><head><title>System Error</title></head><body>This user cannot be found.</body></html>";

fn folder_page(ids: &[&str]) -> String {
    let entries: String = ids
        .iter()
        .map(|id| format!(r#"<b id="sid_{}" class="t-image"></b>"#, id))
        .collect();
    format!(
        r#"<html><head><title>Gallery</title></head><body><table class="maintable"><tr><td class="alt1">{}</td></tr></table></body></html>"#,
        entries
    )
}

fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html")
        .set_body_string(body.into())
}

/// Creates a test configuration pointing at the mock server
fn create_test_config(origin: &str) -> Config {
    Config {
        site: SiteConfig::with_origin(origin),
        cache: CacheConfig::default(),
        auth: AuthConfig::default(),
        crawler: CrawlerConfig::default(),
    }
}

async fn connect(server: &MockServer) -> FaClient {
    FaClient::connect(&create_test_config(&server.uri()))
        .await
        .expect("Failed to build client")
}

#[tokio::test]
async fn test_user_profile_and_shouts() {
    let mock_server = MockServer::start().await;

    // One fetch serves both the profile and the shouts
    Mock::given(method("GET"))
        .and(path("/user/example/"))
        .respond_with(html(USER_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = connect(&mock_server).await;
    let session = client.request();

    let profile = client.user("example", &session).await.unwrap();
    assert_eq!(profile.name, "example");
    assert_eq!(profile.full_name.as_deref(), Some("Example Name"));
    assert_eq!(profile.artist_profile.as_deref(), Some("Hello!"));
    assert_eq!(profile.pageviews, Some(1024));
    assert_eq!(profile.favorites, Some(12));
    assert_eq!(profile.journals, None);

    let shouts = client.shouts("example", &session).await.unwrap();
    assert_eq!(shouts.len(), 1);
    assert_eq!(shouts[0].name.as_deref(), Some("Friend"));
}

#[tokio::test]
async fn test_submission_links_resolve_against_origin() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/view/5/"))
        .respond_with(html(SUBMISSION_PAGE))
        .mount(&mock_server)
        .await;

    let client = connect(&mock_server).await;
    let submission = client.submission("5", &client.request()).await.unwrap();

    let origin = format!("{}/", mock_server.uri());
    assert_eq!(submission.title.as_deref(), Some("Fox"));
    assert_eq!(submission.link, format!("{}view/5/", origin));
    assert_eq!(submission.image, Some(format!("{}art/5.png", origin)));
    assert_eq!(submission.thumbnail, Some(format!("{}thumb/5.jpg", origin)));
    assert_eq!(submission.species.as_deref(), Some("Unspecified / Any"));
    assert_eq!(submission.views, Some(3));
    assert_eq!(submission.rating.as_deref(), Some("Adult"));
    assert_eq!(submission.keywords, vec!["fox"]);
    assert_eq!(submission.category, None);
}

#[tokio::test]
async fn test_override_cookie_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/example/"))
        .and(header("cookie", "b=test-b; a=test-a"))
        .respond_with(html(USER_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = connect(&mock_server).await;
    let mut session = client.request();
    session.set_override("  b=test-b; a=test-a ").unwrap();

    assert!(client.user("example", &session).await.is_ok());
}

#[tokio::test]
async fn test_malformed_override_leaves_session_anonymous() {
    let mock_server = MockServer::start().await;
    let client = connect(&mock_server).await;

    let mut session = RequestSession::anonymous();
    let err = session.set_override("b=ABC; a=def").unwrap_err();
    assert!(matches!(err, FaError::InvalidCredentialFormat));
    assert!(session.current_credential().is_none());
    assert!(!session.has_override());
    drop(client);
}

#[tokio::test]
async fn test_cached_page_is_fetched_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/view/5/"))
        .respond_with(html(SUBMISSION_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = connect(&mock_server).await;
    let session = client.request();

    let first = client.submission("5", &session).await.unwrap();
    let second = client.submission("5", &session).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_system_error_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/nobody/"))
        .respond_with(html(SYSTEM_ERROR_PAGE))
        .mount(&mock_server)
        .await;

    let client = connect(&mock_server).await;
    let err = client.user("nobody", &client.request()).await.unwrap_err();

    match err {
        FaError::UpstreamSystemError { url } => {
            assert_eq!(url, format!("{}/user/nobody/", mock_server.uri()));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unavailable_upstream_is_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/journal/9/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = connect(&mock_server).await;
    let session = client.request();

    for _ in 0..2 {
        let err = client.journal("9", &session).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(
            err.url(),
            Some(format!("{}/journal/9/", mock_server.uri()).as_str())
        );
        match err {
            FaError::UpstreamUnavailable { reason, .. } => assert_eq!(reason, "HTTP 503"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_markup_drift_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/journal/9/"))
        .respond_with(html("<html><head><title>Journal</title></head><body><p>new layout</p></body></html>"))
        .mount(&mock_server)
        .await;

    let client = connect(&mock_server).await;
    let err = client.journal("9", &client.request()).await.unwrap_err();
    assert!(matches!(err, FaError::UnexpectedPageStructure { .. }));
}

#[tokio::test]
async fn test_invalid_identifiers_never_reach_upstream() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(html(USER_PAGE))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = connect(&mock_server).await;
    let session = client.request();

    assert!(matches!(
        client.user("../admin", &session).await,
        Err(FaError::InvalidIdentifier(_))
    ));
    assert!(matches!(
        client.journals("..", &session).await,
        Err(FaError::InvalidIdentifier(_))
    ));
    assert!(matches!(
        client.submission("12abc", &session).await,
        Err(FaError::InvalidIdentifier(_))
    ));
    assert!(matches!(
        client
            .submissions("a b", FolderKind::Gallery, 1, 3, &session)
            .await,
        Err(FaError::InvalidIdentifier(_))
    ));
}

#[tokio::test]
async fn test_gallery_crawl_stops_at_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gallery/example/1/"))
        .respond_with(html(folder_page(&["30", "29"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gallery/example/2/"))
        .respond_with(html(folder_page(&["28", ""])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gallery/example/3/"))
        .respond_with(html(folder_page(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gallery/example/4/"))
        .respond_with(html(folder_page(&["1"])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = connect(&mock_server).await;
    let ids = client
        .submissions("example", FolderKind::Gallery, 1, 10, &client.request())
        .await
        .unwrap();

    assert_eq!(ids, vec!["30", "29", "28", ""]);
}

#[tokio::test]
async fn test_search_query_reaches_upstream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/"))
        .and(query_param("q", "red fox"))
        .and(query_param("perpage", "24"))
        .and(query_param("rating-general", "1"))
        .respond_with(html(
            r#"<html><head><title>Search</title></head><body><div id="search-results">
               <b id="sid_11" class="t-image"></b><b id="sid_12" class="t-image"></b>
               </div></body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = connect(&mock_server).await;
    let query =
        SearchQuery::from_params(&[("q", "red fox"), ("perpage", "24"), ("rating", "general")])
            .unwrap();

    let results = client.search(&query, &client.request()).await.unwrap();
    assert_eq!(results.ids, vec!["11", "12"]);
}

#[tokio::test]
async fn test_invalid_search_is_rejected_before_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = connect(&mock_server).await;
    let mut query = SearchQuery::new("fox");
    query.per_page = 50;

    let err = client.search(&query, &client.request()).await.unwrap_err();
    assert!(matches!(err, FaError::InvalidSearchParameters(_)));
}
