//! Integration tests for the Goodreads provider
//!
//! These tests use wiremock to stand in for the catalog site and run
//! complete searches end-to-end over HTTP.

use chrono::{TimeZone, Utc};
use goodreads_meta::config::{parse_config, ProviderConfig};
use goodreads_meta::{GoodreadsProvider, MetadataProvider, SearchOptions};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a provider configuration pointing at the mock server
fn create_test_config(base_url: &str) -> ProviderConfig {
    ProviderConfig {
        base_url: base_url.to_string(),
        active: true,
        max_concurrent_fetches: 5,
    }
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn search_page(hrefs: &[&str]) -> String {
    let rows: Vec<String> = hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<tr itemscope itemtype="http://schema.org/Book">
                    <td><a title="Book" href="{href}"><img class="bookCover" src="/cover.jpg"></a></td>
                    <td>
                        <a class="bookTitle" itemprop="url" href="{href}"><span itemprop="name">Book</span></a>
                        <span class="by">by</span>
                        <a class="authorName" itemprop="url" href="/author/show/1"><span itemprop="name">Author</span></a>
                    </td>
                </tr>"#
            )
        })
        .collect();

    format!(
        r#"<html><body><table class="tableList">{}</table></body></html>"#,
        rows.join("\n")
    )
}

fn foundation_page() -> String {
    r#"<html><body>
        <img id="coverImage" src="https://images.example.com/foundation.jpg">
        <h1 id="bookTitle" itemprop="name">
            Foundation
        </h1>
        <h2 id="bookSeries"><a href="/series/1">(Foundation #1)</a></h2>
        <div id="bookAuthors">
            <div class="authorName__container">
                <a class="authorName" href="/author/show/16667"><span itemprop="name">Isaac Asimov</span></a>
            </div>
        </div>
        <span itemprop="ratingValue">4.17</span>
        <div id="description">
            <span>The Foundation series is...</span>
            <span style="display:none">The Foundation series is Isaac Asimov's iconic masterpiece.</span>
        </div>
        <div id="details">
            <div class="row">Published
                December 2003
                by Books On Tape
                <nobr>(first published 1982)</nobr>
            </div>
        </div>
    </body></html>"#
        .to_string()
}

fn plain_page(title: &str, author: &str) -> String {
    format!(
        r#"<html><body>
            <h1 id="bookTitle">{title}</h1>
            <div id="bookAuthors">
                <div class="authorName__container"><a><span>{author}</span></a></div>
            </div>
            <div id="details"><div class="row">Published June 30th 2010</div></div>
        </body></html>"#
    )
}

#[tokio::test]
async fn test_full_search() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("search_type", "books"))
        .and(query_param("search[query]", "Foundation"))
        .respond_with(html_response(search_page(&[
            "/book/show/29579.Foundation",
            "/book/show/42.Second_Book",
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/book/show/29579.Foundation"))
        .respond_with(html_response(foundation_page()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/book/show/42.Second_Book"))
        .respond_with(html_response(plain_page("Second Book", "Jane Doe")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GoodreadsProvider::new(&create_test_config(&base_url))
        .expect("Failed to create provider");
    let mut records = provider.search("Foundation", &SearchOptions::default()).await;
    assert_eq!(records.len(), 2);

    // completion order is not link order
    records.sort_by(|a, b| a.title.cmp(&b.title));

    let foundation = &records[0];
    assert_eq!(foundation.id, "29579");
    assert_eq!(foundation.title, "Foundation");
    assert_eq!(foundation.authors, vec!["Isaac Asimov"]);
    assert_eq!(
        foundation.url,
        format!("{}/book/show/29579.Foundation", base_url)
    );
    assert_eq!(foundation.source.id, "goodreads");
    assert_eq!(foundation.source.link, base_url);
    assert_eq!(foundation.series.as_deref(), Some("Foundation"));
    assert_eq!(foundation.series_index, Some(1));
    assert_eq!(foundation.publisher.as_deref(), Some("Books On Tape"));
    assert_eq!(
        foundation.published_date,
        Some(Utc.with_ymd_and_hms(1982, 1, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(foundation.rating, Some(4.17));
    assert_eq!(
        foundation.description.as_deref(),
        Some("The Foundation series is Isaac Asimov's iconic masterpiece.")
    );
    assert_eq!(
        foundation.cover.as_deref(),
        Some("https://images.example.com/foundation.jpg")
    );

    let second = &records[1];
    assert_eq!(second.title, "Second Book");
    assert_eq!(second.authors, vec!["Jane Doe"]);
    assert_eq!(second.publisher, None);
    assert_eq!(
        second.published_date,
        Some(Utc.with_ymd_and_hms(2010, 6, 30, 0, 0, 0).unwrap())
    );
    assert_eq!(second.rating, None);
}

#[tokio::test]
async fn test_broken_detail_pages_are_skipped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html_response(search_page(&[
            "/book/show/1.Good",
            "/book/show/2.Missing",
            "/book/show/3.Not_A_Book",
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/book/show/1.Good"))
        .respond_with(html_response(plain_page("Good", "Writer")))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/book/show/2.Missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/book/show/3.Not_A_Book"))
        .respond_with(html_response("<html><body>Sign in</body></html>".to_string()))
        .mount(&mock_server)
        .await;

    let provider = GoodreadsProvider::new(&create_test_config(&mock_server.uri()))
        .expect("Failed to create provider");
    let records = provider.search_and_collect("good").await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Good");
}

#[tokio::test]
async fn test_search_page_error_returns_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GoodreadsProvider::new(&create_test_config(&mock_server.uri()))
        .expect("Failed to create provider");

    assert!(provider.search_and_collect("anything").await.is_empty());
}

#[tokio::test]
async fn test_no_results_returns_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html_response(
            r#"<html><body><h3 class="searchSubNavContainer">No results.</h3></body></html>"#
                .to_string(),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GoodreadsProvider::new(&create_test_config(&mock_server.uri()))
        .expect("Failed to create provider");

    assert!(provider.search_and_collect("zzzz").await.is_empty());
}

#[tokio::test]
async fn test_inactive_provider_sends_no_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = parse_config(&format!(
        "[provider]\nbase-url = \"{}\"\nactive = false\n",
        mock_server.uri()
    ))
    .expect("Failed to parse config");

    let provider = GoodreadsProvider::new(&config.provider).expect("Failed to create provider");
    assert!(!provider.is_active());
    assert!(provider
        .search("Foundation", &SearchOptions::default())
        .await
        .is_empty());
}

#[tokio::test]
async fn test_unreachable_site_returns_empty() {
    // Bind and drop a listener to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local address").port();
    drop(listener);

    let provider = GoodreadsProvider::new(&create_test_config(&format!(
        "http://127.0.0.1:{}",
        port
    )))
    .expect("Failed to create provider");

    assert!(provider.search_and_collect("Foundation").await.is_empty());
}
