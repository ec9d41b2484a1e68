//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl, rank and export cycle end-to-end.

use std::sync::Arc;
use std::time::Duration;
use sumi_rank::config::{parse_config, Config};
use sumi_rank::crawler::{crawl, HttpSource};
use sumi_rank::output::{build_sinks, export_all};
use sumi_rank::storage::{SqliteStorage, Storage};
use sumi_rank::{Coordinator, PageState};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds an HTML page linking to every href in `links`
fn html_page(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">{}</a>"#, href, href))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, anchors
    )
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

/// Creates a validated configuration crawling from `seed`, restricted to
/// URLs containing `filter`
fn create_test_config(seed: &str, filter: &str, output_dir: &str, db_path: Option<&str>) -> Config {
    let db_line = db_path
        .map(|p| format!("database-path = \"{}\"", p))
        .unwrap_or_default();
    let toml = format!(
        r#"
seeds = ["{seed}"]

[crawler]
max-pages = 50
max-depth = 5
batch-size = 4
url-filter = "{filter}"
request-timeout-secs = 1

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0.0"
contact-url = "https://example.com/contact"
contact-email = "test@example.com"

[output]
directory = "{output_dir}"
{db_line}
"#
    );
    parse_config(&toml).expect("test config should be valid")
}

/// Mounts a small site: index -> a, b, missing, external; a -> index; b -> a
async fn mount_small_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(html_page(
            "Index",
            &["/a", "/b", "/missing", "https://elsewhere.invalid/page"],
        )))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html_response(html_page("A", &["/"])))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html_response(html_page("B", &["a", "mailto:b@example.com"])))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_and_rank() {
    let server = MockServer::start().await;
    mount_small_site(&server).await;

    let base = server.uri();
    let seed = format!("{}/", base);
    let config = create_test_config(&seed, &base, "unused", None);

    let result = crawl(&config).await.expect("crawl should succeed");

    let index = format!("{}/", base);
    let a = format!("{}/a", base);
    let b = format!("{}/b", base);

    // Only successfully fetched pages become nodes
    assert_eq!(result.graph.node_count(), 3);
    assert!(result.graph.contains(&index));
    assert!(result.graph.contains(&a));
    assert!(result.graph.contains(&b));
    assert!(!result.graph.contains(&format!("{}/missing", base)));

    // Edges to the 404 page and the filtered external page are dropped
    assert_eq!(result.graph.edge_count(), 4);
    assert!(result.graph.has_edge(&index, &a));
    assert!(result.graph.has_edge(&index, &b));
    assert!(result.graph.has_edge(&a, &index));
    assert!(result.graph.has_edge(&b, &a));

    assert_eq!(result.report.pages_attempted, 4);
    assert_eq!(result.report.count(PageState::HttpError), 1);
    assert_eq!(result.report.count(PageState::FilteredOut), 1);

    // Every node is ranked and nothing leaks: the graph has no dangling page
    assert_eq!(result.ranking.len(), 3);
    assert!(result.ranking.converged());
    assert!((result.ranking.total() - 1.0).abs() < 1e-6);
    assert_eq!(result.ranking.top(1)[0].0, a);
}

#[tokio::test]
async fn test_content_mismatch_is_not_graphed() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(html_page("Index", &["/data.json"])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&format!("{}/", base), &base, "unused", None);
    let result = crawl(&config).await.unwrap();

    assert_eq!(result.graph.node_count(), 1);
    assert_eq!(result.graph.edge_count(), 0);
    assert_eq!(result.report.count(PageState::ContentMismatch), 1);
}

#[tokio::test]
async fn test_slow_page_times_out_without_aborting() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(html_page("Index", &["/slow", "/fast"])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html_response(html_page("Slow", &[])).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fast"))
        .respond_with(html_response(html_page("Fast", &[])))
        .mount(&server)
        .await;

    let config = create_test_config(&format!("{}/", base), &base, "unused", None);
    let result = crawl(&config).await.unwrap();

    assert_eq!(result.graph.node_count(), 2);
    assert!(result.graph.contains(&format!("{}/fast", base)));
    assert_eq!(result.report.count(PageState::Unreachable), 1);
}

#[tokio::test]
async fn test_coordinator_with_http_source_respects_page_cap() {
    let server = MockServer::start().await;
    let base = server.uri();

    let links: Vec<String> = (0..20).map(|i| format!("/p{}", i)).collect();
    let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(html_page("Index", &link_refs)))
        .mount(&server)
        .await;

    for link in &links {
        Mock::given(method("GET"))
            .and(path(link.as_str()))
            .respond_with(html_response(html_page("Leaf", &["/"])))
            .mount(&server)
            .await;
    }

    let mut config = create_test_config(&format!("{}/", base), &base, "unused", None);
    config.crawler.max_pages = 5;
    config.crawler.batch_size = 50;

    let source = HttpSource::new(&config.user_agent, &config.crawler).unwrap();
    let coordinator = Coordinator::new(config.crawler.clone(), Arc::new(source)).unwrap();
    let outcome = coordinator.run(&config.seeds).await;

    assert_eq!(outcome.report.pages_attempted, 5);
    assert_eq!(outcome.graph.node_count(), 5);
    let received = server.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 5);
}

#[tokio::test]
async fn test_export_to_files_and_database() {
    let server = MockServer::start().await;
    mount_small_site(&server).await;

    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("results");
    let db_path = dir.path().join("graph.db");
    let base = server.uri();
    let config = create_test_config(
        &format!("{}/", base),
        &base,
        &out_dir.display().to_string(),
        Some(&db_path.display().to_string()),
    );

    let result = crawl(&config).await.unwrap();
    let mut sinks = build_sinks(&config, "test-hash", true).unwrap();
    export_all(&mut sinks, &result).unwrap();
    drop(sinks);

    let matrix = std::fs::read_to_string(out_dir.join("adjacency_matrix.txt")).unwrap();
    assert!(matrix.contains("Total nodes: 3"));
    let ranks = std::fs::read_to_string(out_dir.join("pagerank_results.txt")).unwrap();
    assert!(ranks.contains(&format!("#1\nURL: {}/a\n", base)));
    let summary = std::fs::read_to_string(out_dir.join("summary.md")).unwrap();
    assert!(summary.contains("test-hash"));

    let storage = SqliteStorage::new(&db_path).unwrap();
    let run = storage.get_latest_run().unwrap().unwrap();
    assert_eq!(run.config_hash, "test-hash");
    assert_eq!(storage.count_pages(run.id).unwrap(), 3);
    assert_eq!(storage.count_links(run.id).unwrap(), 4);
    assert_eq!(storage.top_pages(run.id, 1).unwrap()[0].url, format!("{}/a", base));
}

#[tokio::test]
async fn test_empty_seed_list_produces_empty_result() {
    let toml = r#"
seeds = []

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0.0"
contact-url = "https://example.com/contact"
contact-email = "test@example.com"
"#;
    let config = parse_config(toml).unwrap();
    let result = crawl(&config).await.unwrap();

    assert!(result.graph.is_empty());
    assert!(result.ranking.is_empty());
    assert_eq!(result.ranking.iterations(), 0);
    assert_eq!(result.report.rounds, 0);
}
