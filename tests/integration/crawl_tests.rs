//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use cover_grab::config::Config;
use cover_grab::crawler::Coordinator;
use cover_grab::state::CrawlState;
use std::collections::BTreeSet;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration against the mock server
fn create_test_config(base_url: &str, first: u32, last: u32, output: &Path) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.site.first_page = first;
    config.site.last_page = last;
    config.crawler.pause_ms = 0;
    config.crawler.timeout_secs = 5;
    config.output.directory = output.to_path_buf();
    config
}

/// A listing page with one featured cover per article
fn listing(images: &[&str]) -> String {
    let articles: String = images
        .iter()
        .map(|src| {
            format!(
                r#"<article><a href="/film"><img class="thumb" src="/thumb.png"><img class="wp-post-image" src="{}"></a></article>"#,
                src
            )
        })
        .collect();
    format!("<html><body><main>{}</main></body></html>", articles)
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_image(server: &MockServer, image_path: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(image_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

fn files_in(dir: &Path) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .expect("Failed to read output dir")
        .map(|entry| {
            entry
                .expect("Failed to read dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_featured_image_saved_under_last_path_segment() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/page/2/",
        r#"<html><body><article><img class="wp-post-image" src="/img/a.jpg"></article></body></html>"#
            .to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/img/a.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"cover-a".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base_url, 2, 2, dir.path());

    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await;

    assert_eq!(files_in(dir.path()), set(&["a.jpg"]));
    assert_eq!(std::fs::read(dir.path().join("a.jpg")).unwrap(), b"cover-a");
    assert_eq!(report.images_found, 1);
    assert_eq!(report.saved, 1);
    assert!(report.failed_pages.is_empty());
    assert_eq!(coordinator.state(), CrawlState::Done);
}

#[tokio::test]
async fn test_second_run_skips_everything() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/page/2/", listing(&["/covers/one.jpg", "/covers/two.jpg"])).await;
    mount_page(&mock_server, "/page/3/", listing(&["/covers/three.jpg"])).await;
    for name in ["one", "two", "three"] {
        Mock::given(method("GET"))
            .and(path(format!("/covers/{}.jpg", name)))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(name.as_bytes().to_vec()))
            // Only the first run may download
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base_url, 2, 3, dir.path());

    let first = Coordinator::new(config.clone()).unwrap().run().await;
    let files_after_first = files_in(dir.path());

    let second = Coordinator::new(config).unwrap().run().await;
    let files_after_second = files_in(dir.path());

    assert_eq!(first.saved, 3);
    assert_eq!(first.skipped, 0);
    assert_eq!(second.saved, 0);
    assert_eq!(second.skipped, 3);
    assert_eq!(files_after_first, set(&["one.jpg", "two.jpg", "three.jpg"]));
    assert_eq!(files_after_first, files_after_second);
}

#[tokio::test]
async fn test_failed_page_does_not_stop_neighbours() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/page/2/", listing(&["/img/two.jpg"])).await;
    Mock::given(method("GET"))
        .and(path("/page/3/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/page/4/", listing(&["/img/four.jpg"])).await;
    mount_image(&mock_server, "/img/two.jpg", b"2").await;
    mount_image(&mock_server, "/img/four.jpg", b"4").await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base_url, 2, 4, dir.path());

    let report = Coordinator::new(config).unwrap().run().await;

    assert_eq!(report.pages_attempted, 3);
    assert_eq!(report.failed_pages, vec![3]);
    assert_eq!(report.pages_succeeded(), 2);
    assert_eq!(files_in(dir.path()), set(&["two.jpg", "four.jpg"]));
}

#[tokio::test]
async fn test_page_timeout_is_isolated() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/page/4/", listing(&["/img/four.jpg"])).await;
    Mock::given(method("GET"))
        .and(path("/page/5/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing(&["/img/five.jpg"]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/page/6/", listing(&["/img/six.jpg"])).await;
    mount_image(&mock_server, "/img/four.jpg", b"4").await;
    mount_image(&mock_server, "/img/five.jpg", b"5").await;
    mount_image(&mock_server, "/img/six.jpg", b"6").await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&base_url, 4, 6, dir.path());
    config.crawler.timeout_secs = 1;

    let report = Coordinator::new(config).unwrap().run().await;

    assert_eq!(report.failed_pages, vec![5]);
    assert_eq!(files_in(dir.path()), set(&["four.jpg", "six.jpg"]));
}

#[tokio::test]
async fn test_failed_download_does_not_stop_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/page/2/",
        listing(&["/img/missing.jpg", "/img/ok.jpg"]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/img/missing.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    mount_image(&mock_server, "/img/ok.jpg", b"ok").await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base_url, 2, 2, dir.path());

    let report = Coordinator::new(config).unwrap().run().await;

    assert!(report.failed_pages.is_empty());
    assert_eq!(report.saved, 1);
    assert_eq!(report.failed_downloads, 1);
    assert_eq!(files_in(dir.path()), set(&["ok.jpg"]));
}

#[tokio::test]
async fn test_failed_download_retried_on_next_run() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/page/2/", listing(&["/img/flaky.jpg"])).await;
    Mock::given(method("GET"))
        .and(path("/img/flaky.jpg"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_image(&mock_server, "/img/flaky.jpg", b"finally").await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base_url, 2, 2, dir.path());

    let first = Coordinator::new(config.clone()).unwrap().run().await;
    assert_eq!(first.failed_downloads, 1);
    assert!(files_in(dir.path()).is_empty());

    let second = Coordinator::new(config).unwrap().run().await;
    assert_eq!(second.saved, 1);
    assert_eq!(std::fs::read(dir.path().join("flaky.jpg")).unwrap(), b"finally");
}

#[tokio::test]
async fn test_first_page_uses_site_root() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing(&["/img/root.jpg"])))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/page/2/", listing(&["/img/second.jpg"])).await;
    mount_image(&mock_server, "/img/root.jpg", b"r").await;
    mount_image(&mock_server, "/img/second.jpg", b"s").await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base_url, 1, 2, dir.path());

    let report = Coordinator::new(config).unwrap().run().await;

    assert!(report.failed_pages.is_empty());
    assert_eq!(files_in(dir.path()), set(&["root.jpg", "second.jpg"]));
}

#[tokio::test]
async fn test_only_one_image_per_container_downloaded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/page/2/",
        r#"<html><body>
            <article>
                <img src="/img/gallery-1.jpg">
                <img src="/img/gallery-2.jpg">
                <img class="wp-post-image" src="/img/cover.jpg">
            </article>
            <article>
                <img src="/img/plain-1.jpg">
                <img src="/img/plain-2.jpg">
            </article>
        </body></html>"#
            .to_string(),
    )
    .await;
    for image in ["cover", "plain-1"] {
        mount_image(&mock_server, &format!("/img/{}.jpg", image), b"x").await;
    }
    for image in ["gallery-1", "gallery-2", "plain-2"] {
        Mock::given(method("GET"))
            .and(path(format!("/img/{}.jpg", image)))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;
    }

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base_url, 2, 2, dir.path());

    let report = Coordinator::new(config).unwrap().run().await;

    assert_eq!(report.images_found, 2);
    assert_eq!(files_in(dir.path()), set(&["cover.jpg", "plain-1.jpg"]));
}

#[test]
fn test_default_range_starts_at_page_two() {
    let config = Config::default();
    let pages: Vec<u32> = config.site.pages().collect();

    assert_eq!(pages.first(), Some(&2));
    assert_eq!(pages.last(), Some(&62));
    assert_eq!(pages.len(), 61);
}

#[tokio::test]
async fn test_pause_follows_every_page_including_failures() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/page/2/", listing(&["/img/two.jpg"])).await;
    Mock::given(method("GET"))
        .and(path("/page/3/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/page/4/", listing(&["/img/four.jpg"])).await;
    mount_image(&mock_server, "/img/two.jpg", b"2").await;
    mount_image(&mock_server, "/img/four.jpg", b"4").await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&base_url, 2, 4, dir.path());
    config.crawler.pause_ms = 200;

    let started = Instant::now();
    let report = Coordinator::new(config).unwrap().run().await;
    let elapsed = started.elapsed();

    assert_eq!(report.failed_pages, vec![3]);
    assert_eq!(files_in(dir.path()), set(&["two.jpg", "four.jpg"]));
    assert!(
        elapsed >= Duration::from_millis(3 * 200),
        "Expected at least 600ms for three paced pages, took {:?}",
        elapsed
    );
}
