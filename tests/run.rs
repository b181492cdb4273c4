//! End-to-end runs against a local HTTP repository

mod helper;

use mockito::Server;

use debwatch::error::MonitorError;
use debwatch::index::{DecodeError, FetchError};
use debwatch::run::{RunOptions, execute, run};

use helper::{RecordingNotifier, create_monitor, gzip, load_config, write_config};

fn options(config_path: &std::path::Path) -> RunOptions {
    RunOptions {
        config_path: config_path.to_path_buf(),
        ..RunOptions::default()
    }
}

#[tokio::test]
async fn reports_and_persists_advanced_package() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/dists/stable/main/binary-amd64/Packages.gz")
        .with_status(200)
        .with_header("content-type", "application/octet-stream")
        .with_body(gzip(
            "Package: libfoo\nVersion: 1.2.0\n\nPackage: libother\nVersion: 9.0\n",
        ))
        .create_async()
        .await;

    let url = format!("{}/dists/stable/main/binary-amd64/Packages.gz", server.url());
    let (_temp_dir, path) = write_config("main", &[url], &[("libfoo", "1.0.0")]);
    let notifier = RecordingNotifier::default();

    let summary = execute(
        &options(&path),
        load_config(&path),
        &create_monitor(),
        &notifier,
    )
    .await
    .unwrap();

    mock.assert_async().await;
    assert_eq!(summary.report, "main:\n\tlibfoo: 1.2.0\n");
    assert_eq!(summary.advanced, 1);
    assert!(summary.config_saved);
    assert_eq!(notifier.reports(), vec!["main:\n\tlibfoo: 1.2.0\n".to_string()]);
    assert_eq!(load_config(&path).repo[0].packages[0].watermark, "1.2.0");
}

#[tokio::test]
async fn reports_only_highest_version_across_index_files() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/a/Packages")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("Package: libfoo\nVersion: 1.1.0\n")
        .create_async()
        .await;
    server
        .mock("GET", "/b/Packages.gz")
        .with_status(200)
        .with_header("content-type", "application/x-gzip")
        .with_body(gzip("Package: libfoo\nVersion: 1.3.0\n"))
        .create_async()
        .await;

    let urls = [
        format!("{}/a/Packages", server.url()),
        format!("{}/b/Packages.gz", server.url()),
    ];
    let (_temp_dir, path) = write_config("main", &urls, &[("libfoo", "1.0.0")]);
    let notifier = RecordingNotifier::default();

    let summary = execute(
        &options(&path),
        load_config(&path),
        &create_monitor(),
        &notifier,
    )
    .await
    .unwrap();

    assert_eq!(summary.advanced, 1);
    assert_eq!(summary.report, "main:\n\tlibfoo: 1.3.0\n");
    assert_eq!(load_config(&path).repo[0].packages[0].watermark, "1.3.0");
}

#[tokio::test]
async fn second_run_against_unchanged_index_reports_nothing() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/Packages")
        .with_status(200)
        .with_body("Package: Foo\nVersion: 2.0-1\n")
        .expect(2)
        .create_async()
        .await;

    let url = format!("{}/Packages", server.url());
    let (_temp_dir, path) = write_config("main", &[url], &[("foo", "1.0-1")]);
    let notifier = RecordingNotifier::default();

    let first = execute(
        &options(&path),
        load_config(&path),
        &create_monitor(),
        &notifier,
    )
    .await
    .unwrap();
    let saved_after_first = std::fs::read_to_string(&path).unwrap();
    let second = execute(
        &options(&path),
        load_config(&path),
        &create_monitor(),
        &notifier,
    )
    .await
    .unwrap();

    assert_eq!(first.report, "main:\n\tFoo: 2.0-1\n");
    assert_eq!(second.report, "");
    assert!(!second.config_saved);
    assert_eq!(notifier.reports().len(), 1);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), saved_after_first);
}

#[tokio::test]
async fn not_found_aborts_run_and_leaves_config_untouched() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/Packages.gz")
        .with_status(404)
        .create_async()
        .await;

    let url = format!("{}/Packages.gz", server.url());
    let (_temp_dir, path) = write_config("main", &[url.clone()], &[("libfoo", "1.0.0")]);
    let before = std::fs::read(&path).unwrap();
    let notifier = RecordingNotifier::default();

    let result = execute(
        &options(&path),
        load_config(&path),
        &create_monitor(),
        &notifier,
    )
    .await;

    assert!(matches!(
        result,
        Err(MonitorError::Fetch(FetchError::NotFound(u))) if u == url
    ));
    assert!(notifier.reports().is_empty());
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test]
async fn gzip_served_as_text_fails_to_parse() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/Packages.gz")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body(gzip("Package: libfoo\nVersion: 1.2.0\n"))
        .create_async()
        .await;

    let url = format!("{}/Packages.gz", server.url());
    let (_temp_dir, path) = write_config("main", &[url], &[("libfoo", "1.0.0")]);
    let before = std::fs::read(&path).unwrap();
    let notifier = RecordingNotifier::default();

    let result = execute(
        &options(&path),
        load_config(&path),
        &create_monitor(),
        &notifier,
    )
    .await;

    assert!(matches!(
        result,
        Err(MonitorError::IndexParse(e)) if matches!(e.source, DecodeError::Utf8(_))
    ));
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test]
async fn no_advance_sends_nothing_and_keeps_file() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/Packages")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("Package: libfoo\nVersion: 1.0.0\n\nPackage: libbar\nVersion: 5.0\n")
        .create_async()
        .await;

    let url = format!("{}/Packages", server.url());
    let (_temp_dir, path) = write_config("main", &[url], &[("libfoo", "1.0.0")]);
    let before = std::fs::read(&path).unwrap();
    let notifier = RecordingNotifier::default();

    let summary = execute(
        &options(&path),
        load_config(&path),
        &create_monitor(),
        &notifier,
    )
    .await
    .unwrap();

    assert_eq!(summary.report, "");
    assert_eq!(summary.advanced, 0);
    assert!(notifier.reports().is_empty());
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test]
async fn update_config_disabled_reports_without_saving() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/Packages")
        .with_status(200)
        .with_body("Package: libfoo\nVersion: 1.2.0\n")
        .create_async()
        .await;

    let url = format!("{}/Packages", server.url());
    let (_temp_dir, path) = write_config("main", &[url], &[("libfoo", "1.0.0")]);
    let before = std::fs::read(&path).unwrap();
    let notifier = RecordingNotifier::default();

    let summary = execute(
        &RunOptions {
            update_config: false,
            ..options(&path)
        },
        load_config(&path),
        &create_monitor(),
        &notifier,
    )
    .await
    .unwrap();

    assert_eq!(summary.advanced, 1);
    assert!(!summary.config_saved);
    assert_eq!(notifier.reports().len(), 1);
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test]
async fn dry_run_loads_checks_and_saves_config() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/Packages")
        .with_status(200)
        .with_body("Package: libfoo\nVersion: 1:0.5\n")
        .create_async()
        .await;

    let url = format!("{}/Packages", server.url());
    let (_temp_dir, path) = write_config("main", &[url], &[("libfoo", "1.0.0")]);

    let summary = run(&RunOptions {
        dry_run: true,
        ..options(&path)
    })
    .await
    .unwrap();

    assert_eq!(summary.report, "main:\n\tlibfoo: 1:0.5\n");
    assert!(summary.config_saved);
    assert_eq!(load_config(&path).repo[0].packages[0].watermark, "1:0.5");
}

#[tokio::test]
async fn run_fails_for_missing_config() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    let result = run(&options(&temp_dir.path().join("missing.yaml"))).await;

    assert!(matches!(result, Err(MonitorError::Persistence(_))));
}
