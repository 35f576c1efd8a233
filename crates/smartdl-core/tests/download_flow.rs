//! Integration tests: the real curl client against a local HTTP server.
//!
//! Covers direct downloads, landing-page resolution, servers that refuse
//! HEAD, Content-Disposition naming, redirects and terminal errors.

mod common;

use common::site_server::{self, Route};
use smartdl_core::agent::{Agent, DownloadAgent};
use smartdl_core::config::SmartdlConfig;
use smartdl_core::http::{CurlClient, HttpClient};
use smartdl_core::{DownloadEngine, DownloadError, DownloadRequest};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

const PDF: &[u8] = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\ntrailer\n%%EOF\n";

fn engine(dir: &Path) -> DownloadEngine {
    let config = SmartdlConfig {
        download_dir: Some(dir.to_path_buf()),
        timeout_secs: 10,
        connect_timeout_secs: 5,
        ..SmartdlConfig::default()
    };
    DownloadEngine::new(&config).with_default_download_dir(dir)
}

#[test]
fn direct_pdf_download_uses_context_name() {
    let base = site_server::start(vec![("/paper.pdf", Route::ok("application/pdf", PDF))]);
    let dir = tempdir().unwrap();

    let result = engine(dir.path())
        .download(&DownloadRequest::new(format!("{base}/paper.pdf")).with_context("Attention Is All You Need"))
        .expect("download");

    let path = result.path.expect("path");
    assert_eq!(path, dir.path().join("Attention_Is_All_You_Need.pdf"));
    assert_eq!(fs::read(&path).unwrap(), PDF);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    let metadata = result.metadata.expect("metadata");
    assert_eq!(metadata.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(metadata.content_length, Some(PDF.len() as u64));
}

#[test]
fn landing_page_leads_to_the_file() {
    let page = r#"<!DOCTYPE html><html><body>
        <h1>Survey data</h1>
        <a href="/">Home</a>
        <a href="/files/survey.csv">Download the CSV</a>
        </body></html>"#;
    let csv = b"year,count\n2023,12\n2024,15\n";
    let base = site_server::start(vec![
        ("/datasets/survey", Route::ok("text/html; charset=utf-8", page)),
        ("/files/survey.csv", Route::ok("text/csv", csv.to_vec())),
    ]);
    let dir = tempdir().unwrap();

    let result = engine(dir.path())
        .download(&DownloadRequest::new(format!("{base}/datasets/survey")))
        .expect("download");

    let link = format!("{base}/files/survey.csv");
    assert_eq!(result.url, link);
    assert_eq!(
        result.warnings,
        vec![format!("Detected landing page, found download link: {link}")]
    );
    let path = result.path.expect("path");
    assert_eq!(path, dir.path().join("survey.csv"));
    assert_eq!(fs::read(&path).unwrap(), csv);
}

#[test]
fn blocked_head_names_file_from_get_response() {
    let base = site_server::start(vec![(
        "/export?id=42",
        Route::ok("application/json", r#"{"ok":true}"#)
            .header("Content-Disposition", r#"attachment; filename="results.json""#)
            .block_head(),
    )]);
    let dir = tempdir().unwrap();

    let result = engine(dir.path())
        .download(&DownloadRequest::new(format!("{base}/export?id=42")))
        .expect("download");

    // HEAD is refused, so the name is settled from the GET response.
    let path = result.path.expect("path");
    assert_eq!(path, dir.path().join("export.json"));
    assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"ok":true}"#);
    assert!(result.warnings.iter().any(|w| w.contains("export.bin -> export.json")));
}

#[test]
fn content_disposition_names_file_when_head_works() {
    let base = site_server::start(vec![(
        "/dl",
        Route::ok("application/pdf", PDF)
            .header("Content-Disposition", "attachment; filename*=UTF-8''R%C3%A9sum%C3%A9.pdf"),
    )]);
    let dir = tempdir().unwrap();

    let result = engine(dir.path())
        .download(&DownloadRequest::new(format!("{base}/dl")).with_context("ignored"))
        .expect("download");

    assert_eq!(result.path.unwrap(), dir.path().join("Résumé.pdf"));
}

#[test]
fn redirect_is_followed() {
    let base = site_server::start(vec![
        ("/latest", Route::redirect("/releases/v2/paper.pdf")),
        ("/releases/v2/paper.pdf", Route::ok("application/pdf", PDF)),
    ]);
    let dir = tempdir().unwrap();

    let result = engine(dir.path())
        .download(&DownloadRequest::new(format!("{base}/latest")))
        .expect("download");

    let path = result.path.expect("path");
    assert_eq!(path, dir.path().join("latest.pdf"));
    assert_eq!(fs::read(&path).unwrap(), PDF);
}

#[test]
fn not_found_is_a_transfer_error() {
    let base = site_server::start(vec![]);
    let dir = tempdir().unwrap();
    let url = format!("{base}/missing.zip");

    let err = engine(dir.path())
        .download(&DownloadRequest::new(url.clone()))
        .unwrap_err();

    assert!(matches!(err, DownloadError::Transfer { .. }), "{err:?}");
    assert!(err.to_string().starts_with(&format!("Failed to download {url}")));
    assert!(!dir.path().join("missing.zip").exists());
}

#[test]
fn batch_reports_each_url() {
    let base = site_server::start(vec![("/a.pdf", Route::ok("application/pdf", PDF))]);
    let dir = tempdir().unwrap();
    let urls = vec![format!("{base}/a.pdf"), format!("{base}/gone.pdf")];

    let results = engine(dir.path())
        .download_multiple(&urls, None, Some(dir.path()))
        .expect("batch");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].path.as_deref(), Some(dir.path().join("a.pdf").as_path()));
    assert!(results[1].path.is_none());
    assert!(results[1].warnings[0].contains("Failed"));
}

#[test]
fn prefix_get_stops_at_limit() {
    let body: Vec<u8> = (0u8..=255).cycle().take(256 * 1024).collect();
    let base = site_server::start(vec![("/big.bin", Route::ok("application/octet-stream", body.clone()))]);
    let client = CurlClient::new(smartdl_core::http::ClientOptions {
        timeout: Duration::from_secs(10),
        ..Default::default()
    });

    let response = client.get_prefix(&format!("{base}/big.bin"), 1000).expect("prefix");

    assert_eq!(response.head.status, 200);
    assert_eq!(response.body, body[..1000]);
}

#[test]
fn head_reports_status_and_headers() {
    let base = site_server::start(vec![("/doc", Route::ok("text/plain", "hello"))]);
    let client = CurlClient::default();

    let found = client.head(&format!("{base}/doc")).expect("head");
    assert_eq!(found.head.status, 200);
    assert_eq!(found.content_type(), Some("text/plain"));
    assert_eq!(found.head.headers.content_length(), Some(5));
    assert!(found.body.is_empty());

    let missing = client.head(&format!("{base}/nope")).expect("head");
    assert_eq!(missing.head.status, 404);
}

#[test]
fn agent_lists_what_it_downloaded() {
    let base = site_server::start(vec![("/notes.md", Route::ok("text/plain", "# Notes\n"))]);
    let dir = tempdir().unwrap();
    let agent = DownloadAgent::new(engine(dir.path()));

    let fetched = agent.execute_tool(
        "download_content",
        &serde_json::json!({ "url": format!("{base}/notes.md") }),
    );
    assert!(fetched.success, "{fetched:?}");

    let listed = agent.execute_tool("list_downloads", &serde_json::json!({ "pattern": "*.md" }));
    assert!(listed.success);
    assert_eq!(listed.data["total"], 1);
    assert_eq!(listed.data["files"][0]["name"], "notes.md");
}
