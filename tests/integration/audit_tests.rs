//! Integration tests for the audit pipeline
//!
//! These tests use wiremock to stand in for the axe audit service and run
//! full sweeps from an input file to written reports.

use std::io::Write;
use std::sync::atomic::AtomicBool;
use wcag_sweep::audit::{run_sweep, AuditError};
use wcag_sweep::config::{AuditorConfig, ScanConfig};
use wcag_sweep::output::{write_reports, ReportFormat};
use wcag_sweep::scoring::PageReport;
use wcag_sweep::{Auditor, Impact, PageResult, RemoteAuditor};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates an auditor pointed at the mock service
fn create_test_auditor(base_url: &str, timeout_secs: u64) -> RemoteAuditor {
    RemoteAuditor::new(&AuditorConfig {
        endpoint: format!("{}/axe", base_url),
        timeout_secs,
        user_agent: "TestSweep/1.0".to_string(),
    })
    .expect("Failed to build auditor")
}

fn axe_body(violations: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "testEngine": {"name": "axe-core", "version": "4.8.2"},
        "passes": [],
        "incomplete": [],
        "violations": violations
    })
}

fn input_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create input file");
    file.write_all(content.as_bytes())
        .expect("Failed to write input file");
    file
}

#[tokio::test]
async fn test_audit_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/axe"))
        .and(header("user-agent", "TestSweep/1.0"))
        .and(body_json(
            serde_json::json!({"url": "https://site.test/", "wait_seconds": 3}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(axe_body(serde_json::json!([
            {
                "id": "image-alt",
                "impact": "critical",
                "help": "Images must have alternate text",
                "helpUrl": "https://dequeuniversity.com/rules/axe/4.8/image-alt",
                "tags": ["wcag2a", "wcag111"],
                "nodes": [{"target": ["img"]}, {"target": ["img.logo"]}]
            },
            {
                "id": "region",
                "impact": null,
                "nodes": []
            }
        ]))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auditor = create_test_auditor(&mock_server.uri(), 5);
    let result = auditor.audit("https://site.test/", 3).await;

    match result {
        PageResult::Audited { url, findings } => {
            assert_eq!(url, "https://site.test/");
            assert_eq!(findings.len(), 2);
            assert_eq!(findings[0].id, "image-alt");
            assert_eq!(findings[0].impact, Impact::Critical);
            assert_eq!(findings[0].occurrences(), 2);
            assert_eq!(findings[1].impact, Impact::Minor);
            assert_eq!(findings[1].occurrences(), 1);
        }
        other => panic!("Expected audited page, got {:?}", other),
    }
}

#[tokio::test]
async fn test_audit_service_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/axe"))
        .respond_with(ResponseTemplate::new(502).set_body_string("browser\ncrashed"))
        .mount(&mock_server)
        .await;

    let auditor = create_test_auditor(&mock_server.uri(), 5);

    let err = auditor
        .request_findings("https://site.test/", 0)
        .await
        .unwrap_err();
    assert!(matches!(err, AuditError::Status { .. }));

    match auditor.audit("https://site.test/", 0).await {
        PageResult::Failed { error, .. } => {
            assert_eq!(error, "Audit service returned 502 Bad Gateway: browser crashed");
        }
        other => panic!("Expected failed page, got {:?}", other),
    }
}

#[tokio::test]
async fn test_audit_invalid_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/axe"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let auditor = create_test_auditor(&mock_server.uri(), 5);
    let err = auditor
        .request_findings("https://site.test/", 0)
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::Decode(_)));
}

#[tokio::test]
async fn test_audit_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/axe"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(axe_body(serde_json::json!([])))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let auditor = create_test_auditor(&mock_server.uri(), 1);
    let err = auditor
        .request_findings("https://slow.test/", 0)
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::Timeout));
}

#[tokio::test]
async fn test_audit_connection_refused() {
    // Reserve a port, then release it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let auditor = create_test_auditor(&format!("http://127.0.0.1:{}", port), 5);
    let result = auditor.audit("https://site.test/", 0).await;

    assert!(!result.is_ok());
    assert_eq!(result.url(), "https://site.test/");
}

#[tokio::test]
async fn test_full_sweep_from_zap_export() {
    let mock_server = MockServer::start().await;

    // The contact page has one serious violation on four nodes
    Mock::given(method("POST"))
        .and(path("/axe"))
        .and(body_json(
            serde_json::json!({"url": "https://shop.test/contact", "wait_seconds": 1}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(axe_body(serde_json::json!([
            {
                "id": "label",
                "impact": "serious",
                "description": "Ensures every form element has a label",
                "nodes": [{}, {}, {}, {}]
            }
        ]))))
        .mount(&mock_server)
        .await;

    // The home page is clean
    Mock::given(method("POST"))
        .and(path("/axe"))
        .and(body_json(
            serde_json::json!({"url": "https://shop.test/", "wait_seconds": 1}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(axe_body(serde_json::json!([]))))
        .mount(&mock_server)
        .await;

    // The login page cannot be audited
    Mock::given(method("POST"))
        .and(path("/axe"))
        .and(body_json(
            serde_json::json!({"url": "https://shop.test/login", "wait_seconds": 1}),
        ))
        .respond_with(ResponseTemplate::new(500).set_body_string("navigation timeout"))
        .mount(&mock_server)
        .await;

    let export = input_file(
        ".json",
        r#"{
            "@programName": "ZAP",
            "site": [{
                "@host": "shop.test",
                "alerts": [
                    {"instances": [
                        {"uri": "https://shop.test/login", "method": "GET"},
                        {"uri": "https://shop.test/contact", "method": "POST"}
                    ]},
                    {"instances": [{"uri": "https://shop.test/", "method": "GET"}]}
                ]
            }]
        }"#,
    );

    let auditor = create_test_auditor(&mock_server.uri(), 5);
    let scan = ScanConfig {
        max_pages: 0,
        page_wait: 1,
    };

    let report = run_sweep(export.path(), &scan, &auditor, &AtomicBool::new(false))
        .await
        .expect("Sweep failed");

    // JSON input is audited in lexicographic order
    let urls: Vec<&str> = report.pages.iter().map(|p| p.url()).collect();
    assert_eq!(
        urls,
        vec![
            "https://shop.test/",
            "https://shop.test/contact",
            "https://shop.test/login"
        ]
    );
    assert_eq!(report.scored_count(), 2);
    assert_eq!(report.failed_count(), 1);
    // (100 + 84) / 2
    assert_eq!(report.overall_score, 92);

    match &report.pages[1] {
        PageReport::Scored { score, .. } => {
            assert_eq!(score.penalty, 16);
            assert_eq!(score.breakdown.by_impact.serious, 4);
        }
        other => panic!("Expected scored page, got {:?}", other),
    }

    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("report_accessibility");
    let written = write_reports(
        &report,
        &prefix.to_string_lossy(),
        &[ReportFormat::Html, ReportFormat::Markdown],
    )
    .expect("Failed to write reports");

    assert_eq!(written.len(), 2);
    let html = std::fs::read_to_string(&written[0]).unwrap();
    assert!(html.contains("Ensures every form element has a label"));
    let markdown = std::fs::read_to_string(&written[1]).unwrap();
    assert!(markdown.contains("| https://shop.test/login | ERROR | - | - |"));
}

#[tokio::test]
async fn test_sweep_caps_text_input() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/axe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(axe_body(serde_json::json!([]))))
        .expect(2)
        .mount(&mock_server)
        .await;

    let list = input_file(
        ".txt",
        "https://b.test/\n# comment\nhttps://a.test/\nhttps://b.test/\nhttps://c.test/\n",
    );

    let auditor = create_test_auditor(&mock_server.uri(), 5);
    let scan = ScanConfig {
        max_pages: 2,
        page_wait: 0,
    };

    let report = run_sweep(list.path(), &scan, &auditor, &AtomicBool::new(false))
        .await
        .expect("Sweep failed");

    // Text input keeps first-seen order
    let urls: Vec<&str> = report.pages.iter().map(|p| p.url()).collect();
    assert_eq!(urls, vec!["https://b.test/", "https://a.test/"]);
    assert_eq!(report.overall_score, 100);
}
