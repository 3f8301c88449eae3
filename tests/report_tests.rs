use chrono::Utc;
use sqli_probe::fingerprint::{DbEngine, DbFingerprint, DetectionMode};
use sqli_probe::output::{
    spawn_csv_writer, write_csv_header, write_html, write_json, TrialRecord,
};

fn record(payload: &str, vulnerable: bool) -> TrialRecord {
    TrialRecord {
        timestamp: Utc::now(),
        field: "username".to_string(),
        payload: payload.to_string(),
        method: "POST".to_string(),
        elapsed_secs: 1.25,
        response_len: 2048,
        status: 200,
        vulnerable,
    }
}

#[tokio::test]
async fn csv_stream_appends_header_then_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    write_csv_header(&path).unwrap();

    let (tx, rx) = tokio::sync::mpsc::channel(16);
    let task = spawn_csv_writer(path.clone(), rx);
    tx.send(record("' OR '1'='1", true)).await.unwrap();
    tx.send(record("1; --", false)).await.unwrap();
    drop(tx);
    task.await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("timestamp,field,payload"));
    assert!(lines[1].contains("' OR '1'='1"));
    assert!(lines[1].contains("true"));
    assert!(lines[2].contains("false"));
}

#[test]
fn json_report_carries_engine_and_counts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.json");
    let records = vec![record("'", true), record("1; --", false)];
    let fp = DbFingerprint {
        engine: DbEngine::MySql,
        mode: DetectionMode::Signature,
        confidence: 0.9,
    };

    write_json(&path, "http://target/login", Some(&fp), &records).unwrap();

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["url"], "http://target/login");
    assert_eq!(doc["db_type"], "MySQL");
    assert_eq!(doc["total_tests"], 2);
    assert_eq!(doc["results"].as_array().unwrap().len(), 2);
}

#[test]
fn json_report_defaults_to_unknown_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.json");
    write_json(&path, "http://target/", None, &[]).unwrap();

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["db_type"], "Unknown");
    assert_eq!(doc["total_tests"], 0);
}

#[test]
fn html_report_escapes_payloads_and_marks_vulnerable_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.html");
    let records = vec![record("<script>alert(1)</script>", true), record("benign", false)];

    write_html(&path, "http://target/login", &records).unwrap();

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("class='vuln'"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("benign"));
}
