use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use chrono::Utc;
use sqli_probe::output::{ResultSink, TrialRecord};

fn record(tag: String) -> TrialRecord {
    TrialRecord {
        timestamp: Utc::now(),
        field: "username".to_string(),
        payload: tag,
        method: "GET".to_string(),
        elapsed_secs: 0.1,
        response_len: 100,
        status: 200,
        vulnerable: false,
    }
}

#[test]
fn append_preserves_completion_order() {
    let sink = ResultSink::new();
    for i in 0..5 {
        sink.append(record(format!("p{}", i)));
    }
    let records = sink.snapshot();
    let payloads: Vec<&str> = records.iter().map(|r| r.payload.as_str()).collect();
    assert_eq!(payloads, vec!["p0", "p1", "p2", "p3", "p4"]);
}

#[test]
fn concurrent_appends_lose_and_duplicate_nothing() {
    // 8 writers against a nominal pool of 4: well past 2x pool size.
    let sink = Arc::new(ResultSink::new());
    let mut handles = Vec::new();
    for t in 0..8 {
        let sink = Arc::clone(&sink);
        handles.push(thread::spawn(move || {
            for i in 0..250 {
                sink.append(record(format!("t{}-{}", t, i)));
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(sink.len(), 2000);
    let unique: HashSet<String> = sink.snapshot().into_iter().map(|r| r.payload).collect();
    assert_eq!(unique.len(), 2000);
}

#[test]
fn snapshot_is_restartable() {
    let sink = ResultSink::new();
    sink.append(record("a".to_string()));
    sink.append(record("b".to_string()));

    let snap = sink.snapshot();
    let first: Vec<&str> = snap.iter().map(|r| r.payload.as_str()).collect();
    let second: Vec<&str> = snap.iter().map(|r| r.payload.as_str()).collect();
    assert_eq!(first, second);

    // A snapshot is an owned copy; later appends don't disturb it.
    sink.append(record("c".to_string()));
    assert_eq!(snap.len(), 2);
    assert_eq!(sink.len(), 3);
}
