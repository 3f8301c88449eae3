use std::io::Write;

use sqli_probe::payloads::{
    column_probes, load_payloads, load_proxies, load_wordlist, table_probes,
};

fn temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f
}

#[test]
fn payload_loader_strips_comments_and_blanks() {
    let f = temp_file("# header comment\n' OR '1'='1\n\n  \n1; --\n# tail\n");
    let payloads = load_payloads(f.path()).unwrap();
    assert_eq!(payloads, vec!["' OR '1'='1", "1; --"]);
}

#[test]
fn missing_payload_file_is_fatal() {
    assert!(load_payloads(std::path::Path::new("/nonexistent/payloads.txt")).is_err());
}

#[test]
fn comment_only_payload_file_is_fatal() {
    let f = temp_file("# only comments here\n\n");
    assert!(load_payloads(f.path()).is_err());
}

#[test]
fn proxy_loader_allows_empty_list() {
    let f = temp_file("\n\n");
    assert!(load_proxies(f.path()).unwrap().is_empty());

    let f = temp_file("http://127.0.0.1:8080\nsocks5://10.0.0.1:9050\n");
    assert_eq!(load_proxies(f.path()).unwrap().len(), 2);
}

#[test]
fn wordlist_probes_follow_union_shape() {
    let tables = vec!["users".to_string(), "accounts".to_string()];
    let probes = table_probes(&tables);
    assert_eq!(probes[0], "' UNION SELECT 1 FROM users --");
    assert_eq!(probes.len(), 2);

    let cols = vec!["password".to_string()];
    let probes = column_probes(&cols);
    assert_eq!(
        probes[0],
        "' UNION SELECT password, null FROM information_schema.columns --"
    );
}

#[test]
fn wordlist_loader_keeps_order() {
    let f = temp_file("users\naccounts\nsessions\n");
    assert_eq!(
        load_wordlist(f.path()).unwrap(),
        vec!["users", "accounts", "sessions"]
    );
}
