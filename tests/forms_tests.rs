use sqli_probe::discover::{fields_from_html, DEFAULT_FIELDS};

#[test]
fn extracts_named_inputs_in_document_order() {
    let html = r#"
        <html><body>
        <form action="/login" method="post">
            <input type="text" name="username">
            <input type="password" name="password">
            <input type="hidden" name="csrf_token" value="abc">
            <input type="submit" value="Go">
        </form>
        </body></html>
    "#;
    assert_eq!(fields_from_html(html), vec!["username", "password", "csrf_token"]);
}

#[test]
fn deduplicates_across_forms() {
    let html = r#"
        <form><input name="q"></form>
        <form><input name="q"><input name="page"></form>
    "#;
    assert_eq!(fields_from_html(html), vec!["q", "page"]);
}

#[test]
fn page_without_forms_yields_nothing() {
    assert!(fields_from_html("<html><body><p>static page</p></body></html>").is_empty());
}

#[test]
fn inputs_outside_forms_are_ignored() {
    let html = r#"<input name="stray"><form><input name="real"></form>"#;
    assert_eq!(fields_from_html(html), vec!["real"]);
}

#[test]
fn default_fields_cover_login_shape() {
    assert_eq!(DEFAULT_FIELDS, ["username", "password"]);
}
