use reqwest::Client;
use scraper::{Html, Selector};

/// Fallback injection points when the page yields no named form inputs.
pub const DEFAULT_FIELDS: [&str; 2] = ["username", "password"];

/// Named `<input>` elements inside `<form>` blocks, first-seen order,
/// deduplicated. Empty when the page has no usable form fields.
pub fn fields_from_html(body: &str) -> Vec<String> {
    let document = Html::parse_document(body);
    let form_sel = Selector::parse("form").unwrap();
    let input_sel = Selector::parse("input").unwrap();

    let mut out = Vec::new();
    for form in document.select(&form_sel) {
        for input in form.select(&input_sel) {
            if let Some(name) = input.value().attr("name") {
                if !name.is_empty() && !out.iter().any(|n| n == name) {
                    out.push(name.to_string());
                }
            }
        }
    }
    out
}

fn default_fields() -> Vec<String> {
    DEFAULT_FIELDS.iter().map(|s| s.to_string()).collect()
}

/// Fetch the target page and extract candidate field names. Failures never
/// propagate; anything going wrong reduces to the default field set.
pub async fn discover_fields(client: &Client, url: &str) -> Vec<String> {
    let body = match client.get(url).send().await {
        Ok(resp) => match resp.text().await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(error = %e, "form page read failed, using default fields");
                return default_fields();
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "form page fetch failed, using default fields");
            return default_fields();
        }
    };

    let fields = fields_from_html(&body);
    if fields.is_empty() {
        tracing::info!("no named form fields found, using default fields");
        return default_fields();
    }
    fields
}
