use std::fs;
use std::path::Path;

use html_escape::encode_text;

use crate::output::record::TrialRecord;

/// Write the run as a styled HTML table, one row per record. Vulnerable
/// rows are tinted; payloads and field names are escaped so a probe string
/// can't inject into its own report.
pub fn write_html(path: &Path, url: &str, records: &[TrialRecord]) -> anyhow::Result<()> {
    let mut rows = String::new();
    for rec in records {
        let class = if rec.vulnerable { " class='vuln'" } else { "" };
        rows.push_str(&format!(
            "<tr{}><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            rec.timestamp.to_rfc3339(),
            encode_text(&rec.field),
            encode_text(&rec.payload),
            rec.method,
            rec.elapsed_secs,
            rec.response_len,
            rec.status,
            rec.vulnerable,
        ));
    }

    let html = format!(
        r#"<html>
<head>
<title>sqli-probe report</title>
<style>
table {{ border-collapse: collapse; width: 100%; font-family: Arial; }}
th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
th {{ background-color: #f2f2f2; }}
tr:nth-child(even) {{ background-color: #f9f9f9; }}
tr.vuln {{ background-color: #ffcccc; }}
</style>
</head>
<body>
<h2>sqli-probe report - {}</h2>
<table>
<tr><th>Timestamp</th><th>Field</th><th>Payload</th><th>Method</th><th>Time</th><th>Length</th><th>Status</th><th>Vulnerable</th></tr>
{}</table>
</body>
</html>
"#,
        encode_text(url),
        rows
    );

    fs::write(path, html)?;
    Ok(())
}
