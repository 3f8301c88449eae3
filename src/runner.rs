use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::cli::{Cli, OutputFormat};
use sqli_probe::config::ScanConfig;
use sqli_probe::discover::discover_fields;
use sqli_probe::error::EngineError;
use sqli_probe::fingerprint::{detect_engine, DbFingerprint};
use sqli_probe::http_client::ClientPool;
use sqli_probe::output::{spawn_csv_writer, write_csv_header, write_html, write_json, ResultSink, TrialRecord};
use sqli_probe::payloads;
use sqli_probe::probe::dispatcher::{run_batch, BatchContext};
use sqli_probe::probe::{capture_baseline, BatchOutcome};
use sqli_probe::target::{parse_cookies, Target};

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    // Configure logging based on global flags. Keep reqwest/hyper at info
    // so trial-level noise doesn't flood the CLI.
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    let filter_str = format!(
        "sqli_probe={level},reqwest=info,hyper=info,h2=info",
        level = crate_level
    );
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(true)
        .with_target(false)
        .init();

    // All configuration errors surface here, before any network activity.
    if cli.delay_max < cli.delay_min {
        return Err(EngineError::Configuration(format!(
            "delay range is inverted: min {} > max {}",
            cli.delay_min, cli.delay_max
        ))
        .into());
    }
    if cli.threads == 0 {
        return Err(EngineError::Configuration("worker pool size must be at least 1".into()).into());
    }

    url::Url::parse(&cli.url).map_err(|e| {
        EngineError::Configuration(format!("invalid target url '{}': {}", cli.url, e))
    })?;

    let payload_list = payloads::load_payloads(&cli.payload_file)?;

    let mut target = Target::new(cli.url.clone());
    if let Some(raw) = &cli.cookies {
        target.cookies = parse_cookies(raw)?;
    }
    if let Some(proxy_file) = &cli.proxy_file {
        target.proxies = payloads::load_proxies(proxy_file)?;
    }
    let target = Arc::new(target);

    let config = Arc::new(ScanConfig {
        concurrency: cli.threads,
        trial_timeout: Duration::from_secs(cli.timeout),
        baseline_timeout: Duration::from_secs(10),
        sleep_threshold: cli.sleep_threshold,
        content_diff_percent: cli.content_diff_percent,
        delay_min: cli.delay_min,
        delay_max: cli.delay_max,
        log_all: cli.log_all,
    });

    let clients = Arc::new(ClientPool::build(&target.proxies, config.trial_timeout)?);

    let log_path = cli.log.clone().unwrap_or_else(|| {
        PathBuf::from(format!(
            "results_{}.csv",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        ))
    });
    write_csv_header(&log_path)?;

    println!("[>] Target: {}", target.url);
    println!(
        "[~] Workers: {} | payloads: {} | proxies: {}",
        config.concurrency,
        payload_list.len(),
        target.proxies.len()
    );

    let fingerprint = if cli.db_detect {
        let fp = detect_engine(&clients, &target, config.trial_timeout).await;
        match &fp {
            Some(f) => println!("[+] Detected database: {} ({:?})", f.engine.name(), f.mode),
            None => println!("[-] Database not detected"),
        }
        fp
    } else {
        None
    };

    let sink = Arc::new(ResultSink::new());
    let (csv_tx, csv_rx) = mpsc::channel::<TrialRecord>(1024);
    let csv_task = spawn_csv_writer(log_path.clone(), csv_rx);

    // Operator interrupt aborts before the next submission; records
    // collected so far are kept and reported.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, cancelling remaining submissions");
                cancel.cancel();
            }
        });
    }

    let ctx = BatchContext {
        clients: Arc::clone(&clients),
        target: Arc::clone(&target),
        config: Arc::clone(&config),
        sink: Arc::clone(&sink),
        csv_tx: Some(csv_tx.clone()),
        cancel: cancel.clone(),
    };

    let mut submitted_total = 0usize;
    let mut skipped_total = 0usize;

    for method in target.methods.clone() {
        if let Some(outcome) =
            run_method_batch(&ctx, method, &payload_list, cli.field.as_deref()).await
        {
            submitted_total += outcome.submitted;
            skipped_total += outcome.skipped;
        }
    }

    if let Some(table_wordlist) = &cli.table_wordlist {
        let tables = payloads::load_wordlist(table_wordlist)?;
        println!("[*] UNION-probing {} table names...", tables.len());
        let probes = payloads::table_probes(&tables);
        if let Some(outcome) =
            run_method_batch(&ctx, Method::GET, &probes, cli.field.as_deref()).await
        {
            submitted_total += outcome.submitted;
            skipped_total += outcome.skipped;
        }
    }

    if let Some(column_wordlist) = &cli.column_wordlist {
        let columns = payloads::load_wordlist(column_wordlist)?;
        println!("[*] UNION-probing {} column names...", columns.len());
        let probes = payloads::column_probes(&columns);
        if let Some(outcome) =
            run_method_batch(&ctx, Method::GET, &probes, cli.field.as_deref()).await
        {
            submitted_total += outcome.submitted;
            skipped_total += outcome.skipped;
        }
    }

    // Flush the CSV stream before reading the sink for the other reports.
    drop(ctx);
    drop(csv_tx);
    if tokio::time::timeout(Duration::from_secs(5), csv_task)
        .await
        .is_err()
    {
        tracing::warn!("csv writer did not finish within 5s");
    }

    let records = sink.snapshot();
    write_reports(&cli, &log_path, fingerprint.as_ref(), &records)?;

    let vulnerable = records.iter().filter(|r| r.vulnerable).count();
    println!(
        "\n[=] Done: {} trials submitted, {} skipped, {} recorded, {} flagged vulnerable",
        submitted_total,
        skipped_total,
        records.len(),
        vulnerable
    );
    println!("[=] CSV log: {}", log_path.display());

    Ok(())
}

/// Discover fields, capture the method baseline, and run the batch.
/// A baseline failure is fatal for this method only: logged, batch skipped,
/// the run continues with the remaining methods.
async fn run_method_batch(
    ctx: &BatchContext,
    method: Method,
    payload_list: &[String],
    field_override: Option<&str>,
) -> Option<BatchOutcome> {
    let fields = match field_override {
        Some(f) => vec![f.to_string()],
        None => discover_fields(ctx.clients.pick(), &ctx.target.url).await,
    };

    let baseline = match capture_baseline(
        &ctx.clients,
        &ctx.target,
        &method,
        ctx.config.baseline_timeout,
    )
    .await
    {
        Ok(b) => Arc::new(b),
        Err(e) => {
            tracing::error!(%method, error = %e, "skipping method batch");
            eprintln!("[!] {} baseline failed: {}", method, e);
            return None;
        }
    };

    println!(
        "\n[*] Testing {} | fields: {} | trials: {}",
        method,
        fields.len(),
        fields.len() * payload_list.len()
    );

    Some(run_batch(ctx, method, baseline, &fields, payload_list).await)
}

fn write_reports(
    cli: &Cli,
    log_path: &PathBuf,
    fingerprint: Option<&DbFingerprint>,
    records: &[TrialRecord],
) -> anyhow::Result<()> {
    if matches!(cli.output_format, OutputFormat::Json | OutputFormat::All) {
        let json_path = log_path.with_extension("json");
        write_json(&json_path, &cli.url, fingerprint, records)?;
        println!("[=] JSON report: {}", json_path.display());
    }
    if matches!(cli.output_format, OutputFormat::Html | OutputFormat::All) {
        let html_path = log_path.with_extension("html");
        write_html(&html_path, &cli.url, records)?;
        println!("[=] HTML report: {}", html_path.display());
    }
    Ok(())
}
