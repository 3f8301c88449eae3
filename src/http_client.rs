use rand::seq::SliceRandom;
use reqwest::{Client, ClientBuilder, Proxy};
use std::time::Duration;

use crate::error::EngineError;

/// One client per configured proxy, or a single direct client when the
/// proxy pool is empty. Trials pick uniformly at random with replacement.
pub struct ClientPool {
    clients: Vec<Client>,
}

impl ClientPool {
    pub fn build(proxies: &[String], timeout: Duration) -> Result<Self, EngineError> {
        let clients = if proxies.is_empty() {
            vec![build_client(None, timeout)?]
        } else {
            proxies
                .iter()
                .map(|p| build_client(Some(p), timeout))
                .collect::<Result<Vec<_>, _>>()?
        };
        Ok(Self { clients })
    }

    pub fn pick(&self) -> &Client {
        self.clients
            .choose(&mut rand::thread_rng())
            .expect("client pool is never empty")
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

/// Build a probing client. Redirects are disabled so a 302 stays visible to
/// the status-flip heuristic instead of being followed.
fn build_client(proxy: Option<&str>, timeout: Duration) -> Result<Client, EngineError> {
    let mut builder = ClientBuilder::new()
        // Connection pooling - reuse connections across trials
        .pool_max_idle_per_host(32)
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .tcp_nodelay(true)
        // Timeouts; per-request overrides apply on top
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(5))
        // Compression
        .gzip(true)
        .brotli(true)
        // TLS
        .use_rustls_tls()
        .tls_sni(true)
        .https_only(false)
        // Keep 3xx observable
        .redirect(reqwest::redirect::Policy::none())
        // Disable certificate validation for pentesting (ONLY for security research!)
        .danger_accept_invalid_certs(true);

    if let Some(addr) = proxy {
        builder = builder.proxy(Proxy::all(addr)?);
    }

    Ok(builder.build()?)
}
