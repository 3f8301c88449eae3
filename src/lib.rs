pub mod config;
pub mod discover;
pub mod error;
pub mod fingerprint;
pub mod http_client;
pub mod output;
pub mod payloads;
pub mod probe;
pub mod target;
