use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::error::LiveResult;

pub fn create_polling_client(timeout_ms: u64) -> LiveResult<Client> {
    let client = ClientBuilder::new()
        .pool_max_idle_per_host(4) // One backend, a poll every few seconds
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .tcp_nodelay(true)
        .timeout(Duration::from_millis(timeout_ms))
        .build()?;
    Ok(client)
}
