// src/core/net.rs
// Blocking HTTP GET. The plan site is HTTPS-only.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;

use crate::config::consts::{TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};

fn client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .build()
        .map_err(|source| Error::Http { url: s!(), source })
}

/// GET `url` and return the body as text.
/// Any non-2xx status is an error.
pub fn http_get(url: &str) -> Result<String> {
    debug!("GET {url}");
    let http_err = |source| Error::Http { url: s!(url), source };

    let resp = client()?.get(url).send().map_err(http_err)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Status { url: s!(url), status: status.as_u16() });
    }
    let body = resp.text().map_err(http_err)?;
    debug!("GET {url}: {} bytes", body.len());
    Ok(body)
}
