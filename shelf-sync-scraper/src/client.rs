//! HTTP plumbing shared by the PriceCharting and Backloggery clients.

use serde::de::DeserializeOwned;
use tokio::time::Duration;

use crate::error::SyncError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("shelf-sync/", env!("CARGO_PKG_VERSION"));

/// Build a reqwest client. `cookies` enables the cookie store needed to keep
/// a Backloggery login alive across requests.
pub fn build_client(cookies: bool) -> Result<reqwest::Client, SyncError> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .cookie_store(cookies)
        .build()?;
    Ok(client)
}

/// Join a base URL and an absolute path without doubling the slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Fail on a non-success status, otherwise return the body text.
pub(crate) async fn read_body(resp: reqwest::Response, what: &str) -> Result<String, SyncError> {
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(SyncError::network(format!(
            "{what}: HTTP {}. Response: {}",
            status.as_u16(),
            snippet(&text)
        )));
    }
    Ok(text)
}

/// Read a JSON body, failing on non-success status or a non-JSON payload.
pub(crate) async fn read_json<T: DeserializeOwned>(
    resp: reqwest::Response,
    what: &str,
) -> Result<T, SyncError> {
    let text = read_body(resp, what).await?;
    serde_json::from_str(&text).map_err(|e| {
        SyncError::network(format!(
            "Failed to parse {what}: {e}. Response: {}",
            snippet(&text)
        ))
    })
}

fn snippet(text: &str) -> &str {
    let mut end = text.len().min(200);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
