use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};

/// Issue a GET request and parse the body as a JSON object.
///
/// A fresh client is built for every call and dropped when it returns, so no
/// connection state outlives a single lookup. Query values are logged only at
/// trace level because they may carry an API token, and reqwest errors are
/// stripped of their URL before they leave this function.
#[instrument(level = "trace", skip(query))]
pub async fn get_json(url: &str, query: &[(&str, &str)], timeout: Duration) -> Result<Value> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build HTTP client")?;

    debug!(url, "sending GET request");
    let resp = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(reqwest::Error::without_url)?;

    if !resp.status().is_success() {
        let status = resp.status();
        let err_text = resp.text().await.unwrap_or_default();
        warn!(%status, url, "upstream API error");
        return Err(anyhow!("{url} returned {status}: {err_text}"));
    }

    let raw = resp.text().await.map_err(reqwest::Error::without_url)?;
    let snippet: String = raw.chars().take(200).collect();
    trace!(snippet = %snippet, "response body");

    let value: Value = serde_json::from_str(&raw).context("response is not valid JSON")?;
    if !value.is_object() {
        return Err(anyhow!("{url} did not return a JSON object"));
    }
    Ok(value)
}

/// Replace every occurrence of `secret` in `text` with a placeholder.
pub fn redact(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, "***")
}

/// Read a field as text. Strings are taken verbatim, other scalars use their
/// JSON rendering, `null` and missing fields yield `None`.
pub fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
