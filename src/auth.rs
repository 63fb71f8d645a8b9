use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::warn;

use crate::error::{ConsoleError, Result};

/// Exchanges credentials for an API token.
///
/// Wrong credentials (or an unreachable server) yield `Ok(None)`; a 200
/// response without a `key` field is a contract violation and fails loudly.
pub fn login(http: &Client, base_url: &str, username: &str, password: &str) -> Result<Option<String>> {
    let url = format!("{base_url}/auth/login/");
    let params = [("username", username), ("password", password)];
    let response = match http.post(&url).form(&params).send() {
        Ok(response) => response,
        Err(e) => {
            warn!("login request to {url} failed: {e}");
            return Ok(None);
        }
    };
    if response.status() != StatusCode::OK {
        return Ok(None);
    }
    let body: Value = response.json()?;
    let key = body
        .get("key")
        .and_then(Value::as_str)
        .ok_or_else(|| ConsoleError::MissingField("key".to_string()))?;
    Ok(Some(key.to_string()))
}
