#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use myip::{Config, Endpoints, ErrorLog};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GEO_TOKEN: &str = "geo-token";
pub const BOT_TOKEN: &str = "TEST";
pub const CHAT_ID: &str = "1";
pub const IP: &str = "203.0.113.7";
pub const BOT_SEND_PATH: &str = r"(?i)^/botTEST/sendmessage$";

pub fn test_config(server: &MockServer) -> Config {
    let mut cfg = Config::new(GEO_TOKEN, BOT_TOKEN, CHAT_ID).with_endpoints(Endpoints {
        geo: server.uri(),
        proxy: server.uri(),
        telegram: server.uri(),
    });
    cfg.timeout = Duration::from_secs(5);
    cfg
}

pub fn temp_error_log() -> (TempDir, ErrorLog) {
    let dir = tempfile::tempdir().unwrap();
    let log = ErrorLog::new(dir.path().join("error.log"));
    (dir, log)
}

pub fn log_lines(path: impl Into<PathBuf>) -> Vec<String> {
    match std::fs::read_to_string(path.into()) {
        Ok(contents) => contents.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}

pub fn geo_body() -> Value {
    json!({
        "ip": IP,
        "city": "Riga",
        "region": "Riga",
        "country": "LV",
        "postal": "LV-1010",
        "org": "AS1234 Example Net",
        "timezone": "Europe/Riga",
        "loc": "56.9460,24.1059",
        "hostname": "host.example.net"
    })
}

pub fn proxy_body(proxy: &str) -> Value {
    json!({
        "status": "ok",
        IP: {
            "asn": "AS9009",
            "provider": "M247 Ltd",
            "proxy": proxy,
            "type": "VPN",
            "risk": 66
        }
    })
}

pub async fn mount_geo(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/json"))
        .and(query_param("token", GEO_TOKEN))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_proxy(server: &MockServer, ip: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/{ip}")))
        .and(query_param("vpn", "1"))
        .and(query_param("asn", "1"))
        .and(query_param("risk", "1"))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_bot(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path_regex(BOT_SEND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"ok":true,"result":{"message_id":1,"date":0,"chat":{"id":1,"type":"private"}}}"#,
            "application/json",
        ))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Bodies of every request the bot endpoint received, parsed as JSON.
pub async fn bot_payloads(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|req| is_bot_send(req.url.path()))
        .map(|req| serde_json::from_slice(&req.body).unwrap())
        .collect()
}

fn is_bot_send(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.starts_with("/bot") && lower.ends_with("/sendmessage")
}
