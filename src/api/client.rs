use crate::api::models::Contact;
use crate::error::{QsError, QsResult};
use reqwest::Client as HttpClient;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Minimal BlueBubbles REST client: the contact directory and new-chat endpoint.
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    password: String,
}

impl ApiClient {
    pub fn new(base_url: &str, password: &str) -> QsResult<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            password: password.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> QsResult<Url> {
        let base = if self.base_url.ends_with("/api") {
            self.base_url.clone()
        } else {
            format!("{}/api", self.base_url)
        };
        let mut url = Url::parse(&format!("{}/v1/{}", base, path))
            .map_err(|e| QsError::Config(format!("invalid server url: {e}")))?;
        url.query_pairs_mut().append_pair("password", &self.password);
        Ok(url)
    }

    /// Fetch the server's address book. Contacts without a phone number are dropped.
    pub async fn contacts(&self) -> QsResult<Vec<Contact>> {
        let resp = self.http.get(self.endpoint("contact")?).send().await?;
        if !resp.status().is_success() {
            return Err(QsError::Http(format!("HTTP {}", resp.status())));
        }
        let json: Value = resp.json().await?;
        Ok(parse_contacts(&json))
    }

    /// Start (or reuse) a chat with `addresses` and send `message` into it.
    /// Returns the chat GUID.
    pub async fn create_chat(&self, addresses: &[String], message: &str) -> QsResult<String> {
        let body = serde_json::json!({
            "addresses": addresses,
            "message": message,
        });
        let resp = self.http.post(self.endpoint("chat/new")?).json(&body).send().await?;
        if !resp.status().is_success() {
            return Err(QsError::Http(format!("HTTP {}", resp.status())));
        }
        let json: Value = resp.json().await?;
        let data = json.get("data").unwrap_or(&json);
        data.get("guid")
            .or_else(|| data.get("id"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| QsError::Http("no chat GUID in response".into()))
    }
}

pub(crate) fn parse_contacts(json: &Value) -> Vec<Contact> {
    let list = json
        .as_array()
        .or_else(|| json.get("data").and_then(|v| v.as_array()))
        .cloned()
        .unwrap_or_default();
    let mut out = Vec::new();
    for c in &list {
        let full_name = contact_name(c);
        let mut phone_numbers: Vec<String> = c
            .get("phoneNumbers")
            .and_then(|v| v.as_array())
            .map(|numbers| {
                numbers
                    .iter()
                    .filter_map(|n| n.get("address").and_then(|a| a.as_str()).or_else(|| n.as_str()))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        if phone_numbers.is_empty() {
            if let Some(phone) = c.get("address").or_else(|| c.get("phone")).and_then(|v| v.as_str()) {
                phone_numbers.push(phone.to_string());
            }
        }
        phone_numbers.retain(|p| !p.trim().is_empty());
        if !phone_numbers.is_empty() {
            out.push(Contact { full_name, phone_numbers });
        }
    }
    out
}

fn contact_name(c: &Value) -> Option<String> {
    let display = c
        .get("displayName")
        .or_else(|| c.get("name"))
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|n| !n.is_empty());
    if let Some(name) = display {
        return Some(name.to_string());
    }
    let first = c.get("firstName").and_then(|v| v.as_str()).unwrap_or("").trim();
    let last = c.get("lastName").and_then(|v| v.as_str()).unwrap_or("").trim();
    let joined = format!("{} {}", first, last).trim().to_string();
    if joined.is_empty() { None } else { Some(joined) }
}
