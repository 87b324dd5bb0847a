//! Blog API client.
//!
//! Blocking HTTP client for the external blogging backend. Every response
//! is checked for a success status before its body is decoded, so callers
//! see transport, status, encode and decode failures of [`ApiError`] separately.

mod blogs;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use ureq::Agent;

use crate::config::SiteConfig;
use crate::error::ApiError;
use crate::helpers::encode_component;

/// Blog API client
#[derive(Clone)]
pub struct BlogClient {
    agent: Agent,
    blogs_url: String,
    contact_url: String,
}

impl BlogClient {
    /// Create client from site configuration
    pub fn new(config: &SiteConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(config.timeout())
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            blogs_url: config.blogs_url(),
            contact_url: config.contact_url.clone(),
        }
    }

    pub fn blogs_url(&self) -> &str {
        &self.blogs_url
    }

    pub fn contact_url(&self) -> &str {
        &self.contact_url
    }

    /// GET a URL and decode its JSON body
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!("GET {}", url);
        let response = self
            .agent
            .get(url)
            .header("Accept", "application/json")
            .call()?;
        let body = read_success(response)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a JSON body with the given method and return the raw response body
    fn send_json<T: Serialize>(&self, method: &str, url: &str, payload: &T) -> Result<String, ApiError> {
        debug!("{} {}", method, url);
        let bytes = serde_json::to_vec(payload).map_err(ApiError::Encode)?;
        let request = match method {
            "PUT" => self.agent.put(url),
            _ => self.agent.post(url),
        };
        let response = request
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&bytes[..])?;
        read_success(response)
    }

    /// POST an `application/x-www-form-urlencoded` body
    pub(crate) fn post_form(&self, url: &str, fields: &[(&str, String)]) -> Result<String, ApiError> {
        debug!("POST {} (form)", url);
        let body = form_encode(fields);
        let response = self
            .agent
            .post(url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .send(body.as_bytes())?;
        read_success(response)
    }

    pub(crate) fn post_json<T: Serialize>(&self, url: &str, payload: &T) -> Result<String, ApiError> {
        self.send_json("POST", url, payload)
    }

    fn delete_url(&self, url: &str) -> Result<(), ApiError> {
        debug!("DELETE {}", url);
        let response = self.agent.delete(url).call()?;
        read_success(response).map(|_| ())
    }
}

/// Read the body of a 2xx response, or turn anything else into [`ApiError::Status`]
fn read_success(response: ureq::http::Response<ureq::Body>) -> Result<String, ApiError> {
    let status = response.status().as_u16();
    let mut body = response.into_body();

    if !(200..300).contains(&status) {
        let error_body = body.read_to_string().unwrap_or_default();
        return Err(ApiError::Status {
            status,
            body: error_body,
        });
    }

    Ok(body.read_to_string()?)
}

/// Encode `key=value` pairs for a form body or a query string
pub fn form_encode(fields: &[(&str, String)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}
