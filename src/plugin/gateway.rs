use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::model::config::GatewayConfig;
use crate::plugin::manifest::{Plugin, PluginId};

/// The two host operations the client consumes.
///
/// Implementations are called from worker threads, never from the UI loop.
pub trait PluginGateway: Send + Sync {
    fn list_plugins(&self) -> Result<Vec<Plugin>, GatewayError>;

    fn set_enabled(&self, id: &PluginId, enabled: bool) -> Result<(), GatewayError>;
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    plugins: Option<Vec<Plugin>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionRequest<'a> {
    action: &'static str,
    plugin_id: &'a str,
}

pub fn action_name(enabled: bool) -> &'static str {
    if enabled {
        "enable_plugin"
    } else {
        "disable_plugin"
    }
}

/// JSON-over-HTTP gateway.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    list_url: String,
    action_url: String,
    api_key: Option<String>,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        let base = config.base_url.trim_end_matches('/');
        Ok(Self {
            client,
            list_url: format!("{base}{}", config.list_path),
            action_url: format!("{base}{}", config.action_path),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.api_key.as_deref() {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

impl PluginGateway for HttpGateway {
    fn list_plugins(&self) -> Result<Vec<Plugin>, GatewayError> {
        let response = self.authorize(self.client.get(&self.list_url)).send()?;
        let body = success_body(response)?;
        let parsed: ListResponse = serde_json::from_str(&body)?;
        Ok(parsed.plugins.unwrap_or_default())
    }

    fn set_enabled(&self, id: &PluginId, enabled: bool) -> Result<(), GatewayError> {
        let request = ActionRequest {
            action: action_name(enabled),
            plugin_id: id.as_str(),
        };
        let response = self
            .authorize(self.client.post(&self.action_url))
            .json(&request)
            .send()?;
        success_body(response).map(|_| ())
    }
}

fn success_body(response: Response) -> Result<String, GatewayError> {
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(GatewayError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}
