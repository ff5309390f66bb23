// Service settings and the MQTT connection-details fetch
use crate::application::session::ConnectionSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub http: HttpSettings,
    pub connection: ConnectionSettings,
    #[serde(default)]
    pub window: WindowSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConnectionSettings {
    /// Endpoint returning the MQTT server address and topic.
    pub details_url: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct WindowSettings {
    pub capacity: Option<usize>,
}

pub fn load_settings() -> Result<DashboardSettings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Transport connection parameters, immutable for the session.
/// The field names match the connection-details endpoint contract.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    pub mqtt_server: String,
    pub mqtt_topic: String,
}

/// One-shot HTTP fetch of the connection details. Any non-success status
/// or malformed body is a fatal startup error; there is no retry and no
/// fallback.
#[derive(Debug, Clone)]
pub struct HttpConnectionSource {
    url: String,
}

impl HttpConnectionSource {
    pub fn new(url: String) -> Self {
        Self { url }
    }
}

#[async_trait]
impl ConnectionSource for HttpConnectionSource {
    async fn fetch(&self) -> Result<ConnectionConfig> {
        let client = reqwest::Client::new();
        let response = client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("failed to request connection details")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "connection details request failed with status {}",
                response.status()
            );
        }

        response
            .json::<ConnectionConfig>()
            .await
            .context("failed to parse connection details")
    }
}
