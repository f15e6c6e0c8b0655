use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tokio::time::{timeout_at, Instant};

use crate::configuration::ExaSettings;

const API_KEY_HEADER: &str = "x-api-key";

pub struct ExaClient {
    client: Client,
    api_key: String,
    base_url: String,
    poll_interval: Duration,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
pub struct CreateWebsetParameters {
    pub search: WebsetSearch,
    pub enrichments: Vec<EnrichmentParameters>,
}

#[derive(Debug, Serialize)]
pub struct WebsetSearch {
    pub query: String,
    pub count: u32,
    pub entity: WebsetEntity,
}

#[derive(Debug, Serialize)]
pub struct WebsetEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
}

#[derive(Debug, Serialize)]
pub struct EnrichmentParameters {
    pub description: String,
    pub format: EnrichmentFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentFormat {
    Text,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebsetStatus {
    Idle,
    Pending,
    Running,
    Paused,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Webset {
    pub id: String,
    pub status: WebsetStatus,
}

#[derive(Debug, Deserialize)]
pub struct ItemPage {
    #[serde(default)]
    pub data: Vec<WebsetItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebsetItem {
    #[serde(default)]
    pub properties: ItemProperties,
    /// Ordered like the enrichments submitted with the webset.
    #[serde(default)]
    pub enrichments: Option<Vec<Option<ItemEnrichment>>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemProperties {
    pub description: Option<String>,
    pub company: Option<CompanyProperties>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProperties {
    pub name: Option<String>,
    pub about: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemEnrichment {
    pub result: Option<Vec<Option<String>>>,
}

pub enum IdleOutcome {
    Idle(Webset),
    TimedOut,
}

impl ExaClient {
    pub fn new(settings: &ExaSettings) -> anyhow::Result<Self> {
        if settings.api_key.trim().is_empty() {
            bail!("EXA_API_KEY environment variable is required");
        }

        let client = Client::builder()
            .build()
            .context("Failed to build http client")?;

        Ok(ExaClient {
            client,
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            poll_interval: settings.poll_interval(),
            timeout: settings.timeout(),
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn create_webset(&self, params: &CreateWebsetParameters) -> anyhow::Result<Webset> {
        let response = self
            .client
            .post(format!("{}/websets", self.base_url))
            .header(API_KEY_HEADER, &self.api_key)
            .json(params)
            .send()
            .await
            .context("Failed to reach Exa API while creating webset")?;

        parse_response(response).await
    }

    pub async fn get_webset(&self, webset_id: &str) -> anyhow::Result<Webset> {
        let response = self
            .client
            .get(format!("{}/websets/{}", self.base_url, webset_id))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .context("Failed to reach Exa API while fetching webset")?;

        parse_response(response).await
    }

    /// First page of items; one entity is requested per webset, so later pages are never needed.
    pub async fn list_items(&self, webset_id: &str) -> anyhow::Result<ItemPage> {
        let response = self
            .client
            .get(format!("{}/websets/{}/items", self.base_url, webset_id))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .context("Failed to reach Exa API while listing webset items")?;

        parse_response(response).await
    }

    pub async fn wait_until_idle(&self, webset_id: &str) -> anyhow::Result<IdleOutcome> {
        let deadline = Instant::now() + self.timeout;

        loop {
            // A stalled status request must not outlive the ceiling.
            let webset = match timeout_at(deadline, self.get_webset(webset_id)).await {
                Ok(webset) => webset?,
                Err(_) => {
                    log::error!("Webset {} status request outlived the deadline", webset_id);
                    return Ok(IdleOutcome::TimedOut);
                }
            };
            if webset.status == WebsetStatus::Idle {
                return Ok(IdleOutcome::Idle(webset));
            }

            let now = Instant::now();
            if now >= deadline {
                log::error!("Webset {} still {:?} at deadline", webset_id, webset.status);
                return Ok(IdleOutcome::TimedOut);
            }

            log::info!("Webset {} is {:?}, polling again", webset_id, webset.status);
            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
        }
    }
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> anyhow::Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!(
            "Exa API request failed with status {}: {}",
            status,
            provider_message(&body)
        );
    }

    response
        .json::<T>()
        .await
        .context("Failed to deserialize Exa API response")
}

fn provider_message(body: &str) -> String {
    let message = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        ["error", "message"]
            .iter()
            .find_map(|key| json.get(key).and_then(Value::as_str).map(str::to_string))
    });

    message.unwrap_or_else(|| body.trim().to_string())
}
