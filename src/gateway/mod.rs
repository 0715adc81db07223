//! The only component that talks to the spreadsheet API.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Instant;

use crate::error::AppError;
use crate::model::{GroupSnapshot, Leaderboard, SubmitHole, SubmitReceipt};

pub const API_URL_ENV: &str = "GOLF_API_URL";

/// Where the spreadsheet API lives. `None` means the deployment never set it,
/// and every call fails before touching the network.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    pub endpoint: Option<Url>,
}

impl ApiConfig {
    #[must_use]
    pub fn new(endpoint: Option<Url>) -> Self {
        Self { endpoint }
    }

    /// # Errors
    ///
    /// Returns `AppError::MissingConfig` when no endpoint was configured.
    pub fn endpoint(&self) -> Result<&Url, AppError> {
        self.endpoint
            .as_ref()
            .ok_or_else(|| AppError::MissingConfig(API_URL_ENV.to_string()))
    }
}

/// Operations the views need from the spreadsheet API.
#[async_trait]
pub trait ScoreApi: Send + Sync {
    async fn leaderboard(&self) -> Result<Leaderboard, AppError>;
    async fn group(&self, group_id: &str, hole: u8) -> Result<GroupSnapshot, AppError>;
    async fn submit_hole(&self, body: &SubmitHole) -> Result<SubmitReceipt, AppError>;
}

#[derive(Debug, Clone)]
pub struct SheetGateway {
    client: Client,
    config: ApiConfig,
}

impl SheetGateway {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// GET the endpoint with `params` as the query string.
    ///
    /// # Errors
    ///
    /// Missing configuration, transport failure, non-2xx status, or a body
    /// that is not JSON.
    pub async fn get(&self, params: &[(&str, String)]) -> Result<Value, AppError> {
        let url = with_params(self.config.endpoint()?, params);
        let started = Instant::now();
        let resp = self.client.get(url).send().await.inspect_err(|e| {
            tracing::warn!(error = %e, "GET to score api did not complete");
        })?;
        let op = params
            .iter()
            .find(|(k, _)| *k == "op")
            .map_or("", |(_, v)| v.as_str());
        tracing::info!(
            op,
            status = resp.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "score api GET"
        );
        read_json("GET", resp).await
    }

    /// POST `body` as JSON text.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`SheetGateway::get`].
    pub async fn post<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value, AppError> {
        let url = self.config.endpoint()?.clone();
        let payload = serde_json::to_string(body)?;
        let started = Instant::now();
        // Script endpoints take text/plain without a preflight; the body is still JSON.
        let resp = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(payload)
            .send()
            .await
            .inspect_err(|e| {
                tracing::warn!(error = %e, "POST to score api did not complete");
            })?;
        tracing::info!(
            status = resp.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "score api POST"
        );
        read_json("POST", resp).await
    }
}

#[async_trait]
impl ScoreApi for SheetGateway {
    async fn leaderboard(&self) -> Result<Leaderboard, AppError> {
        let value = self.get(&[("op", "leaderboard".to_string())]).await?;
        decode(value)
    }

    async fn group(&self, group_id: &str, hole: u8) -> Result<GroupSnapshot, AppError> {
        let value = self
            .get(&[
                ("op", "group".to_string()),
                ("groupId", group_id.trim().to_string()),
                ("hole", hole.to_string()),
            ])
            .await?;
        decode(value)
    }

    async fn submit_hole(&self, body: &SubmitHole) -> Result<SubmitReceipt, AppError> {
        let value = self.post(body).await?;
        decode(value)
    }
}

/// Sets each param on the URL, replacing any value already in the query.
#[must_use]
pub fn with_params(endpoint: &Url, params: &[(&str, String)]) -> Url {
    let kept: Vec<(String, String)> = endpoint
        .query_pairs()
        .filter(|(k, _)| !params.iter().any(|(p, _)| *p == k.as_ref()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let mut url = endpoint.clone();
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        for (k, v) in params {
            pairs.append_pair(k, v);
        }
    }
    url
}

async fn read_json(method: &str, resp: Response) -> Result<Value, AppError> {
    let status = resp.status();
    let text = resp.text().await?;
    let parsed = serde_json::from_str::<Value>(&text);
    if !status.is_success() {
        let message = parsed
            .ok()
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map_or_else(
                || format!("{method} failed: {}", status.as_u16()),
                String::from,
            );
        tracing::warn!(status = status.as_u16(), %message, "score api returned an error");
        return Err(AppError::Http {
            status: status.as_u16(),
            message,
        });
    }
    parsed.map_err(|e| {
        tracing::warn!(error = %e, "score api body was not json");
        AppError::from(e)
    })
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(AppError::from)
}
