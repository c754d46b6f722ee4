use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    analysis::{
        entities::{LocalVerdict, RemoteVerdict, Verdict},
        ports::{AnalysisClient, ImagePayload},
    },
    avoid_list::{entities::AvoidList, ports::AvoidListClient, value_objects::ProfileSelection},
    common::{ApiConfig, entities::CoreError},
};

/// Reqwest adapter for both remote ports: the ingredient-analysis endpoints
/// and the personalized avoid-list endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct AnalyzeTextRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct AnalyzeImageRequest {
    image: ImageBody,
}

#[derive(Debug, Serialize)]
struct ImageBody {
    #[serde(rename = "type")]
    kind: &'static str,
    data: String,
}

#[derive(Debug, Serialize)]
struct AvoidListRequest<'a> {
    dietary: &'a [String],
    health: &'a [String],
    allergies: &'a [String],
}

#[derive(Debug, Deserialize)]
struct AvoidListResponse {
    blacklist: Vec<crate::domain::avoid_list::entities::AvoidListItem>,
}

/// Both response generations decode into one shape: the canonical
/// `status`/`summary` pair, plus the legacy score fields some deployments
/// still return. When the full legacy set is present it becomes a local
/// verdict so no decision data is guessed away.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    status: String,
    summary: String,
    #[serde(default)]
    is_safe: Option<bool>,
    #[serde(default)]
    health_score: Option<i32>,
    #[serde(default)]
    warnings: Option<Vec<String>>,
    #[serde(default)]
    flagged_ingredients: Option<Vec<String>>,
}

impl AnalyzeResponse {
    fn into_verdict(self) -> Verdict {
        match (
            self.is_safe,
            self.health_score,
            self.warnings,
            self.flagged_ingredients,
        ) {
            (Some(is_safe), Some(health_score), Some(warnings), Some(flagged_ingredients)) => {
                Verdict::Local(LocalVerdict {
                    is_safe,
                    health_score,
                    warnings,
                    flagged_ingredients,
                })
            }
            _ => Verdict::Remote(RemoteVerdict {
                status: self.status,
                summary: self.summary,
            }),
        }
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("failed to build http client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn post_analysis<B: Serialize + Sync>(
        &self,
        body: &B,
        user_id: &str,
    ) -> Result<Verdict, CoreError> {
        let url = format!("{}/analyze-text", self.base_url);
        tracing::debug!(%url, "submitting analysis request");

        let response = self
            .client
            .post(&url)
            .header("X-User-Id", user_id)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "analysis endpoint returned error");
            return Err(CoreError::Server(status.as_u16()));
        }

        let body: AnalyzeResponse = response.json().await.map_err(map_body_error)?;
        tracing::debug!(status = %body.status, "analysis response decoded");
        Ok(body.into_verdict())
    }
}

impl AnalysisClient for ApiClient {
    async fn analyze_text(&self, text: &str, user_id: &str) -> Result<Verdict, CoreError> {
        self.post_analysis(&AnalyzeTextRequest { text }, user_id)
            .await
    }

    async fn analyze_image(
        &self,
        payload: ImagePayload,
        user_id: &str,
    ) -> Result<Verdict, CoreError> {
        let request = AnalyzeImageRequest {
            image: ImageBody {
                kind: payload.format.as_str(),
                data: general_purpose::STANDARD.encode(&payload.data),
            },
        };
        self.post_analysis(&request, user_id).await
    }
}

impl AvoidListClient for ApiClient {
    async fn fetch_avoid_list(
        &self,
        selection: ProfileSelection,
        user_id: &str,
    ) -> Result<AvoidList, CoreError> {
        let url = format!("{}/analyze", self.base_url);
        tracing::debug!(%url, "requesting personalized avoid-list");

        let request = AvoidListRequest {
            dietary: &selection.dietary,
            health: &selection.health,
            allergies: &selection.allergies,
        };

        let response = self
            .client
            .post(&url)
            .header("X-User-Id", user_id)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "avoid-list endpoint returned error");
            return Err(CoreError::Server(status.as_u16()));
        }

        let body: AvoidListResponse = response.json().await.map_err(map_body_error)?;
        tracing::info!(items = body.blacklist.len(), "avoid-list fetched");
        Ok(AvoidList::new(body.blacklist))
    }
}

fn map_transport_error(e: reqwest::Error) -> CoreError {
    if e.is_connect() {
        tracing::error!(error = %e, "connectivity lost");
        CoreError::NoConnectivity
    } else if e.is_builder() {
        tracing::error!(error = %e, "invalid request configuration");
        CoreError::InvalidUrl(e.to_string())
    } else {
        // Timeouts and every other transport failure; these never trigger
        // the offline fallback.
        tracing::error!(error = %e, "network error");
        CoreError::Network(e.to_string())
    }
}

fn map_body_error(e: reqwest::Error) -> CoreError {
    if e.is_decode() {
        tracing::error!(error = %e, "response body did not match expected shape");
        CoreError::Decoding(e.to_string())
    } else {
        tracing::error!(error = %e, "malformed response");
        CoreError::InvalidResponse
    }
}
