//! HTTP client for the solid-model service

use crate::response::parse_service_response;
use foamkit_core::ServiceError;
use foamkit_layout::CanonicalLayout;
use futures_util::future::{AbortRegistration, Abortable};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Bound applied when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_ERROR_DETAIL_CHARS: usize = 512;

/// Body of a solid-model request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidRequest {
    pub quote_id: String,
    pub material_legend: Option<String>,
    pub layout: Value,
}

impl SolidRequest {
    pub fn new(quote_id: impl Into<String>, layout: &CanonicalLayout) -> Self {
        Self {
            quote_id: quote_id.into(),
            material_legend: None,
            layout: layout.to_value(),
        }
    }

    pub fn with_material(mut self, legend: Option<String>) -> Self {
        self.material_legend = legend.filter(|m| !m.trim().is_empty());
        self
    }
}

/// Client for one solid-model endpoint.
#[derive(Debug, Clone)]
pub struct SolidServiceClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl SolidServiceClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(ServiceError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ServiceError::Transport {
                reason: e.to_string(),
            })?;
        Ok(Self {
            http,
            endpoint,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send one request and return the STEP text.
    pub async fn request_solid(&self, request: &SolidRequest) -> Result<String, ServiceError> {
        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
        tokio::time::timeout(self.timeout, self.exchange(request))
            .await
            .map_err(|_| ServiceError::Timeout { timeout_ms })?
    }

    /// Like [`Self::request_solid`], abandoned as soon as the paired
    /// `AbortHandle` fires.
    pub async fn request_solid_abortable(
        &self,
        request: &SolidRequest,
        registration: AbortRegistration,
    ) -> Result<String, ServiceError> {
        Abortable::new(self.request_solid(request), registration)
            .await
            .map_err(|_| ServiceError::Cancelled)?
    }

    /// Request a solid model, logging any failure as a warning.
    pub async fn fetch_solid(
        &self,
        request: &SolidRequest,
        registration: Option<AbortRegistration>,
    ) -> Option<String> {
        let result = match registration {
            Some(registration) => self.request_solid_abortable(request, registration).await,
            None => self.request_solid(request).await,
        };
        match result {
            Ok(step) => {
                info!(
                    quote = %request.quote_id,
                    bytes = step.len(),
                    "Solid model received from service"
                );
                Some(step)
            }
            Err(e) => {
                warn!(
                    quote = %request.quote_id,
                    endpoint = %self.endpoint,
                    error = %e,
                    "Solid-model service failed; no solid produced"
                );
                None
            }
        }
    }

    async fn exchange(&self, request: &SolidRequest) -> Result<String, ServiceError> {
        debug!(endpoint = %self.endpoint, quote = %request.quote_id, "Posting solid-model request");
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                detail: body.chars().take(MAX_ERROR_DETAIL_CHARS).collect(),
            });
        }
        parse_service_response(&body)
    }
}

fn transport(e: reqwest::Error) -> ServiceError {
    ServiceError::Transport {
        reason: e.to_string(),
    }
}
