use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::AdvisoryKind,
    protocol::{
        ChatRequest, ChatResponse, GuidanceRequest, GuidanceResponse, SolutionRequest,
        SolutionResponse,
    },
};
use thiserror::Error;
use tracing::{info, warn};

pub mod validation;

pub const FETCH_GUIDE_FALLBACK: &str = "Failed to fetch guide. Please try again.";
pub const FETCH_SOLUTION_FALLBACK: &str = "Failed to fetch solution. Please try again.";
pub const FETCH_RESPONSE_FALLBACK: &str = "Failed to fetch response. Please try again.";
pub const NO_DETECTION_MESSAGE: &str = "No disease detected. Please upload an image first.";

#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("no detection result available to request a solution for")]
    MissingPrerequisite,
    #[error("advisory request could not be completed: {0}")]
    Transport(reqwest::Error),
    #[error("advisory response could not be decoded: {0}")]
    Decode(reqwest::Error),
}

/// Loading indicator owned by one advisory form: a text label / spinner pair
/// plus the trigger control's enabled state. `enter_pending` hides the label,
/// shows the spinner and disables the trigger; `restore_idle` reverses all
/// three. Both must be idempotent.
pub trait ActivityIndicator: Send + Sync {
    fn enter_pending(&self);
    fn restore_idle(&self);
}

/// Indicator for components running without a visible surface.
pub struct DetachedActivityIndicator;

impl ActivityIndicator for DetachedActivityIndicator {
    fn enter_pending(&self) {}
    fn restore_idle(&self) {}
}

/// Result container owned by one advisory form. Regions start hidden;
/// rendering reveals the region if it was not visible yet.
pub trait ResultRegion: Send + Sync {
    fn render_text(&self, text: &str);
    fn render_markup(&self, markup: &str);
}

pub struct DetachedResultRegion;

impl ResultRegion for DetachedResultRegion {
    fn render_text(&self, _text: &str) {}
    fn render_markup(&self, _markup: &str) {}
}

/// Blocking user notification channel (the page-level alert dialog).
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn alert(&self, _message: &str) {}
}

/// Snapshot access to the current disease-detection result list. Entries are
/// the rendered list lines, e.g. `"Blight (92.0%)"`.
pub trait DetectionSource: Send + Sync {
    fn entries(&self) -> Vec<String>;
}

pub struct EmptyDetectionSource;

impl DetectionSource for EmptyDetectionSource {
    fn entries(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Extracts the disease name from the leading detection-list entry by taking
/// the portion before the literal `" ("`. An absent or empty leading entry
/// yields `None`.
pub fn leading_detection_name(entries: &[String]) -> Option<String> {
    let first = entries.first()?;
    let name = first.split(" (").next().unwrap_or_default();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

pub struct AdvisoryClient {
    http: Client,
    server_url: String,
}

impl AdvisoryClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.into(),
        }
    }

    pub async fn organic_guidance(&self, crop: &str) -> Result<String, AdvisoryError> {
        let response: GuidanceResponse = self
            .post_json(
                AdvisoryKind::OrganicGuidance.endpoint_path(),
                &GuidanceRequest {
                    crop: crop.to_string(),
                },
            )
            .await?;
        Ok(response.guide)
    }

    pub async fn yield_optimization(&self, crop: &str) -> Result<String, AdvisoryError> {
        let response: GuidanceResponse = self
            .post_json(
                AdvisoryKind::YieldOptimization.endpoint_path(),
                &GuidanceRequest {
                    crop: crop.to_string(),
                },
            )
            .await?;
        Ok(response.guide)
    }

    pub async fn disease_solution(&self, disease: &str) -> Result<String, AdvisoryError> {
        let response: SolutionResponse = self
            .post_json(
                AdvisoryKind::DiseaseSolution.endpoint_path(),
                &SolutionRequest {
                    disease: disease.to_string(),
                },
            )
            .await?;
        Ok(response.solution)
    }

    pub async fn advisor_chat(&self, message: &str) -> Result<String, AdvisoryError> {
        let response: ChatResponse = self
            .post_json(
                AdvisoryKind::AdvisorChat.endpoint_path(),
                &ChatRequest {
                    message: message.to_string(),
                },
            )
            .await?;
        Ok(response.response)
    }

    pub async fn request(&self, kind: AdvisoryKind, value: &str) -> Result<String, AdvisoryError> {
        match kind {
            AdvisoryKind::OrganicGuidance => self.organic_guidance(value).await,
            AdvisoryKind::YieldOptimization => self.yield_optimization(value).await,
            AdvisoryKind::DiseaseSolution => self.disease_solution(value).await,
            AdvisoryKind::AdvisorChat => self.advisor_chat(value).await,
        }
    }

    // The body is decoded regardless of HTTP status; a non-success status
    // with an undecodable body surfaces as a decode failure like any other.
    async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, AdvisoryError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let response = self
            .http
            .post(format!("{}{path}", self.server_url))
            .json(body)
            .send()
            .await
            .map_err(AdvisoryError::Transport)?;
        response.json().await.map_err(AdvisoryError::Decode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    PlainText,
    Markup,
}

enum InputSource {
    Field,
    DetectionList(Arc<dyn DetectionSource>),
}

/// One request/response cycle orchestrator, instantiated once per advisory
/// form. Owns its indicator and result region exclusively; accepts at most
/// one in-flight request at a time.
pub struct AdvisoryController {
    client: Arc<AdvisoryClient>,
    kind: AdvisoryKind,
    render: RenderMode,
    fallback: &'static str,
    input: InputSource,
    indicator: Arc<dyn ActivityIndicator>,
    region: Arc<dyn ResultRegion>,
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicBool,
}

impl AdvisoryController {
    pub fn new(
        client: Arc<AdvisoryClient>,
        kind: AdvisoryKind,
        indicator: Arc<dyn ActivityIndicator>,
        region: Arc<dyn ResultRegion>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            kind,
            render: render_mode_for(kind),
            fallback: fallback_message_for(kind),
            input: InputSource::Field,
            indicator,
            region,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Disease-solution variant: the input value is not read from a field but
    /// extracted from the leading entry of the detection result list.
    pub fn new_with_detection_source(
        client: Arc<AdvisoryClient>,
        indicator: Arc<dyn ActivityIndicator>,
        region: Arc<dyn ResultRegion>,
        notifier: Arc<dyn Notifier>,
        detection: Arc<dyn DetectionSource>,
    ) -> Self {
        let kind = AdvisoryKind::DiseaseSolution;
        Self {
            client,
            kind,
            render: render_mode_for(kind),
            fallback: fallback_message_for(kind),
            input: InputSource::DetectionList(detection),
            indicator,
            region,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn kind(&self) -> AdvisoryKind {
        self.kind
    }

    /// Runs one full cycle: pre-flight extraction, pending entry, round-trip,
    /// resolution. `field_value` is the trigger's input field read at fire
    /// time (ignored by the detection-list variant). Failures never escape:
    /// transport and decode errors render the fallback message, and the idle
    /// state is restored on every exit path. A fire while a request is
    /// already pending is dropped.
    pub async fn fire(&self, field_value: &str) {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            info!(
                kind = ?self.kind,
                "advisory trigger fired while a request is pending; ignoring"
            );
            return;
        }

        async {
            let value = match self.extract_input(field_value) {
                Ok(value) => value,
                Err(err) => {
                    info!(kind = ?self.kind, "pre-flight extraction aborted: {err}");
                    self.notifier.alert(NO_DETECTION_MESSAGE);
                    return;
                }
            };

            self.indicator.enter_pending();

            match self.client.request(self.kind, &value).await {
                Ok(payload) => self.render_result(&payload),
                Err(err) => {
                    warn!(kind = ?self.kind, "advisory request failed: {err}");
                    self.render_result(self.fallback);
                }
            }
        }
        .await;

        self.indicator.restore_idle();
        self.in_flight.store(false, Ordering::SeqCst);
    }

    fn extract_input(&self, field_value: &str) -> Result<String, AdvisoryError> {
        match &self.input {
            InputSource::Field => Ok(field_value.to_string()),
            InputSource::DetectionList(source) => {
                leading_detection_name(&source.entries())
                    .ok_or(AdvisoryError::MissingPrerequisite)
            }
        }
    }

    fn render_result(&self, payload: &str) {
        match self.render {
            RenderMode::PlainText => self.region.render_text(payload),
            RenderMode::Markup => self.region.render_markup(payload),
        }
    }
}

fn render_mode_for(kind: AdvisoryKind) -> RenderMode {
    match kind {
        AdvisoryKind::DiseaseSolution => RenderMode::Markup,
        AdvisoryKind::OrganicGuidance
        | AdvisoryKind::YieldOptimization
        | AdvisoryKind::AdvisorChat => RenderMode::PlainText,
    }
}

fn fallback_message_for(kind: AdvisoryKind) -> &'static str {
    match kind {
        AdvisoryKind::OrganicGuidance | AdvisoryKind::YieldOptimization => FETCH_GUIDE_FALLBACK,
        AdvisoryKind::DiseaseSolution => FETCH_SOLUTION_FALLBACK,
        AdvisoryKind::AdvisorChat => FETCH_RESPONSE_FALLBACK,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
