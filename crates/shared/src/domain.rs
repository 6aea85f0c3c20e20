use std::fmt;

use serde::{Deserialize, Serialize};

/// The advisory flows the client can drive. One controller instance exists
/// per kind; instances are fully independent of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    OrganicGuidance,
    YieldOptimization,
    DiseaseSolution,
    AdvisorChat,
}

impl AdvisoryKind {
    pub fn endpoint_path(self) -> &'static str {
        match self {
            AdvisoryKind::OrganicGuidance => "/get-organic-guidance",
            AdvisoryKind::YieldOptimization => "/get-yield-optimization",
            AdvisoryKind::DiseaseSolution => "/get-disease-solution",
            AdvisoryKind::AdvisorChat => "/chat",
        }
    }
}

/// One entry of the disease-detection result list. The textual rendering is
/// what the disease-solution pre-flight extractor parses, so `Display` and
/// the extractor must agree on the `"label (confidence%)"` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionEntry {
    pub label: String,
    pub confidence: f32,
}

impl DetectionEntry {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

impl fmt::Display for DetectionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}%)", self.label, self.confidence * 100.0)
    }
}
