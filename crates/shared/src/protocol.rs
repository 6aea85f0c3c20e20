use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidanceRequest {
    pub crop: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidanceResponse {
    pub guide: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionRequest {
    pub disease: String,
}

/// `solution` carries a pre-rendered markup fragment; the client displays it
/// without parsing or validating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionResponse {
    pub solution: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guidance_request_serializes_with_crop_key() {
        let body = serde_json::to_value(GuidanceRequest {
            crop: "tomato".to_string(),
        })
        .expect("serialize");
        assert_eq!(body, serde_json::json!({ "crop": "tomato" }));
    }

    #[test]
    fn solution_request_serializes_with_disease_key() {
        let body = serde_json::to_value(SolutionRequest {
            disease: "Blight".to_string(),
        })
        .expect("serialize");
        assert_eq!(body, serde_json::json!({ "disease": "Blight" }));
    }
}
