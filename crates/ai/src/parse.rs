//! Parsing of text responses from external generators.

use crate::recommendation::{AiError, RecommendationAnalysis};

/// Parse a generator's text reply into a recommendation.
///
/// Models often wrap JSON in a markdown fence (```` ```json ```` … ```` ``` ````);
/// the fence is stripped before parsing.
pub fn parse_recommendation_payload(content: &str) -> Result<RecommendationAnalysis, AiError> {
    let body = strip_code_fence(content);
    serde_json::from_str(body).map_err(|e| AiError::UnparsableResponse(e.to_string()))
}

fn strip_code_fence(content: &str) -> &str {
    let mut body = content.trim();
    if let Some(rest) = body.strip_prefix("```json") {
        body = rest;
    } else if let Some(rest) = body.strip_prefix("```") {
        body = rest;
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "root_cause": "Single-source supplier with 60+ day lead time",
        "mitigation_options": [
            {"option": "Emergency order", "description": "AOG desk", "estimated_cost_usd": 45000, "implementation_time_days": 3, "risk_reduction_pct": 70}
        ],
        "recommended_action": "Emergency order now",
        "confidence_level": "High",
        "expected_roi": "10:1"
    }"#;

    #[test]
    fn parses_bare_json() {
        let a = parse_recommendation_payload(PAYLOAD).unwrap();
        assert_eq!(a.mitigation_options.len(), 1);
        assert_eq!(a.committed_cost_usd(), 45_000.0);
    }

    #[test]
    fn strips_json_fence() {
        let fenced = format!("```json\n{PAYLOAD}\n```");
        let a = parse_recommendation_payload(&fenced).unwrap();
        assert_eq!(a.confidence_level, "High");
    }

    #[test]
    fn strips_plain_fence() {
        let fenced = format!("  ```\n{PAYLOAD}\n```  ");
        assert!(parse_recommendation_payload(&fenced).is_ok());
    }

    #[test]
    fn prose_is_unparsable() {
        let err = parse_recommendation_payload("I recommend ordering more parts.").unwrap_err();
        assert!(matches!(err, AiError::UnparsableResponse(_)));
    }
}
