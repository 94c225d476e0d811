//! Reply cleanup, parsing and validation
//!
//! The model is asked for bare JSON but often wraps it in a fenced code
//! block. `parse_analysis_reply` strips the fence, maps the JSON onto
//! `AnalysisResult` and checks the score range in one step, so callers get
//! either a complete result or a typed error.

use shared_types::AnalysisResult;

use crate::error::AnalysisError;

const FENCE: &str = "```";

/// Remove a surrounding ```` ```json ```` / ```` ``` ```` wrapper, if any.
/// A fence only counts when it opens before the JSON object does.
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let start = match trimmed.find(FENCE) {
        Some(start) if trimmed.find('{').map_or(true, |brace| start < brace) => start,
        _ => return trimmed,
    };

    let mut body = &trimmed[start + FENCE.len()..];
    if body
        .get(..4)
        .is_some_and(|tag| tag.eq_ignore_ascii_case("json"))
    {
        body = &body[4..];
    }

    match body.find(FENCE) {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

/// Parse and validate a raw model reply
pub fn parse_analysis_reply(reply: &str) -> Result<AnalysisResult, AnalysisError> {
    let json = strip_code_fence(reply);
    if json.is_empty() {
        return Err(AnalysisError::EmptyReply);
    }

    let result: AnalysisResult =
        serde_json::from_str(json).map_err(|e| AnalysisError::MalformedReply(e.to_string()))?;
    result.validate()?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{ModelError, RiskLevel};

    const REPLY: &str = r#"{"risk_score":45,"summary":"S","risks":[{"clause":"C","level":"Medium","impact":"I","hindi":"H","alternative":"A"}]}"#;

    #[test]
    fn test_plain_reply() {
        let result = parse_analysis_reply(REPLY).unwrap();
        assert_eq!(result.risk_score, 45);
        assert_eq!(result.summary, "S");
        assert_eq!(result.risks[0].clause, "C");
        assert_eq!(result.risks[0].level, RiskLevel::Medium);
        assert_eq!(result.risks[0].alternative, "A");
    }

    #[test]
    fn test_json_fence() {
        let fenced = format!("```json\n{}\n```", REPLY);
        assert_eq!(
            parse_analysis_reply(&fenced).unwrap(),
            parse_analysis_reply(REPLY).unwrap()
        );
    }

    #[test]
    fn test_bare_fence_with_preamble() {
        let fenced = format!("Here is the analysis:\n```\n{}\n```\nLet me know!", REPLY);
        assert_eq!(
            parse_analysis_reply(&fenced).unwrap(),
            parse_analysis_reply(REPLY).unwrap()
        );
    }

    #[test]
    fn test_single_line_fence() {
        let fenced = format!("```JSON {}```", REPLY);
        assert_eq!(strip_code_fence(&fenced), REPLY);
    }

    #[test]
    fn test_unfenced_reply_only_trimmed() {
        assert_eq!(strip_code_fence("  {\"a\":1}\n"), "{\"a\":1}");
    }

    #[test]
    fn test_backticks_inside_unfenced_summary() {
        let reply = r#"{"risk_score":45,"summary":"Wrap code in ``` fences","risks":[]}"#;
        assert_eq!(strip_code_fence(reply), reply);

        let result = parse_analysis_reply(reply).unwrap();
        assert_eq!(result.summary, "Wrap code in ``` fences");
    }

    #[test]
    fn test_trailing_comma_is_malformed() {
        let reply = r#"{"risk_score":45,"summary":"S","risks":[],}"#;
        assert!(matches!(
            parse_analysis_reply(reply),
            Err(AnalysisError::MalformedReply(_))
        ));
    }

    #[test]
    fn test_missing_brace_is_malformed() {
        let reply = &REPLY[..REPLY.len() - 1];
        assert!(matches!(
            parse_analysis_reply(reply),
            Err(AnalysisError::MalformedReply(_))
        ));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let reply = r#"{"risk_score":45,"risks":[]}"#;
        assert!(matches!(
            parse_analysis_reply(reply),
            Err(AnalysisError::MalformedReply(_))
        ));
    }

    #[test]
    fn test_missing_hindi_in_risk_is_malformed() {
        let reply = r#"{"risk_score":45,"summary":"S","risks":[{"clause":"C","level":"Low","impact":"I","alternative":"A"}]}"#;
        assert!(matches!(
            parse_analysis_reply(reply),
            Err(AnalysisError::MalformedReply(_))
        ));
    }

    #[test]
    fn test_score_as_string_is_malformed() {
        let reply = r#"{"risk_score":"45","summary":"S","risks":[]}"#;
        assert!(parse_analysis_reply(reply).is_err());
    }

    #[test]
    fn test_score_out_of_range_rejected() {
        let reply = r#"{"risk_score":150,"summary":"S","risks":[]}"#;
        assert!(matches!(
            parse_analysis_reply(reply),
            Err(AnalysisError::InvalidReply(ModelError::RiskScoreOutOfRange(150)))
        ));
    }

    #[test]
    fn test_unknown_level_rejected() {
        let reply = r#"{"risk_score":45,"summary":"S","risks":[{"clause":"C","level":"Severe","impact":"I","hindi":"H","alternative":"A"}]}"#;
        assert!(matches!(
            parse_analysis_reply(reply),
            Err(AnalysisError::MalformedReply(_))
        ));
    }

    #[test]
    fn test_lowercase_level_accepted() {
        let reply = r#"{"risk_score":80,"summary":"S","risks":[{"clause":"C","level":"high","impact":"I","hindi":"H","alternative":"A"}]}"#;
        let result = parse_analysis_reply(reply).unwrap();
        assert_eq!(result.risks[0].level, RiskLevel::High);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let reply = r#"{"risk_score":10,"summary":"S","risks":[],"confidence":"high"}"#;
        assert!(parse_analysis_reply(reply).is_ok());
    }

    #[test]
    fn test_risk_order_preserved() {
        let reply = r#"{"risk_score":70,"summary":"S","risks":[
            {"clause":"Indemnity","level":"High","impact":"I","hindi":"H","alternative":"A"},
            {"clause":"Payment","level":"Low","impact":"I","hindi":"H","alternative":"A"},
            {"clause":"Termination","level":"Medium","impact":"I","hindi":"H","alternative":"A"}
        ]}"#;
        let clauses: Vec<String> = parse_analysis_reply(reply)
            .unwrap()
            .risks
            .into_iter()
            .map(|r| r.clause)
            .collect();
        assert_eq!(clauses, vec!["Indemnity", "Payment", "Termination"]);
    }

    #[test]
    fn test_empty_reply() {
        assert!(matches!(
            parse_analysis_reply("```json\n```"),
            Err(AnalysisError::EmptyReply)
        ));
    }
}
