//! On-screen view model for an analysis

use serde::Serialize;
use shared_types::{AnalysisResult, RiskItem, RiskLevel, MAX_RISK_SCORE};

/// Scores above this are High risk
pub const HIGH_BAND_THRESHOLD: u32 = 60;
/// Scores above this (and not High) are Medium risk
pub const MEDIUM_BAND_THRESHOLD: u32 = 30;

/// Overall band for a contract risk score
pub fn band_for_score(score: u32) -> RiskLevel {
    if score > HIGH_BAND_THRESHOLD {
        RiskLevel::High
    } else if score > MEDIUM_BAND_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Everything the UI shows for one analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub risk_score: u32,
    /// `"<score>/100"`
    pub score_display: String,
    pub band: RiskLevel,
    /// `"High Risk"`, `"Medium Risk"` or `"Low Risk"`
    pub band_label: String,
    pub summary: String,
    pub panels: Vec<RiskPanel>,
}

/// One expandable panel per flagged clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskPanel {
    /// `"<clause> — <level> Risk"`
    pub title: String,
    pub level: RiskLevel,
    pub impact: String,
    pub hindi: String,
    pub alternative: String,
}

impl Dashboard {
    pub fn from_analysis(analysis: &AnalysisResult) -> Self {
        let band = band_for_score(analysis.risk_score);

        Self {
            risk_score: analysis.risk_score,
            score_display: format!("{}/{}", analysis.risk_score, MAX_RISK_SCORE),
            band,
            band_label: format!("{} Risk", band),
            summary: analysis.summary.clone(),
            panels: analysis.risks.iter().map(RiskPanel::from_item).collect(),
        }
    }
}

impl RiskPanel {
    fn from_item(item: &RiskItem) -> Self {
        Self {
            title: format!("{} \u{2014} {} Risk", item.clause, item.level),
            level: item.level,
            impact: item.impact.clone(),
            hindi: item.hindi.clone(),
            alternative: item.alternative.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn analysis(score: u32, risks: Vec<RiskItem>) -> AnalysisResult {
        AnalysisResult {
            risk_score: score,
            summary: "S".to_string(),
            risks,
        }
    }

    fn item(clause: &str, level: RiskLevel) -> RiskItem {
        RiskItem {
            clause: clause.to_string(),
            level,
            impact: "I".to_string(),
            hindi: "H".to_string(),
            alternative: "A".to_string(),
        }
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(band_for_score(61), RiskLevel::High);
        assert_eq!(band_for_score(60), RiskLevel::Medium);
        assert_eq!(band_for_score(31), RiskLevel::Medium);
        assert_eq!(band_for_score(30), RiskLevel::Low);
        assert_eq!(band_for_score(1), RiskLevel::Low);
        assert_eq!(band_for_score(100), RiskLevel::High);
    }

    #[test]
    fn test_single_medium_risk_dashboard() {
        let dashboard = Dashboard::from_analysis(&analysis(45, vec![item("C", RiskLevel::Medium)]));

        assert_eq!(
            dashboard,
            Dashboard {
                risk_score: 45,
                score_display: "45/100".to_string(),
                band: RiskLevel::Medium,
                band_label: "Medium Risk".to_string(),
                summary: "S".to_string(),
                panels: vec![RiskPanel {
                    title: "C \u{2014} Medium Risk".to_string(),
                    level: RiskLevel::Medium,
                    impact: "I".to_string(),
                    hindi: "H".to_string(),
                    alternative: "A".to_string(),
                }],
            }
        );
    }

    #[test]
    fn test_no_risks_no_panels() {
        let dashboard = Dashboard::from_analysis(&analysis(12, vec![]));
        assert!(dashboard.panels.is_empty());
        assert_eq!(dashboard.band_label, "Low Risk");
    }

    #[test]
    fn test_panel_order_follows_reply() {
        let dashboard = Dashboard::from_analysis(&analysis(
            80,
            vec![
                item("Indemnity", RiskLevel::High),
                item("Payment", RiskLevel::Low),
                item("Termination", RiskLevel::Medium),
            ],
        ));
        let titles: Vec<&str> = dashboard.panels.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Indemnity \u{2014} High Risk",
                "Payment \u{2014} Low Risk",
                "Termination \u{2014} Medium Risk",
            ]
        );
    }

    #[test]
    fn test_serialized_band_is_level_name() {
        let json = serde_json::to_value(Dashboard::from_analysis(&analysis(70, vec![]))).unwrap();
        assert_eq!(json["band"], "High");
        assert_eq!(json["score_display"], "70/100");
    }

    proptest! {
        #[test]
        fn band_is_monotonic(a in 1u32..=100, b in 1u32..=100) {
            let rank = |level: RiskLevel| match level {
                RiskLevel::Low => 0,
                RiskLevel::Medium => 1,
                RiskLevel::High => 2,
            };
            if a <= b {
                prop_assert!(rank(band_for_score(a)) <= rank(band_for_score(b)));
            }
        }

        #[test]
        fn one_panel_per_risk(count in 0usize..8) {
            let risks = (0..count).map(|i| item(&format!("Clause {i}"), RiskLevel::Low)).collect();
            prop_assert_eq!(Dashboard::from_analysis(&analysis(50, risks)).panels.len(), count);
        }
    }
}
