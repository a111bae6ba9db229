pub mod metrics;
pub mod report;
pub mod rules;

use crate::config::{AnalyzerConfig, ClauseReferences};
use crate::milestone::Milestone;
use report::{ComplianceReport, Issue};
use tracing::{debug, info};

pub use metrics::compute_metrics;

/// Evaluate the compliance rules and metrics with default clause references.
pub fn analyze_compliance(milestones: &[Milestone]) -> ComplianceReport {
    analyze_compliance_with(milestones, &AnalyzerConfig::default())
}

/// Evaluate the compliance rules and metrics over a milestone collection.
pub fn analyze_compliance_with(
    milestones: &[Milestone],
    config: &AnalyzerConfig,
) -> ComplianceReport {
    let issues = evaluate_rules(milestones, &config.clauses);
    let metrics = compute_metrics(milestones);
    info!(
        milestones = metrics.total_milestones,
        issues = issues.len(),
        delay_days = metrics.total_delay_days,
        "analyzed schedule compliance"
    );
    ComplianceReport { issues, metrics }
}

/// Run every rule in order, collecting the issues raised.
pub fn evaluate_rules(milestones: &[Milestone], clauses: &ClauseReferences) -> Vec<Issue> {
    rules::COMPLIANCE_RULES
        .iter()
        .filter_map(|rule| {
            let issue = (rule.evaluate)(milestones, clauses)?;
            debug!(rule = rule.name, severity = issue.severity.symbol(), "rule raised issue");
            Some(issue)
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::report::Severity;
    use crate::milestone::MilestoneStatus;
    use super::test_support::milestone;

    #[test]
    fn test_empty_collection_only_flags_key_dates() {
        let report = analyze_compliance(&[]);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].severity, Severity::Moderate);
        assert_eq!(report.metrics.total_milestones, 0);
    }

    #[test]
    fn test_issues_follow_rule_order() {
        let milestones = vec![
            milestone("Access", MilestoneStatus::InProgress, false, true, Some(5)),
            milestone("Handover", MilestoneStatus::NotStarted, false, false, None),
        ];
        let report = analyze_compliance(&milestones);
        let severities: Vec<_> = report.issues.iter().map(|i| i.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Moderate, Severity::High, Severity::Critical]
        );
        assert_eq!(report.worst_severity(), Some(Severity::Critical));
        assert_eq!(report.critical_count(), 1);
        assert_eq!(report.high_count(), 1);
        assert_eq!(report.moderate_count(), 1);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let milestones = vec![
            milestone("A", MilestoneStatus::Delayed, true, true, Some(2)),
            milestone("B", MilestoneStatus::Completed, true, false, None),
        ];
        assert_eq!(analyze_compliance(&milestones), analyze_compliance(&milestones));
    }

    #[test]
    fn test_custom_clause_references() {
        let mut config = AnalyzerConfig::default();
        config.clauses.key_dates = "Schedule 2".to_string();
        let report = analyze_compliance_with(&[], &config);
        assert_eq!(report.issues[0].clause_reference, "Schedule 2");
    }
}
