use crate::analyzer::report::{Issue, IssueCategory, Severity};
use crate::config::ClauseReferences;
use crate::milestone::Milestone;

/// A compliance rule read over the whole milestone collection. Each rule
/// raises at most one issue and never sees another rule's output.
pub struct ComplianceRule {
    pub name: &'static str,
    pub evaluate: fn(&[Milestone], &ClauseReferences) -> Option<Issue>,
}

/// Evaluated in order; issues are reported in this order.
pub const COMPLIANCE_RULES: [ComplianceRule; 3] = [
    ComplianceRule {
        name: "key-dates-present",
        evaluate: missing_key_dates,
    },
    ComplianceRule {
        name: "milestone-delays",
        evaluate: milestone_delays,
    },
    ComplianceRule {
        name: "completion-date-impact",
        evaluate: completion_date_impact,
    },
];

fn names<'a>(milestones: impl Iterator<Item = &'a Milestone>) -> Vec<String> {
    milestones.map(|m| m.name.clone()).collect()
}

fn missing_key_dates(milestones: &[Milestone], clauses: &ClauseReferences) -> Option<Issue> {
    if milestones.iter().any(|m| m.is_key_date) {
        return None;
    }
    Some(Issue {
        severity: Severity::Moderate,
        category: IssueCategory::MissingKeyDates,
        description: "No key dates are identified in the programme. Key dates carry \
            specific notice obligations and must be shown on the programme."
            .to_string(),
        clause_reference: clauses.key_dates.clone(),
        recommendation: "Add the contractual key dates to the programme, either as \
            highest-priority milestones or with the KeyDate attribute set."
            .to_string(),
        affected_milestones: Vec::new(),
    })
}

fn milestone_delays(milestones: &[Milestone], clauses: &ClauseReferences) -> Option<Issue> {
    let delayed: Vec<&Milestone> = milestones.iter().filter(|m| m.is_delayed()).collect();
    if delayed.is_empty() {
        return None;
    }
    let total_days: u64 = delayed.iter().filter_map(|m| m.delay_days()).map(u64::from).sum();
    Some(Issue {
        severity: Severity::High,
        category: IssueCategory::MilestoneDelay,
        description: format!(
            "{} milestone(s) are forecast to finish later than planned, \
            totalling {} day(s) of delay.",
            delayed.len(),
            total_days,
        ),
        clause_reference: clauses.delay_notification.clone(),
        recommendation: "Notify a compensation event for any delay caused by events \
            outside the Contractor's risk, and give an early warning for matters \
            that could still be mitigated."
            .to_string(),
        affected_milestones: names(delayed.into_iter()),
    })
}

fn completion_date_impact(milestones: &[Milestone], clauses: &ClauseReferences) -> Option<Issue> {
    let impacting: Vec<&Milestone> = milestones
        .iter()
        .filter(|m| m.affects_completion_date && !m.is_completed() && m.is_delayed())
        .collect();
    if impacting.is_empty() {
        return None;
    }
    Some(Issue {
        severity: Severity::Critical,
        category: IssueCategory::CompletionImpact,
        description: format!(
            "{} delayed milestone(s) sit on the critical path and will move the \
            completion date.",
            impacting.len(),
        ),
        clause_reference: clauses.completion_impact.clone(),
        recommendation: "Assess the impact on the completion date and prepare a \
            quotation including the revised programme."
            .to_string(),
        affected_milestones: names(impacting.into_iter()),
    })
}
