use serde::{Deserialize, Serialize};

/// Severity level for compliance issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Moderate,
}

impl Severity {
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Critical => 3,
            Severity::High => 2,
            Severity::Moderate => 1,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Moderate => "MODERATE",
        }
    }
}

/// Which contractual obligation an issue concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueCategory {
    MissingKeyDates,
    MilestoneDelay,
    CompletionImpact,
}

impl IssueCategory {
    pub fn label(&self) -> &str {
        match self {
            IssueCategory::MissingKeyDates => "Missing Key Dates",
            IssueCategory::MilestoneDelay => "Milestone Delay",
            IssueCategory::CompletionImpact => "Completion Date Impact",
        }
    }
}

/// A single compliance issue with the clause it relates to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub category: IssueCategory,
    pub description: String,
    pub clause_reference: String,
    pub recommendation: String,
    pub affected_milestones: Vec<String>,
}

/// Aggregate figures over a milestone collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_milestones: usize,
    pub completed_milestones: usize,
    pub delayed_milestones: usize,
    pub total_delay_days: u64,
    pub critical_path_milestone_count: usize,
}

impl Metrics {
    pub fn completion_pct(&self) -> f64 {
        if self.total_milestones == 0 {
            return 0.0;
        }
        self.completed_milestones as f64 / self.total_milestones as f64 * 100.0
    }
}

/// Issues and metrics for one milestone collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub issues: Vec<Issue>,
    pub metrics: Metrics,
}

impl ComplianceReport {
    pub fn critical_count(&self) -> usize {
        self.count(Severity::Critical)
    }

    pub fn high_count(&self) -> usize {
        self.count(Severity::High)
    }

    pub fn moderate_count(&self) -> usize {
        self.count(Severity::Moderate)
    }

    /// Highest severity present, if any issue was raised.
    pub fn worst_severity(&self) -> Option<Severity> {
        self.issues
            .iter()
            .map(|i| i.severity)
            .max_by_key(Severity::priority)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}
