use crate::analyzer::analyze_compliance_with;
use crate::analyzer::report::{ComplianceReport, Issue, Metrics};
use crate::config::AnalyzerConfig;
use crate::error::FormatError;
use crate::extractor::extract_milestones;
use crate::milestone::Milestone;
use crate::parser::{ProjectXmlParser, ScheduleDocument};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything one analysis run produces for a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub project_name: String,
    pub analyzed_at: DateTime<Utc>,
    pub milestones: Vec<Milestone>,
    pub issues: Vec<Issue>,
    pub metrics: Metrics,
}

impl ScheduleReport {
    pub fn compliance(&self) -> ComplianceReport {
        ComplianceReport {
            issues: self.issues.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

/// Extract milestones using the wall clock and default configuration.
pub fn parse_schedule_document(text: &str) -> Result<Vec<Milestone>, FormatError> {
    parse_schedule_document_with(text, &AnalyzerConfig::default(), Utc::now())
}

/// Extract milestones, comparing every date against the single instant `now`.
pub fn parse_schedule_document_with(
    text: &str,
    config: &AnalyzerConfig,
    now: DateTime<Utc>,
) -> Result<Vec<Milestone>, FormatError> {
    let document = ProjectXmlParser::parse(text)?;
    Ok(milestones_from(&document, config, now))
}

/// Like [`parse_schedule_document_with`], for raw file contents.
pub fn parse_schedule_bytes(
    bytes: &[u8],
    config: &AnalyzerConfig,
    now: DateTime<Utc>,
) -> Result<Vec<Milestone>, FormatError> {
    let document = ProjectXmlParser::parse_bytes(bytes)?;
    Ok(milestones_from(&document, config, now))
}

/// Run the whole pipeline: parse, extract, then evaluate compliance.
pub fn analyze_document(
    text: &str,
    config: &AnalyzerConfig,
    now: DateTime<Utc>,
) -> Result<ScheduleReport, FormatError> {
    let document = ProjectXmlParser::parse(text)?;
    Ok(report_for(document, config, now))
}

/// Like [`analyze_document`], for raw file contents.
pub fn analyze_bytes(
    bytes: &[u8],
    config: &AnalyzerConfig,
    now: DateTime<Utc>,
) -> Result<ScheduleReport, FormatError> {
    let document = ProjectXmlParser::parse_bytes(bytes)?;
    Ok(report_for(document, config, now))
}

fn milestones_from(
    document: &ScheduleDocument,
    config: &AnalyzerConfig,
    now: DateTime<Utc>,
) -> Vec<Milestone> {
    let milestones = extract_milestones(&document.tasks, config, now);
    info!(
        project = %document.project_name,
        tasks = document.tasks.len(),
        milestones = milestones.len(),
        "extracted milestones"
    );
    milestones
}

fn report_for(
    document: ScheduleDocument,
    config: &AnalyzerConfig,
    now: DateTime<Utc>,
) -> ScheduleReport {
    let milestones = milestones_from(&document, config, now);
    let ComplianceReport { issues, metrics } = analyze_compliance_with(&milestones, config);
    ScheduleReport {
        project_name: document.project_name,
        analyzed_at: now,
        milestones,
        issues,
        metrics,
    }
}
