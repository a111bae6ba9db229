pub mod analyzer;
pub mod config;
pub mod delay;
pub mod error;
pub mod extractor;
pub mod milestone;
pub mod parser;
pub mod pipeline;

pub use analyzer::analyze_compliance;
pub use analyzer::report::{ComplianceReport, Issue, IssueCategory, Metrics, Severity};
pub use config::AnalyzerConfig;
pub use error::FormatError;
pub use milestone::{Completion, Milestone, MilestoneStatus};
pub use pipeline::{analyze_document, parse_schedule_document, ScheduleReport};
