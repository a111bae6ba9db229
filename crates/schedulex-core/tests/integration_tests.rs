use chrono::{DateTime, TimeZone, Utc};
use schedulex_core::analyzer::{self, report::IssueCategory};
use schedulex_core::pipeline::{analyze_bytes, analyze_document, parse_schedule_document_with};
use schedulex_core::{AnalyzerConfig, FormatError, Milestone, MilestoneStatus, Severity};
use std::path::{Path, PathBuf};

/// Get the workspace root (two levels up from CARGO_MANIFEST_DIR of schedulex-core).
fn fixtures_dir() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .parent()
        .unwrap() // crates/
        .parent()
        .unwrap() // workspace root
        .join("tests/fixtures")
}

fn project_fixture(name: &str) -> String {
    let path = fixtures_dir().join("project-xml").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
}

fn depot_milestones() -> Vec<Milestone> {
    parse_schedule_document_with(
        &project_fixture("riverside-depot.xml"),
        &AnalyzerConfig::default(),
        as_of(),
    )
    .unwrap()
}

fn by_name<'a>(milestones: &'a [Milestone], name: &str) -> &'a Milestone {
    milestones
        .iter()
        .find(|m| m.name == name)
        .unwrap_or_else(|| panic!("milestone '{}' not extracted", name))
}

// ─── Extraction ───

#[test]
fn test_depot_selects_only_milestones() {
    let milestones = depot_milestones();
    let names: Vec<_> = milestones.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Contract award",
            "Access to site",
            "Frame complete",
            "Sectional completion A",
            "Practical completion",
        ]
    );
}

#[test]
fn test_depot_statuses() {
    let milestones = depot_milestones();
    let status = |name| by_name(&milestones, name).status;
    assert_eq!(status("Contract award"), MilestoneStatus::Completed);
    assert_eq!(status("Access to site"), MilestoneStatus::InProgress);
    assert_eq!(status("Frame complete"), MilestoneStatus::OnTrack);
    assert_eq!(status("Sectional completion A"), MilestoneStatus::Delayed);
    assert_eq!(status("Practical completion"), MilestoneStatus::NotStarted);
}

#[test]
fn test_depot_dates_and_delays() {
    let milestones = depot_milestones();

    let award = by_name(&milestones, "Contract award");
    assert!(award.actual_date().is_some());
    assert!(award.forecast_date().is_none());
    assert!(award.is_key_date);
    assert!(award.delay.is_none());

    let access = by_name(&milestones, "Access to site");
    assert!(access.forecast_date().is_some());
    assert!(access.affects_completion_date);
    assert_eq!(access.delay_days(), Some(8));
    assert_eq!(access.description.as_deref(), Some("Access delayed by utility diversion"));

    let frame = by_name(&milestones, "Frame complete");
    assert!(frame.is_key_date);
    assert!(frame.delay.is_none());

    let sectional = by_name(&milestones, "Sectional completion A");
    assert_eq!(sectional.delay_days(), Some(7));
    assert!(!sectional.affects_completion_date);

    let practical = by_name(&milestones, "Practical completion");
    assert_eq!(practical.planned_date, as_of());
    assert!(practical.actual_date().is_none() && practical.forecast_date().is_none());
}

#[test]
fn test_extracted_milestones_hold_invariants() {
    for milestone in depot_milestones() {
        assert!(
            !(milestone.actual_date().is_some() && milestone.forecast_date().is_some()),
            "{} has both actual and forecast dates",
            milestone.name
        );
        if let Some(days) = milestone.delay_days() {
            assert!(days > 0);
            assert_ne!(milestone.status, MilestoneStatus::Completed);
        }
        if milestone.status == MilestoneStatus::Completed {
            assert!(milestone.actual_date().is_some());
        }
    }
}

// ─── Compliance ───

#[test]
fn test_depot_compliance_report() {
    let report = analyze_document(
        &project_fixture("riverside-depot.xml"),
        &AnalyzerConfig::default(),
        as_of(),
    )
    .unwrap();

    assert_eq!(report.project_name, "Riverside Depot");

    let categories: Vec<_> = report.issues.iter().map(|i| i.category).collect();
    assert_eq!(
        categories,
        vec![IssueCategory::MilestoneDelay, IssueCategory::CompletionImpact]
    );
    assert!(report.issues[0].description.starts_with("2 milestone(s)"));
    assert_eq!(report.issues[1].severity, Severity::Critical);
    assert_eq!(report.issues[1].affected_milestones, vec!["Access to site"]);

    assert_eq!(report.metrics.total_milestones, 5);
    assert_eq!(report.metrics.completed_milestones, 1);
    assert_eq!(report.metrics.delayed_milestones, 2);
    assert_eq!(report.metrics.total_delay_days, 15);
    assert_eq!(report.metrics.critical_path_milestone_count, 2);
}

#[test]
fn test_no_milestones_is_empty_not_error() {
    let xml = project_fixture("no-milestones.xml");
    let milestones =
        parse_schedule_document_with(&xml, &AnalyzerConfig::default(), as_of()).unwrap();
    assert!(milestones.is_empty());

    let report = analyzer::analyze_compliance(&milestones);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].category, IssueCategory::MissingKeyDates);
    assert_eq!(report.metrics.total_milestones, 0);
}

#[test]
fn test_repeated_analysis_is_identical() {
    let milestones = depot_milestones();
    assert_eq!(
        analyzer::analyze_compliance(&milestones),
        analyzer::analyze_compliance(&milestones)
    );
}

#[test]
fn test_attribute_only_single_task() {
    let xml = project_fixture("single-task.xml");
    let milestones =
        parse_schedule_document_with(&xml, &AnalyzerConfig::default(), as_of()).unwrap();
    assert_eq!(milestones.len(), 1);
    assert_eq!(milestones[0].name, "Start on site");
    assert_eq!(
        milestones[0].planned_date,
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(milestones[0].status, MilestoneStatus::Delayed);
    assert!(milestones[0].delay.is_none());
}

// ─── Failures ───

#[test]
fn test_foreign_document_is_format_error() {
    let err = analyze_document(
        &project_fixture("not-a-schedule.xml"),
        &AnalyzerConfig::default(),
        as_of(),
    )
    .unwrap_err();
    assert_eq!(err, FormatError::MissingTaskPath);
    assert!(err.to_string().starts_with("not a recognized schedule document"));
}

#[test]
fn test_binary_programme_is_unsupported() {
    let mut bytes = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
    bytes.extend(std::iter::repeat(0u8).take(504));
    let err = analyze_bytes(&bytes, &AnalyzerConfig::default(), as_of()).unwrap_err();
    assert_eq!(err, FormatError::UnsupportedBinary);
}

#[test]
fn test_report_serializes_to_json() {
    let report = analyze_document(
        &project_fixture("riverside-depot.xml"),
        &AnalyzerConfig::default(),
        as_of(),
    )
    .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["issues"][1]["severity"], "critical");
    assert_eq!(json["milestones"][0]["completion"]["kind"], "actual");
    assert_eq!(json["metrics"]["total_delay_days"], 15);
}
