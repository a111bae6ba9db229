use colored::*;
use schedulex_core::analyzer::report::{ComplianceReport, Issue, Metrics, Severity};
use schedulex_core::pipeline::ScheduleReport;
use schedulex_core::{FormatError, Milestone, MilestoneStatus};
use std::path::Path;

/// Print a full schedule report to the terminal.
pub fn print_schedule_report(file: &Path, report: &ScheduleReport) {
    println!();
    println!(
        "{}",
        format!(
            " ScheduleX v{} — Analyzing {}",
            env!("CARGO_PKG_VERSION"),
            file.display()
        )
        .bold()
    );
    println!();

    println!(" {}", "Programme".bold().underline());
    println!(" {} Project: {}", "|-".dimmed(), report.project_name.cyan());
    println!(
        " {} Assessed as of: {}",
        "|-".dimmed(),
        report.analyzed_at.format("%Y-%m-%d")
    );
    println!();

    if report.milestones.is_empty() {
        println!(" {} No milestones found in this programme.", "--".yellow().bold());
    } else {
        print_milestone_table(&report.milestones);
    }
    println!();

    println!(" {}", "=".repeat(60).dimmed());
    println!();

    if report.issues.is_empty() {
        println!(
            " {} No compliance issues detected against the schedule obligations.",
            "OK".green().bold()
        );
        println!();
    } else {
        for issue in &report.issues {
            print_issue(issue);
            println!();
        }
    }

    println!(" {}", "=".repeat(60).dimmed());
    println!();
    print_metrics(&report.metrics);
    print_issue_counts(&report.compliance());
    println!();
}

/// Print the extracted milestones only.
pub fn print_milestones(file: &Path, milestones: &[Milestone]) {
    println!();
    println!(" {}", format!("Milestones in {}", file.display()).bold());
    println!();
    if milestones.is_empty() {
        println!(" {} No milestones found in this programme.", "--".yellow().bold());
    } else {
        print_milestone_table(milestones);
    }
    println!();
}

pub fn print_format_error(file: &Path, err: &FormatError) {
    eprintln!(
        " {} {}: file is not a recognized schedule document ({})",
        "SKIP".red().bold(),
        file.display(),
        err
    );
}

fn print_milestone_table(milestones: &[Milestone]) {
    println!(
        " {:<32} {:<12} {:<12} {:<12} {:>6}  {}",
        "Milestone".bold(),
        "Planned".bold(),
        "Finish".bold(),
        "Status".bold(),
        "Delay".bold(),
        "Flags".bold()
    );

    for m in milestones {
        let finish = m
            .actual_date()
            .or_else(|| m.forecast_date())
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let delay = m
            .delay_days()
            .map(|d| format!("{}d", d))
            .unwrap_or_else(|| "-".to_string());

        let mut flags = Vec::new();
        if m.is_key_date {
            flags.push("key date");
        }
        if m.affects_completion_date {
            flags.push("critical");
        }

        println!(
            " {:<32} {:<12} {:<12} {:<12} {:>6}  {}",
            truncate(&m.name, 32),
            m.planned_date.format("%Y-%m-%d").to_string(),
            finish,
            status_colored(m.status),
            delay,
            flags.join(", ").dimmed()
        );
    }
}

fn status_colored(status: MilestoneStatus) -> ColoredString {
    let label = status.label();
    match status {
        MilestoneStatus::Completed => label.green(),
        MilestoneStatus::Delayed => label.red(),
        MilestoneStatus::AtRisk => label.yellow(),
        MilestoneStatus::InProgress | MilestoneStatus::OnTrack => label.cyan(),
        MilestoneStatus::NotStarted => label.normal(),
    }
}

fn print_issue(issue: &Issue) {
    let severity = match issue.severity {
        Severity::Critical => issue.severity.symbol().red().bold(),
        Severity::High => issue.severity.symbol().yellow().bold(),
        Severity::Moderate => issue.severity.symbol().blue().bold(),
    };

    println!(
        " {} {} (clause {})",
        severity,
        issue.category.label().bold(),
        issue.clause_reference
    );
    println!(" {} {}", "|".dimmed(), issue.description);
    if !issue.affected_milestones.is_empty() {
        println!(
            " {} Affected: {}",
            "|".dimmed(),
            issue.affected_milestones.join(", ")
        );
    }
    println!(" {} {} {}", "|".dimmed(), "Fix:".green(), issue.recommendation);
}

fn print_metrics(metrics: &Metrics) {
    println!(" {}", "Summary".bold().underline());
    println!(
        " {} Milestones:             {}",
        "|-".dimmed(),
        metrics.total_milestones
    );
    println!(
        " {} Completed:              {} ({:.0}%)",
        "|-".dimmed(),
        metrics.completed_milestones,
        metrics.completion_pct()
    );
    println!(
        " {} Delayed:                {}",
        "|-".dimmed(),
        metrics.delayed_milestones
    );
    println!(
        " {} Total delay:            {} day(s)",
        "|-".dimmed(),
        metrics.total_delay_days
    );
    println!(
        " {} On critical path:       {}",
        "|-".dimmed(),
        metrics.critical_path_milestone_count
    );
}

fn print_issue_counts(compliance: &ComplianceReport) {
    println!(
        " {} Issues:                 {} critical, {} high, {} moderate",
        "|-".dimmed(),
        compliance.critical_count(),
        compliance.high_count(),
        compliance.moderate_count()
    );
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
