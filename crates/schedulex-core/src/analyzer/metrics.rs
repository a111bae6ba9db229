use crate::analyzer::report::Metrics;
use crate::milestone::Milestone;

/// Count and sum over the collection. Independent of issue generation.
pub fn compute_metrics(milestones: &[Milestone]) -> Metrics {
    Metrics {
        total_milestones: milestones.len(),
        completed_milestones: milestones.iter().filter(|m| m.is_completed()).count(),
        delayed_milestones: milestones.iter().filter(|m| m.is_delayed()).count(),
        total_delay_days: milestones
            .iter()
            .filter_map(Milestone::delay_days)
            .map(u64::from)
            .sum(),
        critical_path_milestone_count: milestones
            .iter()
            .filter(|m| m.affects_completion_date)
            .count(),
    }
}
