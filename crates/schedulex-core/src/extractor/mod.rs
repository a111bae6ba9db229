pub mod fields;
pub mod status;

use crate::config::AnalyzerConfig;
use crate::delay;
use crate::milestone::{Completion, Milestone};
use crate::parser::RawTask;
use chrono::{DateTime, Utc};
use status::StatusInputs;
use tracing::debug;

/// A task is a milestone if it is flagged as one or has zero duration.
pub fn is_milestone_candidate(task: &RawTask) -> bool {
    fields::flag(task.milestone_flag.as_deref())
        || fields::is_zero_duration(task.duration.as_deref())
}

/// Select milestone tasks and map each to a [`Milestone`]. Other tasks are
/// dropped; a selected task is never rejected for missing data.
pub fn extract_milestones(
    tasks: &[RawTask],
    config: &AnalyzerConfig,
    now: DateTime<Utc>,
) -> Vec<Milestone> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| {
            let selected = is_milestone_candidate(task);
            if !selected {
                debug!(id = ?task.id, "skipping non-milestone task");
            }
            selected
        })
        .map(|(index, task)| to_milestone(task, index, config, now))
        .collect()
}

/// Map one milestone task, inferring its status, flags and delay.
/// `index` is the task's position in the document, used to label unnamed
/// tasks that also lack an id.
pub fn to_milestone(
    task: &RawTask,
    index: usize,
    config: &AnalyzerConfig,
    now: DateTime<Utc>,
) -> Milestone {
    let start = fields::date(task.start.as_deref());
    let finish = fields::date(task.finish.as_deref());
    let percent_complete = fields::percent_complete(task.percent_complete.as_deref());

    // Undated milestones are planned "now" so the date is never missing.
    let planned_date = start.unwrap_or(now);

    // A finished milestone always has an actual date; without a readable
    // finish it is taken as the planned date.
    let completion = match finish {
        Some(date) if percent_complete >= 100.0 => Completion::Actual(date),
        None if percent_complete >= 100.0 => Completion::Actual(planned_date),
        Some(date) => Completion::Forecast(date),
        None => Completion::Undated,
    };

    let status = status::infer_status(&StatusInputs {
        percent_complete,
        start,
        as_soon_as_possible: fields::is_as_soon_as_possible(task.constraint_type.as_deref()),
        now,
    });

    let name = task
        .name
        .clone()
        .unwrap_or_else(|| match &task.id {
            Some(id) => format!("Milestone {}", id),
            None => format!("Milestone {}", index + 1),
        });

    let milestone = Milestone {
        name,
        planned_date,
        completion,
        status,
        is_key_date: is_key_date(task, config),
        affects_completion_date: fields::flag(task.is_critical.as_deref()),
        description: task.notes.clone(),
        delay: delay::calculate_delay(status, planned_date, finish, &config.delay_reason),
    };
    debug!(
        name = %milestone.name,
        status = milestone.status.label(),
        key_date = milestone.is_key_date,
        delay_days = ?milestone.delay_days(),
        "extracted milestone"
    );
    milestone
}

fn is_key_date(task: &RawTask, config: &AnalyzerConfig) -> bool {
    fields::priority(task.priority.as_deref()) == Some(config.key_date_priority)
        || fields::flag(task.extended_attribute(&config.key_date_attribute))
}
