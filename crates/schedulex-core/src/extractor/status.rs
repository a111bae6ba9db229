use crate::milestone::MilestoneStatus;
use chrono::{DateTime, Utc};

/// The snapshot values status inference looks at.
#[derive(Debug, Clone, Copy)]
pub struct StatusInputs {
    pub percent_complete: f64,
    pub start: Option<DateTime<Utc>>,
    pub as_soon_as_possible: bool,
    pub now: DateTime<Utc>,
}

impl StatusInputs {
    fn is_complete(&self) -> bool {
        self.percent_complete >= 100.0
    }
}

/// One entry of the decision list: if `applies`, the milestone gets `status`.
pub struct StatusRule {
    pub name: &'static str,
    pub applies: fn(&StatusInputs) -> bool,
    pub status: MilestoneStatus,
}

/// Evaluated top to bottom, first match wins. Progress outranks lateness,
/// lateness outranks the constraint type.
pub const STATUS_RULES: [StatusRule; 4] = [
    StatusRule {
        name: "complete",
        applies: complete,
        status: MilestoneStatus::Completed,
    },
    StatusRule {
        name: "progressing",
        applies: progressing,
        status: MilestoneStatus::InProgress,
    },
    StatusRule {
        name: "overdue",
        applies: overdue,
        status: MilestoneStatus::Delayed,
    },
    StatusRule {
        name: "as-soon-as-possible",
        applies: as_soon_as_possible,
        status: MilestoneStatus::OnTrack,
    },
];

fn complete(inputs: &StatusInputs) -> bool {
    inputs.is_complete()
}

fn progressing(inputs: &StatusInputs) -> bool {
    inputs.percent_complete > 0.0 && !inputs.is_complete()
}

fn overdue(inputs: &StatusInputs) -> bool {
    !inputs.is_complete() && inputs.start.is_some_and(|start| start < inputs.now)
}

fn as_soon_as_possible(inputs: &StatusInputs) -> bool {
    inputs.as_soon_as_possible
}

/// Infer a status; `NotStarted` when no rule matches.
pub fn infer_status(inputs: &StatusInputs) -> MilestoneStatus {
    STATUS_RULES
        .iter()
        .find(|rule| (rule.applies)(inputs))
        .map(|rule| rule.status)
        .unwrap_or(MilestoneStatus::NotStarted)
}
