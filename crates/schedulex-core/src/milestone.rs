use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status inferred from a programme snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MilestoneStatus {
    NotStarted,
    InProgress,
    Completed,
    Delayed,
    OnTrack,
    AtRisk,
}

impl MilestoneStatus {
    pub fn label(&self) -> &str {
        match self {
            MilestoneStatus::NotStarted => "Not Started",
            MilestoneStatus::InProgress => "In Progress",
            MilestoneStatus::Completed => "Completed",
            MilestoneStatus::Delayed => "Delayed",
            MilestoneStatus::OnTrack => "On Track",
            MilestoneStatus::AtRisk => "At Risk",
        }
    }
}

/// Finish information for a milestone. A milestone has either a confirmed
/// actual finish, an open forecast, or neither, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "date", rename_all = "snake_case")]
pub enum Completion {
    Actual(DateTime<Utc>),
    Forecast(DateTime<Utc>),
    Undated,
}

/// A slip against the planned date, in whole days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DelayRecord")]
pub struct Delay {
    days: u32,
    reason: String,
}

/// Unchecked wire form of [`Delay`].
#[derive(Deserialize)]
struct DelayRecord {
    days: i64,
    reason: String,
}

impl TryFrom<DelayRecord> for Delay {
    type Error = String;

    fn try_from(record: DelayRecord) -> Result<Self, Self::Error> {
        let days = record.days;
        Delay::new(days, record.reason)
            .ok_or_else(|| format!("delay must be a positive number of days, got {}", days))
    }
}

impl Delay {
    /// Returns `None` unless `days` is positive.
    pub fn new(days: i64, reason: impl Into<String>) -> Option<Self> {
        let days = u32::try_from(days).ok().filter(|d| *d > 0)?;
        Some(Self {
            days,
            reason: reason.into(),
        })
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A significant project event extracted from a programme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub name: String,
    pub planned_date: DateTime<Utc>,
    pub completion: Completion,
    pub status: MilestoneStatus,
    pub is_key_date: bool,
    /// Sits on the critical path, so a slip moves the completion date.
    pub affects_completion_date: bool,
    pub description: Option<String>,
    pub delay: Option<Delay>,
}

impl Milestone {
    pub fn actual_date(&self) -> Option<DateTime<Utc>> {
        match self.completion {
            Completion::Actual(date) => Some(date),
            _ => None,
        }
    }

    pub fn forecast_date(&self) -> Option<DateTime<Utc>> {
        match self.completion {
            Completion::Forecast(date) => Some(date),
            _ => None,
        }
    }

    pub fn delay_days(&self) -> Option<u32> {
        self.delay.as_ref().map(Delay::days)
    }

    pub fn delay_reason(&self) -> Option<&str> {
        self.delay.as_ref().map(Delay::reason)
    }

    pub fn is_completed(&self) -> bool {
        self.status == MilestoneStatus::Completed
    }

    pub fn is_delayed(&self) -> bool {
        self.delay_days().is_some_and(|d| d > 0)
    }
}
