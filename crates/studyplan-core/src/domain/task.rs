//! Task record: the sole entity of the study plan.
//!
//! Design:
//! - `Task` is the single source of truth for one study task.
//! - Wire inputs (`TaskCreateInput`, `TaskUpdateInput`) carry raw strings for the
//!   enum fields and are validated into `NewTask` / `TaskChanges` before they reach a store.
//! - All state transitions go through `TaskMutation::apply_to`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::carry_forward;
use super::errors::PlanError;
use super::ids::{ScopeId, TaskId};
use super::state::{Priority, TaskStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub scope: ScopeId,

    pub title: String,
    pub description: Option<String>,

    pub subject: String,
    pub topic: Option<String>,

    pub priority: Priority,

    /// Persisted status. Use `resolver::effective_status` for display/classification.
    pub status: TaskStatus,

    pub planned_date: NaiveDate,

    /// Estimated effort in hours.
    pub estimated_time: Option<f64>,

    /// Sticky: once true it stays true for the lifetime of the record.
    pub is_carried_forward: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Incremented on every mutation (starts at 1).
    pub version: u64,
}

impl Task {
    pub fn new(id: TaskId, scope: ScopeId, new: NewTask, now: DateTime<Utc>) -> Self {
        Self {
            id,
            scope,
            title: new.title,
            description: new.description,
            subject: new.subject,
            topic: new.topic,
            priority: new.priority,
            status: TaskStatus::Pending,
            planned_date: new.planned_date,
            estimated_time: new.estimated_time,
            is_carried_forward: false,
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
        self.version += 1;
    }
}

/// Validated creation input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub topic: Option<String>,
    pub priority: Priority,
    pub planned_date: NaiveDate,
    pub estimated_time: Option<f64>,
}

/// Creation input as it arrives over the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskCreateInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub planned_date: Option<NaiveDate>,
    #[serde(default)]
    pub estimated_time: Option<f64>,
}

impl TryFrom<TaskCreateInput> for NewTask {
    type Error = PlanError;

    fn try_from(input: TaskCreateInput) -> Result<Self, Self::Error> {
        let title = required_text("title", &input.title)?;
        let subject = required_text("subject", &input.subject)?;
        let planned_date = input
            .planned_date
            .ok_or_else(|| PlanError::validation("planned_date", "is required"))?;
        let priority = match input.priority.as_deref() {
            Some(raw) => raw.parse()?,
            None => Priority::default(),
        };
        let estimated_time = input.estimated_time.map(hours).transpose()?;

        Ok(NewTask {
            title,
            description: optional_text(input.description),
            subject,
            topic: optional_text(input.topic),
            priority,
            planned_date,
            estimated_time,
        })
    }
}

/// Partial update as it arrives over the wire. Only provided fields are applied.
///
/// A blank `description`/`topic` clears the field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdateInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub planned_date: Option<NaiveDate>,
    #[serde(default)]
    pub estimated_time: Option<f64>,

    /// Optimistic concurrency: reject the update unless the stored version matches.
    #[serde(default)]
    pub expected_version: Option<u64>,
}

/// Validated partial update.
///
/// `description`/`topic`: `None` = untouched, `Some(None)` = clear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub subject: Option<String>,
    pub topic: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub planned_date: Option<NaiveDate>,
    pub estimated_time: Option<f64>,
    pub expected_version: Option<u64>,
}

impl TaskChanges {
    /// Mark done / undone.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl TryFrom<TaskUpdateInput> for TaskChanges {
    type Error = PlanError;

    fn try_from(input: TaskUpdateInput) -> Result<Self, Self::Error> {
        Ok(TaskChanges {
            title: input
                .title
                .as_deref()
                .map(|t| required_text("title", t))
                .transpose()?,
            description: input.description.map(|d| optional_text(Some(d))),
            subject: input
                .subject
                .as_deref()
                .map(|s| required_text("subject", s))
                .transpose()?,
            topic: input.topic.map(|t| optional_text(Some(t))),
            status: input.status.as_deref().map(str::parse).transpose()?,
            priority: input.priority.as_deref().map(str::parse).transpose()?,
            planned_date: input.planned_date,
            estimated_time: input.estimated_time.map(hours).transpose()?,
            expected_version: input.expected_version,
        })
    }
}

/// A state transition a store applies atomically to one record.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskMutation {
    Edit(TaskChanges),
    CarryForward { today: NaiveDate },
}

impl TaskMutation {
    /// Apply to `task` in place. On error the task must be discarded by the caller.
    pub fn apply_to(&self, task: &mut Task, now: DateTime<Utc>) -> Result<(), PlanError> {
        match self {
            TaskMutation::Edit(changes) => {
                if let Some(expected) = changes.expected_version
                    && expected != task.version
                {
                    return Err(PlanError::VersionConflict {
                        task_id: task.id,
                        expected,
                        actual: task.version,
                    });
                }
                if let Some(title) = &changes.title {
                    task.title = title.clone();
                }
                if let Some(description) = &changes.description {
                    task.description = description.clone();
                }
                if let Some(subject) = &changes.subject {
                    task.subject = subject.clone();
                }
                if let Some(topic) = &changes.topic {
                    task.topic = topic.clone();
                }
                if let Some(status) = changes.status {
                    task.status = status;
                }
                if let Some(priority) = changes.priority {
                    task.priority = priority;
                }
                if let Some(planned_date) = changes.planned_date {
                    task.planned_date = planned_date;
                }
                if let Some(estimated_time) = changes.estimated_time {
                    task.estimated_time = Some(estimated_time);
                }
            }
            TaskMutation::CarryForward { today } => carry_forward::carry_forward(task, *today)?,
        }
        task.touch(now);
        Ok(())
    }
}

/// List filter. `status` matches the persisted status, not the effective one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            status: None,
        }
    }

    pub fn with_status(status: TaskStatus) -> Self {
        Self {
            date: None,
            status: Some(status),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.date.is_none_or(|d| task.planned_date == d)
            && self.status.is_none_or(|s| task.status == s)
    }
}

fn required_text(field: &'static str, raw: &str) -> Result<String, PlanError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PlanError::validation(field, "must not be blank"));
    }
    Ok(trimmed.to_string())
}

fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn hours(value: f64) -> Result<f64, PlanError> {
    if !value.is_finite() || value < 0.0 {
        return Err(PlanError::validation(
            "estimated_time",
            format!("must be a non-negative number of hours, got {value}"),
        ));
    }
    Ok(value)
}
