//! Carry forward: move a missed task to today and reopen it.

use chrono::NaiveDate;

use super::errors::PlanError;
use super::resolver::effective_status;
use super::state::TaskStatus;
use super::task::Task;

/// Precondition: effective status at `today` is missed, otherwise `InvalidState`.
///
/// A second call on the same day is rejected because the task is no longer missed.
/// `is_carried_forward` is only ever set here and is never cleared.
pub fn carry_forward(task: &mut Task, today: NaiveDate) -> Result<(), PlanError> {
    let status = effective_status(task, today);
    if status != TaskStatus::Missed {
        return Err(PlanError::InvalidState {
            task_id: task.id,
            status,
        });
    }
    task.planned_date = today;
    task.status = TaskStatus::Pending;
    task.is_carried_forward = true;
    Ok(())
}
