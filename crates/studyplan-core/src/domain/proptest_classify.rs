//! Property-based tests for status resolution and classification.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use ulid::Ulid;

use super::carry_forward::carry_forward;
use super::classify::{Bucket, classify, summarize};
use super::ids::{ScopeId, TaskId};
use super::resolver::effective_status;
use super::state::{Priority, TaskStatus};
use super::task::{NewTask, Task};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Day offsets around the base date.
fn day() -> impl Strategy<Value = NaiveDate> {
    (-60i64..60).prop_map(|offset| base_date() + Duration::days(offset))
}

fn status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Pending),
        Just(TaskStatus::Completed),
        Just(TaskStatus::Missed),
    ]
}

fn task_strategy() -> impl Strategy<Value = Task> {
    (day(), status(), any::<bool>()).prop_map(|(planned_date, status, carried)| {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut task = Task::new(
            TaskId::from_ulid(Ulid::new()),
            ScopeId::from_ulid(Ulid::nil()),
            NewTask {
                title: "t".to_string(),
                description: None,
                subject: "s".to_string(),
                topic: None,
                priority: Priority::Medium,
                planned_date,
                estimated_time: None,
            },
            now,
        );
        task.status = status;
        task.is_carried_forward = carried;
        task
    })
}

proptest! {
    /// Property: every task lands in exactly one bucket.
    #[test]
    fn prop_buckets_partition_tasks(
        tasks in prop::collection::vec(task_strategy(), 0..40),
        today in day(),
    ) {
        let buckets = classify(tasks.clone(), today);
        prop_assert_eq!(buckets.len(), tasks.len());

        for task in &tasks {
            let hits = Bucket::ALL
                .iter()
                .filter(|&&b| buckets.get(b).iter().any(|t| t.id == task.id))
                .count();
            prop_assert_eq!(hits, 1);
        }
    }

    /// Property: completed + missed + pending == total.
    #[test]
    fn prop_summary_counts_sum_to_total(
        tasks in prop::collection::vec(task_strategy(), 0..40),
        today in day(),
    ) {
        let summary = summarize(&tasks, today);
        prop_assert_eq!(summary.total, tasks.len());
        prop_assert_eq!(summary.completed + summary.missed + summary.pending, summary.total);
        prop_assert_eq!(classify(tasks, today).summary(), summary);
    }

    /// Property: completion wins over any planned date.
    #[test]
    fn prop_completed_is_never_missed(mut task in task_strategy(), today in day()) {
        task.status = TaskStatus::Completed;
        prop_assert_eq!(effective_status(&task, today), TaskStatus::Completed);
        prop_assert_eq!(Bucket::of(&task, today), Bucket::Completed);
    }

    /// Property: carry forward succeeds exactly when the task is missed, and lands in Today.
    #[test]
    fn prop_carry_forward_effect(mut task in task_strategy(), today in day()) {
        let was_missed = effective_status(&task, today) == TaskStatus::Missed;
        let result = carry_forward(&mut task, today);
        prop_assert_eq!(result.is_ok(), was_missed);

        if was_missed {
            prop_assert_eq!(task.planned_date, today);
            prop_assert_eq!(task.status, TaskStatus::Pending);
            prop_assert!(task.is_carried_forward);
            prop_assert_eq!(Bucket::of(&task, today), Bucket::Today);
            prop_assert!(carry_forward(&mut task, today).is_err());
        }
    }
}
